use std::cell::RefCell;
use std::mem;

/// Handle returned when a listener is added, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Entry<T> = (ListenerId, Box<dyn FnMut(&str, &T)>);

/// An ordered multicast list of callbacks receiving the source path and a value.
///
/// Listeners are invoked in registration order, synchronously, on the thread
/// that calls `emit`. A list shared through a `RefCell` is dispatched with
/// `Listeners::dispatch`, which lets listeners add or remove entries on the
/// same list while it runs.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
    // Ids taken out of `entries` by a running `dispatch`.
    in_flight: Vec<ListenerId>,
    removed: Vec<ListenerId>,
}

impl<T> Listeners<T> {
    pub fn new() -> Listeners<T> {
        Listeners {
            next_id: 0,
            entries: Vec::new(),
            in_flight: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&str, &T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        if self.entries.len() != before {
            return true;
        }
        if self.in_flight.contains(&id) && !self.removed.contains(&id) {
            self.removed.push(id);
            return true;
        }
        false
    }

    pub fn emit(&mut self, source: &str, value: &T) {
        for (_, listener) in self.entries.iter_mut() {
            listener(source, value);
        }
    }

    /// Emits on a shared list without holding its borrow across the calls.
    ///
    /// Listeners added during the dispatch first hear the next value. A
    /// listener removed during the dispatch is not called again, even if its
    /// turn in the current round has not come yet. A nested dispatch on the
    /// same list is dropped.
    pub fn dispatch(shared: &RefCell<Listeners<T>>, source: &str, value: &T) {
        let mut running = {
            let mut listeners = match shared.try_borrow_mut() {
                Ok(listeners) => listeners,
                Err(_) => return,
            };
            if !listeners.in_flight.is_empty() {
                debug!("Dropping nested dispatch from {}", source);
                return;
            }
            let running = mem::take(&mut listeners.entries);
            listeners.in_flight = running.iter().map(|(id, _)| *id).collect();
            running
        };

        for (id, listener) in running.iter_mut() {
            if shared.borrow().removed.contains(id) {
                continue;
            }
            listener(source, value);
        }

        let mut listeners = shared.borrow_mut();
        let removed = mem::take(&mut listeners.removed);
        running.retain(|(id, _)| !removed.contains(id));
        running.append(&mut listeners.entries);
        listeners.entries = running;
        listeners.in_flight.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len() + self.in_flight.len() - self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.removed = self.in_flight.clone();
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Listeners<T> {
        Listeners::new()
    }
}
