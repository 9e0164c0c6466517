use crate::{ClientError, ListenerId};
use std::cell::RefCell;
use std::rc::Rc;

pub type InterfaceSignalPtr<T> = Rc<RefCell<dyn InterfaceSignal<T>>>;

/// A live tracked value that caches its latest state and notifies listeners
/// whenever a new value arrives.
pub trait InterfaceSignal<T> {
    /// The interface path this signal follows, if it is backed by one.
    fn path(&self) -> Option<&str>;

    /// Begins receiving values. Calling it on a started signal is a no-op.
    fn start(&mut self) -> Result<(), ClientError>;

    /// Stops receiving values; `start` may be called again afterwards.
    fn stop(&mut self);

    fn value(&self) -> T;

    fn add_listener(&mut self, listener: Box<dyn FnMut(&T)>) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId) -> bool;
}
