use crate::client_kit::ClientKitPtr;
use crate::interface_callbacks::{InterfaceCallbacks, InterfaceValue};
use crate::math::{Matrix, Quat, Vec3};
use crate::{ClientError, InterfaceSignal, InterfaceSignalPtr, ListenerId, Listeners, PoseReport};
use std::cell::RefCell;
use std::rc::Rc;

/// Caches the latest value reported on an interface path.
pub struct InterfaceSignalBase<T: InterfaceValue> {
    callbacks: InterfaceCallbacks,
    value: Rc<RefCell<T>>,
    listeners: Rc<RefCell<Listeners<T>>>,
    registration: Option<ListenerId>,
}

pub type PoseSignal = InterfaceSignalBase<PoseReport>;
pub type PoseMatrixSignal = InterfaceSignalBase<Matrix>;
pub type PositionSignal = InterfaceSignalBase<Vec3>;
pub type OrientationSignal = InterfaceSignalBase<Quat>;
pub type ButtonSignal = InterfaceSignalBase<bool>;
pub type AnalogSignal = InterfaceSignalBase<f32>;

impl<T: InterfaceValue> InterfaceSignalBase<T> {
    /// The signal stays idle until `start` is called.
    pub fn new(path: &str, kit: ClientKitPtr) -> Result<InterfaceSignalBase<T>, ClientError> {
        Ok(InterfaceSignalBase {
            callbacks: InterfaceCallbacks::new(path, kit)?,
            value: Rc::new(RefCell::new(T::initial())),
            listeners: Rc::new(RefCell::new(Listeners::new())),
            registration: None,
        })
    }

    pub fn into_ptr(self) -> InterfaceSignalPtr<T> {
        Rc::new(RefCell::new(self))
    }

    pub fn is_started(&self) -> bool {
        self.registration.is_some()
    }
}

impl<T: InterfaceValue> InterfaceSignal<T> for InterfaceSignalBase<T> {
    fn path(&self) -> Option<&str> {
        Some(self.callbacks.path())
    }

    fn start(&mut self) -> Result<(), ClientError> {
        if self.registration.is_some() {
            return Ok(());
        }
        let value = self.value.clone();
        let listeners = self.listeners.clone();
        let id = self.callbacks.register_callback(move |source: &str, new_value: &T| {
            *value.borrow_mut() = new_value.clone();
            Listeners::dispatch(&listeners, source, new_value);
        })?;
        self.registration = Some(id);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(id) = self.registration.take() {
            self.callbacks.unregister_callback::<T>(id);
        }
        self.callbacks.stop();
    }

    fn value(&self) -> T {
        self.value.borrow().clone()
    }

    fn add_listener(&mut self, mut listener: Box<dyn FnMut(&T)>) -> ListenerId {
        self.listeners.borrow_mut().add(move |_: &str, value: &T| listener(value))
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id)
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::api::{MockClientKitCreator, MockState};
    use crate::client_kit::ClientKit;
    use crate::native::{OSVR_Quaternion, OSVR_Vec3};
    use crate::{MockControlMsg, RawReport, ReportKind};
    use std::sync::mpsc::Sender;

    fn mock_kit() -> (ClientKitPtr, Sender<MockControlMsg>, Rc<RefCell<MockState>>) {
        let (context, remote) = MockClientKitCreator::new_with_remote("com.example.signals");
        let state = context.state_handle();
        (ClientKit::with_context(Box::new(context)), remote, state)
    }

    fn send(kit: &ClientKitPtr, remote: &Sender<MockControlMsg>, path: &str, report: RawReport) {
        remote.send(MockControlMsg::Report(path.into(), report)).unwrap();
        kit.borrow_mut().update().unwrap();
    }

    #[test]
    fn initial_values() {
        let (kit, _, _) = mock_kit();
        assert_eq!(PoseSignal::new("/a", kit.clone()).unwrap().value(), PoseReport::identity());
        assert_eq!(PoseMatrixSignal::new("/a", kit.clone()).unwrap().value(), Matrix::identity());
        assert_eq!(PositionSignal::new("/a", kit.clone()).unwrap().value(), Vec3::zero());
        assert_eq!(OrientationSignal::new("/a", kit.clone()).unwrap().value(), Quat::identity());
        assert!(!ButtonSignal::new("/a", kit.clone()).unwrap().value());
        assert_eq!(AnalogSignal::new("/a", kit).unwrap().value(), 0.0);
    }

    #[test]
    fn idle_until_started() {
        let (kit, remote, state) = mock_kit();
        let mut signal = PositionSignal::new("/me/hands/right", kit.clone()).unwrap();
        assert_eq!(signal.path(), Some("/me/hands/right"));
        assert!(!state.borrow().is_open("/me/hands/right"));

        send(&kit, &remote, "/me/hands/right", RawReport::position(OSVR_Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(signal.value(), Vec3::zero());

        signal.start().unwrap();
        signal.start().unwrap();
        assert_eq!(state.borrow().handler_count("/me/hands/right", ReportKind::Position), 1);
        send(&kit, &remote, "/me/hands/right", RawReport::position(OSVR_Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(signal.value(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn listeners_see_every_update() {
        let (kit, remote, _) = mock_kit();
        let mut signal = PoseSignal::new("/me/head", kit.clone()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = signal.add_listener(Box::new(move |pose: &PoseReport| sink.borrow_mut().push(pose.position.y)));
        signal.start().unwrap();

        send(&kit, &remote, "/me/head", RawReport::pose(OSVR_Vec3::new(0.0, 1.0, 0.0), OSVR_Quaternion::identity()));
        send(&kit, &remote, "/me/head", RawReport::pose(OSVR_Vec3::new(0.0, 2.0, 0.0), OSVR_Quaternion::identity()));
        assert_eq!(*seen.borrow(), vec![1.0, 2.0]);
        assert_eq!(signal.value().position, Vec3::new(0.0, 2.0, 0.0));

        assert!(signal.remove_listener(id));
        send(&kit, &remote, "/me/head", RawReport::pose(OSVR_Vec3::new(0.0, 3.0, 0.0), OSVR_Quaternion::identity()));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(signal.value().position.y, 3.0);
    }

    #[test]
    fn stop_and_restart() {
        let (kit, remote, state) = mock_kit();
        let mut signal = ButtonSignal::new("/controller/1", kit.clone()).unwrap();
        let presses = Rc::new(RefCell::new(0));
        let sink = presses.clone();
        signal.add_listener(Box::new(move |pressed: &bool| {
            if *pressed {
                *sink.borrow_mut() += 1;
            }
        }));

        signal.start().unwrap();
        send(&kit, &remote, "/controller/1", RawReport::button(true));
        signal.stop();
        assert!(!signal.is_started());
        assert!(!state.borrow().is_open("/controller/1"));
        send(&kit, &remote, "/controller/1", RawReport::button(true));
        assert_eq!(*presses.borrow(), 1);

        signal.start().unwrap();
        send(&kit, &remote, "/controller/1", RawReport::button(true));
        assert_eq!(*presses.borrow(), 2);
        assert!(signal.value());
    }

    #[test]
    fn shared_through_a_trait_object() {
        let (kit, remote, _) = mock_kit();
        let signal: InterfaceSignalPtr<f32> = AnalogSignal::new("/controller/trigger", kit.clone()).unwrap().into_ptr();
        signal.borrow_mut().start().unwrap();
        send(&kit, &remote, "/controller/trigger", RawReport::analog(0.75));
        assert_eq!(signal.borrow().value(), 0.75);
    }

    #[test]
    fn one_shot_listener_removes_itself() {
        let (kit, remote, _) = mock_kit();
        let signal = ButtonSignal::new("/controller/1", kit.clone()).unwrap().into_ptr();
        let presses = Rc::new(RefCell::new(0));
        let own_id = Rc::new(RefCell::new(None));

        let (weak, slot, sink) = (Rc::downgrade(&signal), own_id.clone(), presses.clone());
        let id = signal.borrow_mut().add_listener(Box::new(move |_: &bool| {
            *sink.borrow_mut() += 1;
            if let (Some(signal), Some(id)) = (weak.upgrade(), slot.borrow_mut().take()) {
                assert!(signal.borrow_mut().remove_listener(id));
            }
        }));
        *own_id.borrow_mut() = Some(id);
        signal.borrow_mut().start().unwrap();

        send(&kit, &remote, "/controller/1", RawReport::button(true));
        send(&kit, &remote, "/controller/1", RawReport::button(false));
        assert_eq!(*presses.borrow(), 1);
        assert!(!signal.borrow().value());
    }
}
