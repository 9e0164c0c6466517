use crate::math::{Quat, Vec3};
use crate::{ClientError, InterfaceSignal, InterfaceSignalPtr, ListenerId, Listeners, PoseReport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Presents an orientation-only signal as a pose signal with a fixed,
/// settable position.
pub struct OrientationToPoseSignal {
    orientation: InterfaceSignalPtr<Quat>,
    path: Option<String>,
    position: Rc<Cell<Vec3>>,
    listeners: Rc<RefCell<Listeners<PoseReport>>>,
    forwarding: Option<ListenerId>,
}

impl OrientationToPoseSignal {
    pub fn new(orientation: InterfaceSignalPtr<Quat>) -> OrientationToPoseSignal {
        let path = orientation.borrow().path().map(|p| p.to_owned());
        OrientationToPoseSignal {
            orientation,
            path,
            position: Rc::new(Cell::new(Vec3::zero())),
            listeners: Rc::new(RefCell::new(Listeners::new())),
            forwarding: None,
        }
    }

    pub fn into_ptr(self) -> InterfaceSignalPtr<PoseReport> {
        Rc::new(RefCell::new(self))
    }

    pub fn position(&self) -> Vec3 {
        self.position.get()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position.set(position);
    }
}

impl InterfaceSignal<PoseReport> for OrientationToPoseSignal {
    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn start(&mut self) -> Result<(), ClientError> {
        if self.forwarding.is_none() {
            let position = self.position.clone();
            let listeners = self.listeners.clone();
            let source = self.path.clone().unwrap_or_default();
            let id = self.orientation.borrow_mut().add_listener(Box::new(move |rotation: &Quat| {
                let pose = PoseReport::new(position.get(), *rotation);
                Listeners::dispatch(&listeners, &source, &pose);
            }));
            self.forwarding = Some(id);
        }
        self.orientation.borrow_mut().start()
    }

    fn stop(&mut self) {
        let mut orientation = self.orientation.borrow_mut();
        if let Some(id) = self.forwarding.take() {
            orientation.remove_listener(id);
        }
        orientation.stop();
    }

    fn value(&self) -> PoseReport {
        PoseReport::new(self.position.get(), self.orientation.borrow().value())
    }

    fn add_listener(&mut self, mut listener: Box<dyn FnMut(&PoseReport)>) -> ListenerId {
        self.listeners.borrow_mut().add(move |_: &str, pose: &PoseReport| listener(pose))
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id)
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::api::MockClientKitCreator;
    use crate::client_kit::ClientKit;
    use crate::native::OSVR_Quaternion;
    use crate::signal::OrientationSignal;
    use crate::{MockControlMsg, RawReport};

    #[test]
    fn combines_orientation_with_position() {
        let (context, remote) = MockClientKitCreator::new_with_remote("com.example.adapter");
        let kit = ClientKit::with_context(Box::new(context));
        let orientation = OrientationSignal::new("/me/head", kit.clone()).unwrap().into_ptr();
        let mut pose = OrientationToPoseSignal::new(orientation);
        assert_eq!(pose.path(), Some("/me/head"));
        assert_eq!(pose.value(), PoseReport::identity());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        pose.add_listener(Box::new(move |p: &PoseReport| sink.borrow_mut().push(*p)));
        pose.set_position(Vec3::new(0.0, 1.7, 0.0));
        pose.start().unwrap();

        let rotation = OSVR_Quaternion::new(0.0, 0.0, 1.0, 0.0);
        remote.send(MockControlMsg::Report("/me/head".into(), RawReport::orientation(rotation))).unwrap();
        kit.borrow_mut().update().unwrap();

        let expected = PoseReport::new(Vec3::new(0.0, 1.7, 0.0), Quat::quaternion(0.0, 1.0, 0.0, 0.0));
        assert_eq!(*seen.borrow(), vec![expected]);
        assert_eq!(pose.value(), expected);

        pose.stop();
        remote.send(MockControlMsg::Report("/me/head".into(), RawReport::orientation(rotation))).unwrap();
        kit.borrow_mut().update().unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }
}
