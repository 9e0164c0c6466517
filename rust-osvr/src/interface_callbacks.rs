//! Typed callback registration on a single interface path.

use crate::client_kit::ClientKitPtr;
use crate::math::{self, Matrix, Quat, Vec3};
use crate::native::OSVR_BUTTON_PRESSED;
use crate::{ClientError, Handedness, InterfaceId, ListenerId, Listeners, PoseReport, RawReport, ReportKind};
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A value that can be produced from one kind of native report.
pub trait InterfaceValue: Clone + 'static {
    const KIND: ReportKind;

    /// Value held before the first report arrives.
    fn initial() -> Self;

    fn convert(report: &RawReport, handedness: Handedness) -> Option<Self>;
}

impl InterfaceValue for Matrix {
    const KIND: ReportKind = ReportKind::Pose;

    fn initial() -> Matrix {
        Matrix::identity()
    }

    fn convert(report: &RawReport, handedness: Handedness) -> Option<Matrix> {
        match *report {
            RawReport::Pose(ref r) => Some(math::convert_pose(&r.pose, handedness)),
            _ => None,
        }
    }
}

impl InterfaceValue for PoseReport {
    const KIND: ReportKind = ReportKind::Pose;

    fn initial() -> PoseReport {
        PoseReport::identity()
    }

    fn convert(report: &RawReport, handedness: Handedness) -> Option<PoseReport> {
        match *report {
            RawReport::Pose(ref r) => Some(PoseReport::new(
                math::convert_position(&r.pose.translation, handedness),
                math::convert_orientation(&r.pose.rotation, handedness),
            )),
            _ => None,
        }
    }
}

impl InterfaceValue for Vec3 {
    const KIND: ReportKind = ReportKind::Position;

    fn initial() -> Vec3 {
        Vec3::zero()
    }

    fn convert(report: &RawReport, handedness: Handedness) -> Option<Vec3> {
        match *report {
            RawReport::Position(ref r) => Some(math::convert_position(&r.xyz, handedness)),
            _ => None,
        }
    }
}

impl InterfaceValue for Quat {
    const KIND: ReportKind = ReportKind::Orientation;

    fn initial() -> Quat {
        Quat::identity()
    }

    fn convert(report: &RawReport, handedness: Handedness) -> Option<Quat> {
        match *report {
            RawReport::Orientation(ref r) => Some(math::convert_orientation(&r.rotation, handedness)),
            _ => None,
        }
    }
}

impl InterfaceValue for bool {
    const KIND: ReportKind = ReportKind::Button;

    fn initial() -> bool {
        false
    }

    fn convert(report: &RawReport, _: Handedness) -> Option<bool> {
        match *report {
            RawReport::Button(ref r) => Some(r.state == OSVR_BUTTON_PRESSED),
            _ => None,
        }
    }
}

impl InterfaceValue for f32 {
    const KIND: ReportKind = ReportKind::Analog;

    fn initial() -> f32 {
        0.0
    }

    fn convert(report: &RawReport, _: Handedness) -> Option<f32> {
        match *report {
            RawReport::Analog(ref r) => Some(r.state as f32),
            _ => None,
        }
    }
}

type ListenersPtr<T> = Rc<RefCell<Listeners<T>>>;

/// Owns the interface opened for `path` and at most one native registration
/// per value type, fanning each report out to every listener of that type.
pub struct InterfaceCallbacks {
    path: String,
    kit: ClientKitPtr,
    iface: Option<InterfaceId>,
    slots: HashMap<TypeId, Box<dyn Any>>,
}

impl InterfaceCallbacks {
    pub fn new(path: &str, kit: ClientKitPtr) -> Result<InterfaceCallbacks, ClientError> {
        if path.trim().is_empty() {
            return Err(ClientError::InvalidArgument {
                name: "path",
                reason: "must not be blank",
            });
        }
        Ok(InterfaceCallbacks {
            path: path.to_owned(),
            kit,
            iface: None,
            slots: HashMap::new(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kit(&self) -> &ClientKitPtr {
        &self.kit
    }

    pub fn is_started(&self) -> bool {
        self.iface.is_some()
    }

    /// Opens the interface. Does nothing if it is already open.
    pub fn start(&mut self) -> Result<(), ClientError> {
        if self.iface.is_some() {
            return Ok(());
        }
        let iface = self.kit.borrow_mut().context_mut()?.open_interface(&self.path)?;
        debug!("Started callbacks on {}", self.path);
        self.iface = Some(iface);
        Ok(())
    }

    pub fn register_callback<T, F>(&mut self, callback: F) -> Result<ListenerId, ClientError>
    where
        T: InterfaceValue,
        F: FnMut(&str, &T) + 'static,
    {
        self.start()?;
        let type_id = TypeId::of::<T>();
        if let Some(listeners) = self.slots.get(&type_id).and_then(|s| s.downcast_ref::<ListenersPtr<T>>()) {
            return Ok(listeners.borrow_mut().add(callback));
        }

        let iface = self.iface.ok_or(ClientError::Disposed)?;
        let listeners: ListenersPtr<T> = Rc::new(RefCell::new(Listeners::new()));
        let id = listeners.borrow_mut().add(callback);
        let weak = Rc::downgrade(&listeners);
        let path = self.path.clone();
        {
            let mut kit = self.kit.borrow_mut();
            let handedness = kit.handedness_handle();
            kit.context_mut()?.register_callback(
                iface,
                T::KIND,
                Box::new(move |report: &RawReport| {
                    let listeners = match weak.upgrade() {
                        Some(listeners) => listeners,
                        None => return,
                    };
                    if let Some(value) = T::convert(report, handedness.get()) {
                        Listeners::dispatch(&listeners, &path, &value);
                    }
                }),
            )?;
        }
        self.slots.insert(type_id, Box::new(listeners));
        Ok(id)
    }

    /// Returns false if `id` was not registered for `T`.
    pub fn unregister_callback<T: InterfaceValue>(&mut self, id: ListenerId) -> bool {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|s| s.downcast_ref::<ListenersPtr<T>>())
            .map_or(false, |listeners| listeners.borrow_mut().remove(id))
    }

    /// Number of listeners currently registered for `T`.
    pub fn listener_count<T: InterfaceValue>(&self) -> usize {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|s| s.downcast_ref::<ListenersPtr<T>>())
            .map_or(0, |listeners| listeners.borrow().len())
    }

    /// Closes the interface and drops every listener.
    pub fn stop(&mut self) {
        self.slots.clear();
        let iface = match self.iface.take() {
            Some(iface) => iface,
            None => return,
        };
        match self.kit.try_borrow_mut() {
            Ok(mut kit) => {
                // A disposed kit has already freed its interfaces.
                if let Ok(context) = kit.context_mut() {
                    if let Err(e) = context.close_interface(iface) {
                        warn!("Error closing {}: {}", self.path, e);
                    }
                }
            }
            Err(_) => warn!("ClientKit busy, leaving {} open", self.path),
        }
        debug!("Stopped callbacks on {}", self.path);
    }
}

impl Drop for InterfaceCallbacks {
    fn drop(&mut self) {
        self.stop();
    }
}
