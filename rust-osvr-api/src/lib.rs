#[macro_use]
extern crate log;

pub mod math;
pub mod mock;
pub mod native;
pub mod utils;
pub mod vr_context;
pub mod vr_device_descriptor;
pub mod vr_error;
pub mod vr_eye;
pub mod vr_listeners;
pub mod vr_pose;
pub mod vr_projection;
pub mod vr_signal;
pub mod vr_viewport;

pub use math::{Handedness, Matrix, Quat, Vec3};
pub use mock::MockControlMsg;
pub use native::{RawReport, ReportKind};
pub use vr_context::{ClientContext, ClientContextCreator, InterfaceId, RawReportHandler};
pub use vr_device_descriptor::{DeviceDescriptor, DisplayMode};
pub use vr_error::{ClientError, DescriptorError, ProjectionError};
pub use vr_eye::{Eye, ViewMode};
pub use vr_listeners::{ListenerId, Listeners};
pub use vr_pose::PoseReport;
pub use vr_projection::perspective_fov;
pub use vr_signal::{InterfaceSignal, InterfaceSignalPtr};
pub use vr_viewport::Viewport;
