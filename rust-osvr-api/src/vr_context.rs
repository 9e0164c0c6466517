use crate::native::{RawReport, ReportKind};
use crate::ClientError;

/// Opaque handle to an interface opened on a `ClientContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceId(pub u32);

/// Receives every report of one kind for one interface.
/// Invoked synchronously from `ClientContext::update`.
pub type RawReportHandler = Box<dyn FnMut(&RawReport)>;

/// A connection to the OSVR server, implemented once per backend.
pub trait ClientContext {
    fn app_id(&self) -> &str;

    /// Pumps pending reports, invoking the registered handlers.
    fn update(&mut self) -> Result<(), ClientError>;

    fn open_interface(&mut self, path: &str) -> Result<InterfaceId, ClientError>;

    fn register_callback(
        &mut self,
        iface: InterfaceId,
        kind: ReportKind,
        handler: RawReportHandler,
    ) -> Result<(), ClientError>;

    /// Frees the interface and every handler registered on it.
    fn close_interface(&mut self, iface: InterfaceId) -> Result<(), ClientError>;

    /// `Ok(None)` when the server has no value for `path`.
    fn string_parameter(&self, path: &str) -> Result<Option<String>, ClientError>;
}

pub trait ClientContextCreator {
    fn new_context(&self, app_id: &str) -> Result<Box<dyn ClientContext>, ClientError>;
}
