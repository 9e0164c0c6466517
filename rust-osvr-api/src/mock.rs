use crate::RawReport;

/// Messages driving a mock client context from the outside.
#[derive(Debug, Clone)]
pub enum MockControlMsg {
    /// Deliver a report to every handler of that kind on the interface path.
    Report(String, RawReport),
    /// Set a string parameter, such as the `/display` descriptor.
    SetParameter(String, String),
    /// Drop all handlers registered on an interface path.
    Disconnect(String),
}
