mod context;

pub use self::context::{MockClientContext, MockState, DEFAULT_DISPLAY};

use crate::{ClientContext, ClientContextCreator, ClientError, MockControlMsg};
use std::sync::mpsc::{channel, Sender};

pub struct MockClientKitCreator;

impl MockClientKitCreator {
    pub fn new() -> Box<dyn ClientContextCreator> {
        Box::new(MockClientKitCreator)
    }

    /// A mock context plus the sender used to feed it reports and parameters.
    pub fn new_with_remote(app_id: &str) -> (MockClientContext, Sender<MockControlMsg>) {
        let (send, rcv) = channel();
        (MockClientContext::new_with_receiver(app_id, rcv), send)
    }
}

impl ClientContextCreator for MockClientKitCreator {
    fn new_context(&self, app_id: &str) -> Result<Box<dyn ClientContext>, ClientError> {
        Ok(Box::new(MockClientContext::new(app_id)))
    }
}
