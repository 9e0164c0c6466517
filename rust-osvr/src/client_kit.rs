use crate::{ClientContext, ClientContextCreator, ClientError, DeviceDescriptor, Handedness};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[cfg(feature = "clientkit")]
use crate::api::NativeClientKitCreator;

pub type ClientKitPtr = Rc<RefCell<ClientKit>>;

/// App id used when the caller passes an empty one.
pub const DUMMY_APP_ID: &str = "org.opengoggles.osvr-unity.dummy";

const DISPLAY_PARAMETER: &str = "/display";

// Single entry point to an OSVR client context
pub struct ClientKit {
    app_id: String,
    handedness: Rc<Cell<Handedness>>,
    context: Option<Box<dyn ClientContext>>,
}

impl ClientKit {
    /// Connects through the native ClientKit library.
    #[cfg(feature = "clientkit")]
    pub fn new(app_id: &str) -> Result<ClientKitPtr, ClientError> {
        ClientKit::with_creator(app_id, &NativeClientKitCreator::new())
    }

    pub fn with_creator(app_id: &str, creator: &dyn ClientContextCreator) -> Result<ClientKitPtr, ClientError> {
        let app_id = if app_id.trim().is_empty() {
            warn!("No app id given, using {}", DUMMY_APP_ID);
            DUMMY_APP_ID
        } else {
            app_id
        };
        Ok(ClientKit::with_context(creator.new_context(app_id)?))
    }

    pub fn with_context(context: Box<dyn ClientContext>) -> ClientKitPtr {
        Rc::new(RefCell::new(ClientKit {
            app_id: context.app_id().to_owned(),
            handedness: Rc::new(Cell::new(Handedness::default())),
            context: Some(context),
        }))
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness.get()
    }

    /// Applies to every report converted from now on, including those of
    /// callbacks registered earlier.
    pub fn set_handedness(&mut self, handedness: Handedness) {
        self.handedness.set(handedness);
    }

    pub(crate) fn handedness_handle(&self) -> Rc<Cell<Handedness>> {
        self.handedness.clone()
    }

    /// Dispatches pending reports. Must be called once per frame.
    pub fn update(&mut self) -> Result<(), ClientError> {
        self.context_mut()?.update()
    }

    pub fn context(&self) -> Result<&dyn ClientContext, ClientError> {
        self.context.as_deref().ok_or(ClientError::Disposed)
    }

    pub fn context_mut(&mut self) -> Result<&mut (dyn ClientContext + 'static), ClientError> {
        self.context.as_deref_mut().ok_or(ClientError::Disposed)
    }

    pub fn is_disposed(&self) -> bool {
        self.context.is_none()
    }

    /// The parsed `/display` descriptor, if the server publishes a valid one.
    pub fn display_descriptor(&self) -> Option<DeviceDescriptor> {
        let json = match self.context().and_then(|c| c.string_parameter(DISPLAY_PARAMETER)) {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!("No {} parameter", DISPLAY_PARAMETER);
                return None;
            }
            Err(e) => {
                warn!("Error reading {}: {}", DISPLAY_PARAMETER, e);
                return None;
            }
        };
        match DeviceDescriptor::parse(&json) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!("Ignoring display descriptor: {}", e);
                None
            }
        }
    }

    /// Shuts the context down. Later calls are no-ops.
    pub fn dispose(&mut self) {
        if let Some(context) = self.context.take() {
            info!("Disposing ClientKit for {}", self.app_id);
            drop(context);
        }
    }
}

impl Drop for ClientKit {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::api::{MockClientContext, MockClientKitCreator};
    use crate::MockControlMsg;

    #[test]
    fn empty_app_id_falls_back_to_dummy() {
        let kit = ClientKit::with_creator("  ", &MockClientKitCreator).unwrap();
        assert_eq!(kit.borrow().app_id(), DUMMY_APP_ID);
        assert_eq!(kit.borrow().context().unwrap().app_id(), DUMMY_APP_ID);

        let kit = ClientKit::with_creator("com.example.game", &*MockClientKitCreator::new()).unwrap();
        assert_eq!(kit.borrow().app_id(), "com.example.game");
    }

    #[test]
    fn dispose_is_idempotent() {
        let kit = ClientKit::with_context(Box::new(MockClientContext::new("com.example.game")));
        let mut kit = kit.borrow_mut();
        assert!(kit.update().is_ok());
        kit.dispose();
        kit.dispose();
        assert!(kit.is_disposed());
        assert!(matches!(kit.update(), Err(ClientError::Disposed)));
        assert!(matches!(kit.context(), Err(ClientError::Disposed)));
        assert!(kit.display_descriptor().is_none());
    }

    #[test]
    fn reads_the_display_descriptor() {
        let (context, remote) = MockClientKitCreator::new_with_remote("com.example.game");
        let kit = ClientKit::with_context(Box::new(context));
        let descriptor = kit.borrow().display_descriptor().unwrap();
        assert_eq!((descriptor.width, descriptor.height), (1920, 1080));

        remote.send(MockControlMsg::SetParameter("/display".into(), "garbage".into())).unwrap();
        kit.borrow_mut().update().unwrap();
        assert!(kit.borrow().display_descriptor().is_none());
    }

    #[test]
    fn handedness_defaults_to_right() {
        let kit = ClientKit::with_context(Box::new(MockClientContext::new("com.example.game")));
        assert_eq!(kit.borrow().handedness(), Handedness::RightHanded);
        kit.borrow_mut().set_handedness(Handedness::LeftHanded);
        assert_eq!(kit.borrow().handedness_handle().get(), Handedness::LeftHanded);
    }
}
