#[cfg(feature = "clientkit")]
mod clientkit;
#[cfg(feature = "clientkit")]
pub use self::clientkit::{ClientKitLibrary, NativeClientContext, NativeClientKitCreator, LIBRARY_NAME};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use self::mock::{MockClientContext, MockClientKitCreator, MockState, DEFAULT_DISPLAY};
