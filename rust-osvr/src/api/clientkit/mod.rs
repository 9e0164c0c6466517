mod binding;
mod context;
mod library;

pub use self::context::NativeClientContext;
pub use self::library::{ClientKitLibrary, LIBRARY_NAME};

use crate::{ClientContext, ClientContextCreator, ClientError};
use std::path::PathBuf;

pub struct NativeClientKitCreator {
    library_path: PathBuf,
}

impl NativeClientKitCreator {
    pub fn new() -> NativeClientKitCreator {
        NativeClientKitCreator::with_library_path(LIBRARY_NAME)
    }

    pub fn with_library_path<P: Into<PathBuf>>(path: P) -> NativeClientKitCreator {
        NativeClientKitCreator {
            library_path: path.into(),
        }
    }
}

impl Default for NativeClientKitCreator {
    fn default() -> NativeClientKitCreator {
        NativeClientKitCreator::new()
    }
}

impl ClientContextCreator for NativeClientKitCreator {
    fn new_context(&self, app_id: &str) -> Result<Box<dyn ClientContext>, ClientError> {
        let lib = unsafe { ClientKitLibrary::new(&self.library_path) }.map_err(|e| {
            ClientError::Library(format!("{}: {}", self.library_path.display(), e))
        })?;
        Ok(Box::new(NativeClientContext::new(lib, app_id)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_reported() {
        let creator = NativeClientKitCreator::with_library_path("/nonexistent/libosvrClientKit.so");
        match creator.new_context("com.example.test") {
            Err(ClientError::Library(msg)) => assert!(msg.contains("/nonexistent")),
            Err(other) => panic!("unexpected error {}", other),
            Ok(_) => panic!("loaded a library that does not exist"),
        }
    }
}
