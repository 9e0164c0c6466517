use libloading as lib;
#[cfg(unix)]
use libloading::os::unix::Symbol;
#[cfg(windows)]
use libloading::os::windows::Symbol;

use super::binding::*;
use std::ffi::OsStr;

#[cfg(target_os = "windows")]
pub const LIBRARY_NAME: &str = "osvrClientKit.dll";
#[cfg(target_os = "macos")]
pub const LIBRARY_NAME: &str = "libosvrClientKit.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
pub const LIBRARY_NAME: &str = "libosvrClientKit.so";

// osvrClientKit entry points
pub struct ClientKitLibrary {
    _lib: lib::Library,
    pub init: Symbol<ClientInit>,
    pub update: Symbol<ClientUpdate>,
    pub shutdown: Symbol<ClientShutdown>,
    pub get_interface: Symbol<ClientGetInterface>,
    pub free_interface: Symbol<ClientFreeInterface>,
    pub register_pose: Symbol<RegisterCallback<OSVR_PoseCallback>>,
    pub register_position: Symbol<RegisterCallback<OSVR_PositionCallback>>,
    pub register_orientation: Symbol<RegisterCallback<OSVR_OrientationCallback>>,
    pub register_button: Symbol<RegisterCallback<OSVR_ButtonCallback>>,
    pub register_analog: Symbol<RegisterCallback<OSVR_AnalogCallback>>,
    pub get_string_parameter_length: Symbol<ClientGetStringParameterLength>,
    pub get_string_parameter: Symbol<ClientGetStringParameter>,
}

impl ClientKitLibrary {
    pub unsafe fn new<P: AsRef<OsStr>>(path: P) -> Result<ClientKitLibrary, lib::Error> {
        let lib = lib::Library::new(path)?;
        let init = lib.get::<ClientInit>(b"osvrClientInit\0")?.into_raw();
        let update = lib.get::<ClientUpdate>(b"osvrClientUpdate\0")?.into_raw();
        let shutdown = lib.get::<ClientShutdown>(b"osvrClientShutdown\0")?.into_raw();
        let get_interface = lib.get::<ClientGetInterface>(b"osvrClientGetInterface\0")?.into_raw();
        let free_interface = lib.get::<ClientFreeInterface>(b"osvrClientFreeInterface\0")?.into_raw();
        let register_pose = lib.get::<RegisterCallback<OSVR_PoseCallback>>(b"osvrRegisterPoseCallback\0")?.into_raw();
        let register_position = lib.get::<RegisterCallback<OSVR_PositionCallback>>(b"osvrRegisterPositionCallback\0")?.into_raw();
        let register_orientation = lib.get::<RegisterCallback<OSVR_OrientationCallback>>(b"osvrRegisterOrientationCallback\0")?.into_raw();
        let register_button = lib.get::<RegisterCallback<OSVR_ButtonCallback>>(b"osvrRegisterButtonCallback\0")?.into_raw();
        let register_analog = lib.get::<RegisterCallback<OSVR_AnalogCallback>>(b"osvrRegisterAnalogCallback\0")?.into_raw();
        let get_string_parameter_length = lib
            .get::<ClientGetStringParameterLength>(b"osvrClientGetStringParameterLength\0")?
            .into_raw();
        let get_string_parameter = lib
            .get::<ClientGetStringParameter>(b"osvrClientGetStringParameter\0")?
            .into_raw();

        Ok(ClientKitLibrary {
            _lib: lib,
            init,
            update,
            shutdown,
            get_interface,
            free_interface,
            register_pose,
            register_position,
            register_orientation,
            register_button,
            register_analog,
            get_string_parameter_length,
            get_string_parameter,
        })
    }
}
