//! OSVR ClientKit bindings for Rust game loops.
//!
//! A [`ClientKit`] owns the connection to the OSVR server, either through the
//! native `osvrClientKit` library or an in-process mock. Signals wrap tracked
//! interface paths and cache their latest value; [`VRHead`] turns the display
//! descriptor and a head orientation signal into per-eye draw calls.

#[macro_use]
extern crate log;

pub mod api;
mod client_kit;
mod interface_callbacks;
mod orientation_to_pose;
mod settings;
mod signal;
mod vr_head;

pub use rust_osvr_api::*;

pub use client_kit::{ClientKit, ClientKitPtr, DUMMY_APP_ID};
pub use interface_callbacks::{InterfaceCallbacks, InterfaceValue};
pub use orientation_to_pose::OrientationToPoseSignal;
pub use settings::{HeadSettings, SettingsError};
pub use signal::{
    AnalogSignal, ButtonSignal, InterfaceSignalBase, OrientationSignal, PoseMatrixSignal,
    PoseSignal, PositionSignal,
};
pub use vr_head::{StereoSceneDrawer, VREye, VRHead};
