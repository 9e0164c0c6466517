//! Raw ClientKit C entry point signatures.
#![allow(non_camel_case_types)]

use rust_osvr_api::native::{
    OSVR_AnalogReport, OSVR_ButtonReport, OSVR_OrientationReport, OSVR_PoseReport,
    OSVR_PositionReport, OSVR_ReturnCode, OSVR_TimeValue,
};
use std::os::raw::{c_char, c_void};

pub enum OSVR_ClientContextObject {}
pub type OSVR_ClientContext = *mut OSVR_ClientContextObject;

pub enum OSVR_ClientInterfaceObject {}
pub type OSVR_ClientInterface = *mut OSVR_ClientInterfaceObject;

pub type OSVR_ReportCallback<R> =
    unsafe extern "C" fn(userdata: *mut c_void, timestamp: *const OSVR_TimeValue, report: *const R);

pub type OSVR_PoseCallback = OSVR_ReportCallback<OSVR_PoseReport>;
pub type OSVR_PositionCallback = OSVR_ReportCallback<OSVR_PositionReport>;
pub type OSVR_OrientationCallback = OSVR_ReportCallback<OSVR_OrientationReport>;
pub type OSVR_ButtonCallback = OSVR_ReportCallback<OSVR_ButtonReport>;
pub type OSVR_AnalogCallback = OSVR_ReportCallback<OSVR_AnalogReport>;

pub type ClientInit = unsafe extern "C" fn(app_id: *const c_char, flags: u32) -> OSVR_ClientContext;
pub type ClientUpdate = unsafe extern "C" fn(ctx: OSVR_ClientContext) -> OSVR_ReturnCode;
pub type ClientShutdown = unsafe extern "C" fn(ctx: OSVR_ClientContext) -> OSVR_ReturnCode;
pub type ClientGetInterface = unsafe extern "C" fn(
    ctx: OSVR_ClientContext,
    path: *const c_char,
    iface: *mut OSVR_ClientInterface,
) -> OSVR_ReturnCode;
pub type ClientFreeInterface =
    unsafe extern "C" fn(ctx: OSVR_ClientContext, iface: OSVR_ClientInterface) -> OSVR_ReturnCode;
pub type RegisterCallback<C> =
    unsafe extern "C" fn(iface: OSVR_ClientInterface, cb: C, userdata: *mut c_void) -> OSVR_ReturnCode;
pub type ClientGetStringParameterLength = unsafe extern "C" fn(
    ctx: OSVR_ClientContext,
    path: *const c_char,
    len: *mut usize,
) -> OSVR_ReturnCode;
pub type ClientGetStringParameter = unsafe extern "C" fn(
    ctx: OSVR_ClientContext,
    path: *const c_char,
    buf: *mut c_char,
    len: usize,
) -> OSVR_ReturnCode;
