use super::binding::*;
use super::library::ClientKitLibrary;
use rust_osvr_api::native::{
    OSVR_AnalogReport, OSVR_ButtonReport, OSVR_OrientationReport, OSVR_PoseReport,
    OSVR_PositionReport, OSVR_ReturnCode, OSVR_TimeValue, OSVR_RETURN_SUCCESS,
};
use rust_osvr_api::utils;
use crate::{ClientContext, ClientError, InterfaceId, RawReport, RawReportHandler, ReportKind};
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::ptr;

trait NativeReport: Copy {
    fn wrap(self) -> RawReport;
}

impl NativeReport for OSVR_PoseReport {
    fn wrap(self) -> RawReport { RawReport::Pose(self) }
}

impl NativeReport for OSVR_PositionReport {
    fn wrap(self) -> RawReport { RawReport::Position(self) }
}

impl NativeReport for OSVR_OrientationReport {
    fn wrap(self) -> RawReport { RawReport::Orientation(self) }
}

impl NativeReport for OSVR_ButtonReport {
    fn wrap(self) -> RawReport { RawReport::Button(self) }
}

impl NativeReport for OSVR_AnalogReport {
    fn wrap(self) -> RawReport { RawReport::Analog(self) }
}

// userdata is the `RawReportHandler` boxed by `register_callback`, alive until the
// interface is freed.
unsafe extern "C" fn trampoline<R: NativeReport>(
    userdata: *mut c_void,
    timestamp: *const OSVR_TimeValue,
    report: *const R,
) {
    if userdata.is_null() || report.is_null() {
        return;
    }
    if let Some(time) = timestamp.as_ref() {
        trace!("Report at {:.6}s", utils::timestamp(time));
    }
    let handler = &mut *(userdata as *mut RawReportHandler);
    handler(&(*report).wrap());
}

struct NativeInterface {
    path: String,
    handle: OSVR_ClientInterface,
    handlers: Vec<Box<RawReportHandler>>,
}

fn check(call: &'static str, code: OSVR_ReturnCode) -> Result<(), ClientError> {
    if code == OSVR_RETURN_SUCCESS {
        Ok(())
    } else {
        Err(ClientError::Native { call, code: code as i32 })
    }
}

fn c_path(path: &str) -> Result<CString, ClientError> {
    CString::new(path).map_err(|_| ClientError::InvalidArgument {
        name: "path",
        reason: "contains a NUL byte",
    })
}

// ClientKit context backed by the native library
pub struct NativeClientContext {
    lib: ClientKitLibrary,
    ctx: OSVR_ClientContext,
    app_id: String,
    interfaces: HashMap<InterfaceId, NativeInterface>,
}

impl NativeClientContext {
    pub fn new(lib: ClientKitLibrary, app_id: &str) -> Result<NativeClientContext, ClientError> {
        let c_app_id = CString::new(app_id).map_err(|_| ClientError::InvalidArgument {
            name: "app_id",
            reason: "contains a NUL byte",
        })?;
        let ctx = unsafe { (*lib.init)(c_app_id.as_ptr(), 0) };
        if ctx.is_null() {
            return Err(ClientError::Init(app_id.to_owned()));
        }
        info!("ClientKit context started for {}", app_id);

        Ok(NativeClientContext {
            lib,
            ctx,
            app_id: app_id.to_owned(),
            interfaces: HashMap::new(),
        })
    }

    fn free(&mut self, iface: NativeInterface) -> Result<(), ClientError> {
        let code = unsafe { (*self.lib.free_interface)(self.ctx, iface.handle) };
        debug!("Freed interface {} ({} handlers)", iface.path, iface.handlers.len());
        // The handlers only drop here, once the library no longer references them.
        drop(iface);
        check("osvrClientFreeInterface", code)
    }
}

impl ClientContext for NativeClientContext {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn update(&mut self) -> Result<(), ClientError> {
        let code = unsafe { (*self.lib.update)(self.ctx) };
        check("osvrClientUpdate", code)
    }

    fn open_interface(&mut self, path: &str) -> Result<InterfaceId, ClientError> {
        let c_path = c_path(path)?;
        let mut handle: OSVR_ClientInterface = ptr::null_mut();
        let code = unsafe { (*self.lib.get_interface)(self.ctx, c_path.as_ptr(), &mut handle) };
        check("osvrClientGetInterface", code)?;

        let id = InterfaceId(utils::new_id());
        self.interfaces.insert(id, NativeInterface {
            path: path.to_owned(),
            handle,
            handlers: Vec::new(),
        });
        debug!("Opened interface {} as {:?}", path, id);
        Ok(id)
    }

    fn register_callback(
        &mut self,
        iface: InterfaceId,
        kind: ReportKind,
        handler: RawReportHandler,
    ) -> Result<(), ClientError> {
        let lib = &self.lib;
        let entry = self
            .interfaces
            .get_mut(&iface)
            .ok_or(ClientError::UnknownInterface(iface))?;

        let mut boxed: Box<RawReportHandler> = Box::new(handler);
        let userdata = &mut *boxed as *mut RawReportHandler as *mut c_void;
        let handle = entry.handle;
        let code = unsafe {
            match kind {
                ReportKind::Pose => (*lib.register_pose)(handle, trampoline::<OSVR_PoseReport>, userdata),
                ReportKind::Position => (*lib.register_position)(handle, trampoline::<OSVR_PositionReport>, userdata),
                ReportKind::Orientation => {
                    (*lib.register_orientation)(handle, trampoline::<OSVR_OrientationReport>, userdata)
                }
                ReportKind::Button => (*lib.register_button)(handle, trampoline::<OSVR_ButtonReport>, userdata),
                ReportKind::Analog => (*lib.register_analog)(handle, trampoline::<OSVR_AnalogReport>, userdata),
            }
        };
        check("osvrRegisterCallback", code)?;
        entry.handlers.push(boxed);
        Ok(())
    }

    fn close_interface(&mut self, iface: InterfaceId) -> Result<(), ClientError> {
        let entry = self
            .interfaces
            .remove(&iface)
            .ok_or(ClientError::UnknownInterface(iface))?;
        self.free(entry)
    }

    fn string_parameter(&self, path: &str) -> Result<Option<String>, ClientError> {
        let c_path = c_path(path)?;
        let mut len: usize = 0;
        let code = unsafe { (*self.lib.get_string_parameter_length)(self.ctx, c_path.as_ptr(), &mut len) };
        check("osvrClientGetStringParameterLength", code)?;
        if len == 0 {
            return Ok(None);
        }

        // The length includes the terminating NUL.
        let mut buf: Vec<c_char> = vec![0; len];
        let code = unsafe {
            (*self.lib.get_string_parameter)(self.ctx, c_path.as_ptr(), buf.as_mut_ptr(), len)
        };
        check("osvrClientGetStringParameter", code)?;
        if let Some(last) = buf.last_mut() {
            *last = 0;
        }

        let value = unsafe { CStr::from_ptr(buf.as_ptr()) };
        value
            .to_str()
            .map(|s| Some(s.to_owned()))
            .map_err(|_| ClientError::InvalidParameter(path.to_owned()))
    }
}

impl Drop for NativeClientContext {
    fn drop(&mut self) {
        let ids: Vec<InterfaceId> = self.interfaces.keys().cloned().collect();
        for id in ids {
            if let Some(entry) = self.interfaces.remove(&id) {
                if let Err(e) = self.free(entry) {
                    warn!("Error freeing interface: {}", e);
                }
            }
        }

        let code = unsafe { (*self.lib.shutdown)(self.ctx) };
        match check("osvrClientShutdown", code) {
            Ok(()) => info!("ClientKit context for {} shut down", self.app_id),
            Err(e) => error!("Error shutting down ClientKit context: {}", e),
        }
    }
}
