//! `#[repr(C)]` mirrors of the report structures handed to ClientKit callbacks.
#![allow(non_camel_case_types)]

use std::os::raw::c_char;

pub type OSVR_ReturnCode = c_char;
pub const OSVR_RETURN_SUCCESS: OSVR_ReturnCode = 0;
pub const OSVR_RETURN_FAILURE: OSVR_ReturnCode = 1;

pub type OSVR_ChannelCount = i32;
pub type OSVR_ButtonState = u8;
pub type OSVR_AnalogState = f64;

pub const OSVR_BUTTON_PRESSED: OSVR_ButtonState = 1;
pub const OSVR_BUTTON_NOT_PRESSED: OSVR_ButtonState = 0;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OSVR_Vec3 {
    pub data: [f64; 3],
}

impl OSVR_Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        OSVR_Vec3 { data: [x, y, z] }
    }
}

// Unlike most math libraries ClientKit stores the scalar part first.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OSVR_Quaternion {
    pub data: [f64; 4],
}

impl OSVR_Quaternion {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        OSVR_Quaternion { data: [w, x, y, z] }
    }

    pub fn identity() -> Self {
        OSVR_Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn w(&self) -> f64 { self.data[0] }
    pub fn x(&self) -> f64 { self.data[1] }
    pub fn y(&self) -> f64 { self.data[2] }
    pub fn z(&self) -> f64 { self.data[3] }
}

impl Default for OSVR_Quaternion {
    fn default() -> Self {
        OSVR_Quaternion::identity()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OSVR_Pose3 {
    pub translation: OSVR_Vec3,
    pub rotation: OSVR_Quaternion,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OSVR_TimeValue {
    pub seconds: i64,
    pub microseconds: i32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OSVR_PoseReport {
    pub sensor: OSVR_ChannelCount,
    pub pose: OSVR_Pose3,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OSVR_PositionReport {
    pub sensor: OSVR_ChannelCount,
    pub xyz: OSVR_Vec3,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OSVR_OrientationReport {
    pub sensor: OSVR_ChannelCount,
    pub rotation: OSVR_Quaternion,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OSVR_ButtonReport {
    pub sensor: OSVR_ChannelCount,
    pub state: OSVR_ButtonState,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OSVR_AnalogReport {
    pub sensor: OSVR_ChannelCount,
    pub state: OSVR_AnalogState,
}

/// The kind of report a callback is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Pose,
    Position,
    Orientation,
    Button,
    Analog,
}

/// A single report as delivered by the native library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawReport {
    Pose(OSVR_PoseReport),
    Position(OSVR_PositionReport),
    Orientation(OSVR_OrientationReport),
    Button(OSVR_ButtonReport),
    Analog(OSVR_AnalogReport),
}

impl RawReport {
    pub fn kind(&self) -> ReportKind {
        match *self {
            RawReport::Pose(_) => ReportKind::Pose,
            RawReport::Position(_) => ReportKind::Position,
            RawReport::Orientation(_) => ReportKind::Orientation,
            RawReport::Button(_) => ReportKind::Button,
            RawReport::Analog(_) => ReportKind::Analog,
        }
    }

    pub fn pose(translation: OSVR_Vec3, rotation: OSVR_Quaternion) -> RawReport {
        RawReport::Pose(OSVR_PoseReport {
            sensor: 0,
            pose: OSVR_Pose3 { translation, rotation },
        })
    }

    pub fn position(xyz: OSVR_Vec3) -> RawReport {
        RawReport::Position(OSVR_PositionReport { sensor: 0, xyz })
    }

    pub fn orientation(rotation: OSVR_Quaternion) -> RawReport {
        RawReport::Orientation(OSVR_OrientationReport { sensor: 0, rotation })
    }

    pub fn button(pressed: bool) -> RawReport {
        let state = if pressed { OSVR_BUTTON_PRESSED } else { OSVR_BUTTON_NOT_PRESSED };
        RawReport::Button(OSVR_ButtonReport { sensor: 0, state })
    }

    pub fn analog(state: f64) -> RawReport {
        RawReport::Analog(OSVR_AnalogReport { sensor: 0, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn layouts_match_clientkit() {
        assert_eq!(mem::size_of::<OSVR_Vec3>(), 24);
        assert_eq!(mem::size_of::<OSVR_Quaternion>(), 32);
        assert_eq!(mem::size_of::<OSVR_Pose3>(), 56);
        assert_eq!(mem::size_of::<OSVR_TimeValue>(), 16);
        assert_eq!(mem::size_of::<OSVR_PoseReport>(), 64);
        assert_eq!(mem::size_of::<OSVR_ButtonReport>(), 8);
        assert_eq!(mem::size_of::<OSVR_AnalogReport>(), 16);
    }

    #[test]
    fn quaternion_stores_scalar_first() {
        let q = OSVR_Quaternion::new(0.5, 0.1, 0.2, 0.3);
        assert_eq!(q.data, [0.5, 0.1, 0.2, 0.3]);
        assert_eq!((q.w(), q.x(), q.y(), q.z()), (0.5, 0.1, 0.2, 0.3));
        assert_eq!(OSVR_Quaternion::default(), OSVR_Quaternion::identity());
    }

    #[test]
    fn report_kinds() {
        assert_eq!(RawReport::button(true).kind(), ReportKind::Button);
        assert_eq!(RawReport::analog(0.5).kind(), ReportKind::Analog);
        assert_eq!(RawReport::orientation(OSVR_Quaternion::identity()).kind(), ReportKind::Orientation);
        match RawReport::button(true) {
            RawReport::Button(report) => assert_eq!(report.state, OSVR_BUTTON_PRESSED),
            other => panic!("unexpected report {:?}", other),
        }
    }
}
