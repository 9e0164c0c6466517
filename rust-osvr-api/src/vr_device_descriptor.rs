//! Display geometry as published by the server under the `/display` parameter.

use crate::DescriptorError;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Serialize))]
pub enum DisplayMode {
    FullScreen,
    HorizontalSideBySide,
    VerticalSideBySide,
}

impl DisplayMode {
    /// Unrecognised names fall back to horizontal side by side.
    pub fn from_name(name: &str) -> DisplayMode {
        match name {
            "full_screen" => DisplayMode::FullScreen,
            "vert_side_by_side" => DisplayMode::VerticalSideBySide,
            "horz_side_by_side" => DisplayMode::HorizontalSideBySide,
            other => {
                debug!("Unknown display mode {:?}, assuming side by side", other);
                DisplayMode::HorizontalSideBySide
            }
        }
    }
}

impl Default for DisplayMode {
    fn default() -> DisplayMode {
        DisplayMode::HorizontalSideBySide
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Serialize))]
pub struct DeviceDescriptor {
    pub vendor: String,
    pub model: String,
    pub version: String,
    pub note: String,
    pub num_displays: u32,
    pub monocular_horizontal: f32,
    pub monocular_vertical: f32,
    pub overlap_percent: f32,
    pub pitch_tilt: f32,
    pub width: i32,
    pub height: i32,
    pub video_inputs: u32,
    pub display_mode: DisplayMode,
    pub swap_eyes: bool,
    pub k1_red: f32,
    pub k1_green: f32,
    pub k1_blue: f32,
    pub left_roll: f32,
    pub right_roll: f32,
    pub center_proj_x: f32,
    pub center_proj_y: f32,
    pub rotate_180: bool,
}

impl DeviceDescriptor {
    pub fn parse(json: &str) -> Result<DeviceDescriptor, DescriptorError> {
        let root: RawRoot = serde_json::from_str(json)?;
        let hmd = root.hmd;
        let resolution = hmd
            .resolutions
            .into_iter()
            .next()
            .ok_or(DescriptorError::MissingResolution)?;
        let eye = hmd.eyes.into_iter().next().unwrap_or_default();

        let descriptor = DeviceDescriptor {
            vendor: hmd.device.vendor,
            model: hmd.device.model,
            version: hmd.device.version.into_string(),
            note: hmd.device.note.into_string(),
            num_displays: hmd.device.num_displays,
            monocular_horizontal: hmd.field_of_view.monocular_horizontal,
            monocular_vertical: hmd.field_of_view.monocular_vertical,
            overlap_percent: hmd.field_of_view.overlap_percent,
            pitch_tilt: hmd.field_of_view.pitch_tilt,
            width: resolution.width,
            height: resolution.height,
            video_inputs: resolution.video_inputs,
            display_mode: DisplayMode::from_name(&resolution.display_mode),
            swap_eyes: resolution.swap_eyes,
            k1_red: hmd.distortion.k1_red,
            k1_green: hmd.distortion.k1_green,
            k1_blue: hmd.distortion.k1_blue,
            left_roll: hmd.rendering.left_roll,
            right_roll: hmd.rendering.right_roll,
            center_proj_x: eye.center_proj_x,
            center_proj_y: eye.center_proj_y,
            rotate_180: eye.rotate_180,
        };
        debug!(
            "Parsed display descriptor for {} {} ({}x{}, {:?})",
            descriptor.vendor, descriptor.model, descriptor.width, descriptor.height, descriptor.display_mode
        );
        Ok(descriptor)
    }
}

#[derive(Deserialize)]
struct RawRoot {
    hmd: RawHmd,
}

#[derive(Deserialize)]
struct RawHmd {
    #[serde(default)]
    device: RawDevice,
    #[serde(default)]
    field_of_view: RawFieldOfView,
    #[serde(default)]
    resolutions: Vec<RawResolution>,
    #[serde(default)]
    distortion: RawDistortion,
    #[serde(default)]
    rendering: RawRendering,
    #[serde(default)]
    eyes: Vec<RawEye>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDevice {
    vendor: String,
    model: String,
    #[serde(rename = "Version")]
    version: Text,
    #[serde(rename = "Note")]
    note: Text,
    num_displays: u32,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawFieldOfView {
    monocular_horizontal: f32,
    monocular_vertical: f32,
    overlap_percent: f32,
    pitch_tilt: f32,
}

impl Default for RawFieldOfView {
    fn default() -> RawFieldOfView {
        RawFieldOfView {
            monocular_horizontal: 60.0,
            monocular_vertical: 60.0,
            overlap_percent: 100.0,
            pitch_tilt: 0.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawResolution {
    width: i32,
    height: i32,
    video_inputs: u32,
    display_mode: String,
    #[serde(deserialize_with = "flag")]
    swap_eyes: bool,
}

impl Default for RawResolution {
    fn default() -> RawResolution {
        RawResolution {
            width: 1920,
            height: 1080,
            video_inputs: 1,
            display_mode: "horz_side_by_side".to_owned(),
            swap_eyes: false,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDistortion {
    k1_red: f32,
    k1_green: f32,
    k1_blue: f32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawRendering {
    right_roll: f32,
    left_roll: f32,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawEye {
    center_proj_x: f32,
    center_proj_y: f32,
    #[serde(deserialize_with = "flag")]
    rotate_180: bool,
}

impl Default for RawEye {
    fn default() -> RawEye {
        RawEye {
            center_proj_x: 0.5,
            center_proj_y: 0.5,
            rotate_180: false,
        }
    }
}

// Descriptors in the wild write versions both as "1.1" and 1.1.
#[derive(Default)]
struct Text(String);

impl Text {
    fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Text, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Text(s)),
            Value::Null => Ok(Text(String::new())),
            other => Ok(Text(other.to_string())),
        }
    }
}

// Flags are written as 0/1 as often as true/false.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().map_or(false, |v| v != 0.0)),
        Value::Null => Ok(false),
        other => Err(de::Error::custom(format!("expected a flag, found {}", other))),
    }
}
