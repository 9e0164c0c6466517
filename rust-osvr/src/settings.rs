use crate::Handedness;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("error reading settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunables of the head model. Every field is optional in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadSettings {
    pub ipd_in_meters: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Used until a display descriptor provides one.
    pub vertical_fov_degrees: f32,
    pub handedness: Handedness,
}

impl Default for HeadSettings {
    fn default() -> HeadSettings {
        HeadSettings {
            ipd_in_meters: 0.06,
            near_plane: 0.1,
            far_plane: 1000.0,
            vertical_fov_degrees: 90.0,
            handedness: Handedness::RightHanded,
        }
    }
}

impl HeadSettings {
    pub fn from_toml_str(s: &str) -> Result<HeadSettings, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<HeadSettings, SettingsError> {
        HeadSettings::from_toml_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(HeadSettings::from_toml_str("").unwrap(), HeadSettings::default());
    }

    #[test]
    fn partial_documents_override_fields() {
        let settings = HeadSettings::from_toml_str(
            r#"
            ipd_in_meters = 0.064
            far_plane = 250.0
            handedness = "left_handed"
            "#,
        )
        .unwrap();
        assert_eq!(settings.ipd_in_meters, 0.064);
        assert_eq!(settings.far_plane, 250.0);
        assert_eq!(settings.near_plane, 0.1);
        assert_eq!(settings.handedness, Handedness::LeftHanded);
    }

    #[test]
    fn reports_bad_input() {
        assert!(matches!(HeadSettings::from_toml_str("near_plane = \"close\""), Err(SettingsError::Toml(_))));
        assert!(matches!(HeadSettings::load("/nonexistent/head.toml"), Err(SettingsError::Io(_))));
    }
}
