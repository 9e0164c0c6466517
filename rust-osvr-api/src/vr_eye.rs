#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// -1 for the left eye, 1 for the right one.
    pub fn sign(&self) -> f32 {
        match *self {
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub enum ViewMode {
    Stereo,
    Mono,
}

impl Default for ViewMode {
    fn default() -> ViewMode {
        ViewMode::Stereo
    }
}
