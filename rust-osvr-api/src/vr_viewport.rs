use crate::vr_device_descriptor::DisplayMode;
use crate::vr_eye::Eye;

/// A render target rectangle in pixels plus its depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Viewport {
        Viewport {
            x,
            y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// The part of this viewport that `eye` renders into.
    ///
    /// Full screen displays show both eyes over the whole viewport.
    pub fn split(&self, eye: Eye, mode: DisplayMode) -> Viewport {
        match mode {
            DisplayMode::FullScreen => Viewport {
                min_depth: 0.0,
                max_depth: 1.0,
                ..*self
            },
            DisplayMode::HorizontalSideBySide => {
                let half = self.width / 2;
                let x = match eye {
                    Eye::Left => self.x,
                    Eye::Right => self.x + half,
                };
                Viewport::new(x, self.y, half, self.height)
            }
            DisplayMode::VerticalSideBySide => {
                let half = self.height / 2;
                let y = match eye {
                    Eye::Left => self.y,
                    Eye::Right => self.y + half,
                };
                Viewport::new(self.x, y, self.width, half)
            }
        }
    }
}
