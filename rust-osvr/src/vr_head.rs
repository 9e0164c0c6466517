//! Stereo head model: per-eye offsets, viewports and projections driven by
//! the display descriptor and a live orientation signal.

use crate::client_kit::ClientKitPtr;
use crate::math::{self, Matrix, Quat, Vec3};
use crate::settings::HeadSettings;
use crate::{
    DeviceDescriptor, DisplayMode, Eye, InterfaceSignalPtr, ProjectionError, ViewMode, Viewport,
};
use std::f32::consts::PI;

/// Receives one draw call per rendered view.
pub trait StereoSceneDrawer {
    /// `eye` is `None` when rendering a single mono view.
    fn draw(&mut self, eye: Option<Eye>, viewport: Viewport, view: &Matrix, projection: &Matrix);
}

#[derive(Debug, Clone, PartialEq)]
pub struct VREye {
    eye: Eye,
    rotation: Quat,
    translation: Vec3,
    camera_enabled: bool,
}

impl VREye {
    pub fn new(eye: Eye) -> VREye {
        VREye {
            eye,
            rotation: Quat::identity(),
            translation: Vec3::zero(),
            camera_enabled: false,
        }
    }

    pub fn eye(&self) -> Eye {
        self.eye
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    /// Placement of the eye relative to the head.
    pub fn transform(&self) -> Matrix {
        math::with_translation(math::rotation_matrix(&self.rotation), self.translation)
    }

    /// Maps head space into this eye's space; the inverse of `transform`.
    pub fn view_offset(&self) -> Matrix {
        Matrix::translation(-self.translation.x, -self.translation.y, -self.translation.z)
            .then(&math::rotation_matrix(&self.rotation.inverse()))
    }

    pub fn viewport(&self, full: &Viewport, mode: DisplayMode) -> Viewport {
        full.split(self.eye, mode)
    }
}

pub struct VRHead {
    view_mode: ViewMode,
    ipd: f32,
    vertical_fov: f32,
    camera_enabled: bool,
    left_eye: VREye,
    right_eye: VREye,
    previous_ipd: Option<f32>,
    previous_view_mode: Option<ViewMode>,
    descriptor: Option<DeviceDescriptor>,
    orientation: InterfaceSignalPtr<Quat>,
    settings: HeadSettings,
}

impl VRHead {
    /// Takes the display geometry from the kit's `/display` descriptor,
    /// keeping the defaults from `settings` when there is none.
    pub fn new(kit: &ClientKitPtr, orientation: InterfaceSignalPtr<Quat>, settings: HeadSettings) -> VRHead {
        let descriptor = kit.borrow().display_descriptor();
        VRHead::with_descriptor(descriptor, orientation, settings)
    }

    pub fn with_descriptor(
        descriptor: Option<DeviceDescriptor>,
        orientation: InterfaceSignalPtr<Quat>,
        settings: HeadSettings,
    ) -> VRHead {
        let mut head = VRHead {
            view_mode: ViewMode::Stereo,
            ipd: settings.ipd_in_meters.max(0.0),
            vertical_fov: settings.vertical_fov_degrees,
            camera_enabled: false,
            left_eye: VREye::new(Eye::Left),
            right_eye: VREye::new(Eye::Right),
            previous_ipd: None,
            previous_view_mode: None,
            descriptor: None,
            orientation,
            settings,
        };
        if let Some(descriptor) = descriptor {
            head.apply_descriptor(descriptor);
        }
        head.update();
        head
    }

    fn apply_descriptor(&mut self, descriptor: DeviceDescriptor) {
        self.view_mode = match descriptor.display_mode {
            DisplayMode::FullScreen => ViewMode::Mono,
            DisplayMode::HorizontalSideBySide | DisplayMode::VerticalSideBySide => ViewMode::Stereo,
        };
        self.vertical_fov = descriptor.monocular_vertical.max(0.0).min(180.0);

        let flip = if descriptor.rotate_180 { PI } else { 0.0 };
        self.left_eye.rotation = math::roll(descriptor.left_roll.to_radians() + flip);
        self.right_eye.rotation = math::roll(descriptor.right_roll.to_radians() + flip);

        info!(
            "Head set up for {} {}: {}x{} {:?}, {} degrees vertical",
            descriptor.vendor, descriptor.model, descriptor.width, descriptor.height,
            descriptor.display_mode, self.vertical_fov
        );
        self.descriptor = Some(descriptor);
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Takes effect on the next `update`.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn ipd_in_meters(&self) -> f32 {
        self.ipd
    }

    /// Negative values clamp to zero. Takes effect on the next `update`.
    pub fn set_ipd_in_meters(&mut self, ipd: f32) {
        self.ipd = ipd.max(0.0);
    }

    pub fn vertical_fov_degrees(&self) -> f32 {
        self.vertical_fov
    }

    /// Whether the single mono camera renders.
    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    pub fn left_eye(&self) -> &VREye {
        &self.left_eye
    }

    pub fn right_eye(&self) -> &VREye {
        &self.right_eye
    }

    pub fn eye(&self, eye: Eye) -> &VREye {
        match eye {
            Eye::Left => &self.left_eye,
            Eye::Right => &self.right_eye,
        }
    }

    pub fn descriptor(&self) -> Option<&DeviceDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.descriptor.as_ref().map_or(DisplayMode::default(), |d| d.display_mode)
    }

    /// Back buffer size the display wants, if known.
    pub fn preferred_resolution(&self) -> Option<(i32, i32)> {
        self.descriptor.as_ref().map(|d| (d.width, d.height))
    }

    pub fn settings(&self) -> &HeadSettings {
        &self.settings
    }

    pub fn orientation(&self) -> Quat {
        self.orientation.borrow().value()
    }

    pub fn orientation_signal(&self) -> &InterfaceSignalPtr<Quat> {
        &self.orientation
    }

    pub fn set_orientation_signal(&mut self, signal: InterfaceSignalPtr<Quat>) {
        self.orientation = signal;
    }

    /// Applies pending IPD and view mode changes.
    pub fn update(&mut self) {
        if self.previous_ipd != Some(self.ipd) {
            let half = self.ipd * 0.5;
            for eye in [&mut self.left_eye, &mut self.right_eye] {
                eye.translation = math::right() * (half * eye.eye.sign());
            }
            self.previous_ipd = Some(self.ipd);
        }

        if self.previous_view_mode != Some(self.view_mode) {
            let stereo = self.view_mode == ViewMode::Stereo;
            self.camera_enabled = !stereo;
            self.left_eye.camera_enabled = stereo;
            self.right_eye.camera_enabled = stereo;
            debug!("Head view mode is now {:?}", self.view_mode);
            self.previous_view_mode = Some(self.view_mode);
        }
    }

    /// World to head transform for the current orientation.
    pub fn view_matrix(&self) -> Matrix {
        math::rotation_matrix(&self.orientation().inverse())
    }

    /// The part of `full` that `eye` renders into, honouring swapped eyes.
    pub fn eye_viewport(&self, eye: Eye, full: &Viewport) -> Viewport {
        let swap = self.descriptor.as_ref().map_or(false, |d| d.swap_eyes);
        let target = match (eye, swap) {
            (Eye::Left, true) => Eye::Right,
            (Eye::Right, true) => Eye::Left,
            (eye, false) => eye,
        };
        full.split(target, self.display_mode())
    }

    pub fn projection(&self, viewport: &Viewport) -> Result<Matrix, ProjectionError> {
        crate::perspective_fov(
            self.vertical_fov.to_radians(),
            viewport.aspect_ratio(),
            self.settings.near_plane,
            self.settings.far_plane,
        )
    }

    /// Issues the draw calls for one frame into `full`.
    pub fn draw_scene(&self, full: &Viewport, drawer: &mut dyn StereoSceneDrawer) -> Result<(), ProjectionError> {
        let head_view = self.view_matrix();
        match self.view_mode {
            ViewMode::Mono => {
                if self.camera_enabled {
                    drawer.draw(None, *full, &head_view, &self.projection(full)?);
                }
            }
            ViewMode::Stereo => {
                for eye in [&self.left_eye, &self.right_eye] {
                    if !eye.camera_enabled {
                        continue;
                    }
                    let viewport = self.eye_viewport(eye.eye, full);
                    let view = head_view.then(&eye.view_offset());
                    drawer.draw(Some(eye.eye), viewport, &view, &self.projection(&viewport)?);
                }
            }
        }
        Ok(())
    }
}
