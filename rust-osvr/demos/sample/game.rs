use rust_osvr::math::{self, Matrix, Quat, Vec3};
use rust_osvr::{
    ClientError, ClientKitPtr, Eye, HeadSettings, InterfaceSignalPtr,
    OrientationSignal, StereoSceneDrawer, VRHead, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::axes::Axes;
use crate::input::{InputState, Key};
use crate::mouselook::MouselookSignal;

const MOVE_SPEED: f32 = 5.0;
const IPD_SPEED: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationMode {
    Head,
    Mouselook,
    RightHand,
}

pub struct SampleGame {
    kit: ClientKitPtr,
    head: VRHead,
    head_orientation: InterfaceSignalPtr<Quat>,
    right_hand_orientation: InterfaceSignalPtr<Quat>,
    mouselook: Rc<RefCell<MouselookSignal>>,
    mode: OrientationMode,
    axes: Axes,
    position: Vec3,
    rotation_y: f32,
    last_input: Option<InputState>,
    frame: FrameStats,
}

#[derive(Debug, Default)]
struct FrameStats {
    views: u32,
    visible_vertices: usize,
}

impl SampleGame {
    pub fn new(kit: ClientKitPtr, viewport: &Viewport, settings: HeadSettings) -> Result<SampleGame, ClientError> {
        kit.borrow_mut().set_handedness(settings.handedness);
        let head_orientation = OrientationSignal::new("/me/head", kit.clone())?.into_ptr();
        let right_hand_orientation = OrientationSignal::new("/me/hands/right", kit.clone())?.into_ptr();
        head_orientation.borrow_mut().start()?;
        right_hand_orientation.borrow_mut().start()?;

        let head = VRHead::new(&kit, head_orientation.clone(), settings);
        if let Some((width, height)) = head.preferred_resolution() {
            info!("Display prefers {}x{}", width, height);
        }

        Ok(SampleGame {
            kit,
            head,
            head_orientation,
            right_hand_orientation,
            mouselook: Rc::new(RefCell::new(MouselookSignal::new(viewport))),
            mode: OrientationMode::Head,
            axes: Axes::new(),
            position: Vec3::zero(),
            rotation_y: 0.0,
            last_input: None,
            frame: FrameStats::default(),
        })
    }

    pub fn mode(&self) -> OrientationMode {
        self.mode
    }

    pub fn head(&self) -> &VRHead {
        &self.head
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn cycle_orientation_mode(&mut self) {
        let (mode, signal) = match self.mode {
            OrientationMode::Head => {
                let mouselook: InterfaceSignalPtr<Quat> = self.mouselook.clone();
                (OrientationMode::Mouselook, mouselook)
            }
            OrientationMode::Mouselook => (OrientationMode::RightHand, self.right_hand_orientation.clone()),
            OrientationMode::RightHand => (OrientationMode::Head, self.head_orientation.clone()),
        };
        info!("Orientation source is now {:?}", mode);
        self.mode = mode;
        self.head.set_orientation_signal(signal);
    }

    /// Advances one frame. Returns `false` once the game should exit.
    pub fn update(&mut self, dt: f32, input: &mut InputState) -> Result<bool, ClientError> {
        if input.is_down(Key::Escape) {
            return Ok(false);
        }

        if let Some(ref last) = self.last_input {
            if !last.is_down(Key::O) && input.is_down(Key::O) {
                self.cycle_orientation_mode();
            }
        }
        self.last_input = Some(input.clone());

        let mut movement = Vec3::zero();
        if input.is_down(Key::W) {
            movement = math::forward() * MOVE_SPEED * dt;
        } else if input.is_down(Key::S) {
            movement = math::backward() * MOVE_SPEED * dt;
        }
        if input.is_down(Key::A) {
            movement = math::left() * MOVE_SPEED * dt;
        } else if input.is_down(Key::D) {
            movement = math::right() * MOVE_SPEED * dt;
        }

        if input.is_down(Key::Left) {
            self.rotation_y += MOVE_SPEED * dt;
        } else if input.is_down(Key::Right) {
            self.rotation_y -= MOVE_SPEED * dt;
        }

        let keyboard = math::rotation_matrix(&math::yaw_pitch_roll(self.rotation_y, 0.0, 0.0));
        let heading = math::rotation_matrix(&self.head.orientation()).then(&keyboard);
        self.position += heading.transform_vector3d(movement);

        if input.is_down(Key::Q) {
            let ipd = self.head.ipd_in_meters() + IPD_SPEED * dt;
            self.head.set_ipd_in_meters(ipd);
        }
        if input.is_down(Key::E) {
            let ipd = self.head.ipd_in_meters() - IPD_SPEED * dt;
            self.head.set_ipd_in_meters(ipd);
        }

        self.head.update();
        self.mouselook.borrow_mut().update(dt, input);
        self.kit.borrow_mut().update()?;
        Ok(true)
    }

    pub fn draw(&mut self, viewport: &Viewport) -> anyhow::Result<()> {
        self.frame = FrameStats::default();
        let mut scene = Scene {
            position: self.position,
            rotation_y: self.rotation_y,
            axes: &self.axes,
            stats: &mut self.frame,
        };
        self.head.draw_scene(viewport, &mut scene)?;
        trace!(
            "Drew {} views, {} axis vertices visible",
            self.frame.views,
            self.frame.visible_vertices
        );
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.right_hand_orientation.borrow_mut().stop();
        self.head_orientation.borrow_mut().stop();
        self.kit.borrow_mut().dispose();
    }
}

struct Scene<'a> {
    position: Vec3,
    rotation_y: f32,
    axes: &'a Axes,
    stats: &'a mut FrameStats,
}

impl StereoSceneDrawer for Scene<'_> {
    fn draw(&mut self, eye: Option<Eye>, viewport: Viewport, view: &Matrix, projection: &Matrix) {
        let translation = Matrix::translation(-self.position.x, -self.position.y, -self.position.z);
        let keyboard = math::rotation_matrix(&math::yaw_pitch_roll(-self.rotation_y, 0.0, 0.0));
        let camera_view = translation.then(&keyboard).then(view);

        let world = Matrix::translation(0.0, -5.0, -5.0);
        let projected = self.axes.project(&world, &camera_view, projection);
        let visible = projected.iter().filter(|(_, p)| p.is_some()).count();
        debug!("{:?} view at {:?}: {} of 3 axis vertices in front", eye, viewport, visible);

        self.stats.views += 1;
        self.stats.visible_vertices += visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_osvr::api::MockClientKitCreator;
    use rust_osvr::native::OSVR_Quaternion;
    use rust_osvr::{ClientKit, MockControlMsg, RawReport};
    use std::f32::consts::FRAC_PI_2;
    use std::sync::mpsc::Sender;

    fn game() -> (SampleGame, Sender<MockControlMsg>) {
        let (context, remote) = MockClientKitCreator::new_with_remote("com.example.sample");
        let kit = ClientKit::with_context(Box::new(context));
        let viewport = Viewport::new(0, 0, 1920, 1080);
        let game = SampleGame::new(kit, &viewport, HeadSettings::default()).unwrap();
        (game, remote)
    }

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState::default();
        input.set_mouse_position(960, 540);
        for key in keys {
            input.press(*key);
        }
        input
    }

    fn assert_near(actual: Vec3, expected: Vec3) {
        assert!((actual - expected).length() < 1e-4, "{:?} != {:?}", actual, expected);
    }

    #[test]
    fn escape_ends_the_loop() {
        let (mut game, _) = game();
        assert!(game.update(0.1, &mut held(&[])).unwrap());
        assert!(!game.update(0.1, &mut held(&[Key::Escape, Key::W])).unwrap());
        assert_eq!(game.position(), Vec3::zero());
    }

    #[test]
    fn o_cycles_on_the_press_edge() {
        let (mut game, remote) = game();
        assert_eq!(game.mode(), OrientationMode::Head);

        // The very first frame has no previous input to compare against.
        game.update(0.01, &mut held(&[Key::O])).unwrap();
        assert_eq!(game.mode(), OrientationMode::Head);

        let mut modes = Vec::new();
        for _ in 0..3 {
            game.update(0.01, &mut held(&[])).unwrap();
            game.update(0.01, &mut held(&[Key::O])).unwrap();
            game.update(0.01, &mut held(&[Key::O])).unwrap();
            modes.push(game.mode());
            if game.mode() == OrientationMode::RightHand {
                let turned = OSVR_Quaternion::new(0.0, 0.0, 1.0, 0.0);
                remote.send(MockControlMsg::Report("/me/hands/right".into(), RawReport::orientation(turned))).unwrap();
                game.update(0.01, &mut held(&[Key::O])).unwrap();
                assert_eq!(game.head().orientation(), Quat::quaternion(0.0, 1.0, 0.0, 0.0));
            }
        }
        assert_eq!(
            modes,
            vec![OrientationMode::Mouselook, OrientationMode::RightHand, OrientationMode::Head]
        );
    }

    #[test]
    fn q_and_e_adjust_ipd() {
        let (mut game, _) = game();
        let start = game.head().ipd_in_meters();

        game.update(1.0, &mut held(&[Key::Q])).unwrap();
        assert!((game.head().ipd_in_meters() - (start + 0.01)).abs() < 1e-6);

        game.update(2.0, &mut held(&[Key::E])).unwrap();
        assert!((game.head().ipd_in_meters() - (start - 0.01)).abs() < 1e-6);

        game.update(100.0, &mut held(&[Key::E])).unwrap();
        assert_eq!(game.head().ipd_in_meters(), 0.0);
    }

    #[test]
    fn movement_follows_keyboard_yaw() {
        let (mut game, _) = game();
        game.update(0.5, &mut held(&[Key::W])).unwrap();
        assert_near(game.position(), Vec3::new(0.0, 0.0, -2.5));

        // Turning a quarter left makes forward point down -X.
        game.update(FRAC_PI_2 / MOVE_SPEED, &mut held(&[Key::Left, Key::W])).unwrap();
        assert_near(game.position(), Vec3::new(-FRAC_PI_2, 0.0, -2.5));
    }

    #[test]
    fn movement_follows_head_yaw() {
        let (mut game, remote) = game();
        let turned = math::yaw_pitch_roll(-FRAC_PI_2, 0.0, 0.0);
        let native = OSVR_Quaternion::new(turned.r as f64, turned.i as f64, turned.j as f64, turned.k as f64);
        remote.send(MockControlMsg::Report("/me/head".into(), RawReport::orientation(native))).unwrap();
        game.update(0.01, &mut held(&[])).unwrap();

        game.update(0.2, &mut held(&[Key::W])).unwrap();
        assert_near(game.position(), Vec3::new(1.0, 0.0, 0.0));

        game.update(0.2, &mut held(&[Key::D])).unwrap();
        assert_near(game.position(), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn draws_both_eyes() {
        let (mut game, _) = game();
        game.update(0.01, &mut held(&[])).unwrap();
        game.draw(&Viewport::new(0, 0, 1920, 1080)).unwrap();
        assert_eq!(game.frame.views, 2);
    }

    #[test]
    fn shutdown_disposes_the_kit() {
        let (mut game, _) = game();
        game.shutdown();
        assert!(game.kit.borrow().is_disposed());
        assert!(game.update(0.01, &mut held(&[])).is_err());
    }
}
