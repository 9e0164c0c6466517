use rust_osvr::math::{self, Quat, Vec3};
use rust_osvr::{ClientError, InterfaceSignal, ListenerId, Listeners, PoseReport, Viewport};
use std::f32::consts::FRAC_PI_2;

use crate::input::InputState;

const ROTATION_SPEED: f32 = 0.5;

/// Head orientation from mouse movement, re-centring the pointer every update.
pub struct MouselookSignal {
    center: (i32, i32),
    first_update: bool,
    rotation_x: f32,
    rotation_y: f32,
    value: Quat,
    listeners: Listeners<Quat>,
}

impl MouselookSignal {
    pub fn new(viewport: &Viewport) -> MouselookSignal {
        MouselookSignal {
            center: (viewport.width / 2, viewport.height / 2),
            first_update: true,
            rotation_x: 0.0,
            rotation_y: 0.0,
            value: Quat::identity(),
            listeners: Listeners::new(),
        }
    }

    pub fn update(&mut self, dt: f32, input: &mut InputState) {
        let (cx, cy) = self.center;
        if self.first_update {
            self.first_update = false;
            input.set_mouse_position(cx, cy);
        } else {
            let (x, y) = input.mouse_position();
            if (x, y) != (cx, cy) {
                self.rotation_y -= (x - cx) as f32 * ROTATION_SPEED * dt;
                self.rotation_x -= (y - cy) as f32 * ROTATION_SPEED * dt;
                self.rotation_x = self.rotation_x.max(-FRAC_PI_2).min(FRAC_PI_2);
                input.set_mouse_position(cx, cy);
            }
        }

        let value = math::yaw_pitch_roll(self.rotation_y, self.rotation_x, 0.0);
        if value != self.value {
            self.value = value;
            self.listeners.emit("mouselook", &value);
        }
    }

    pub fn pose(&self) -> PoseReport {
        PoseReport::new(Vec3::zero(), self.value)
    }
}

impl InterfaceSignal<Quat> for MouselookSignal {
    fn path(&self) -> Option<&str> {
        None
    }

    fn start(&mut self) -> Result<(), ClientError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn value(&self) -> Quat {
        self.value
    }

    fn add_listener(&mut self, mut listener: Box<dyn FnMut(&Quat)>) -> ListenerId {
        self.listeners.add(move |_: &str, q: &Quat| listener(q))
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
