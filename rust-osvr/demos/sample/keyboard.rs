use rust_osvr::math::{self, Quat};
use rust_osvr::{ClientError, InterfaceSignal, ListenerId, Listeners};

use crate::input::{InputState, Key};

const ROTATION_SPEED: f32 = 0.05;

/// Key bindings turning a `KeySteeredSignal`: (yaw +, yaw -, pitch -, pitch +).
type Bindings = (Key, Key, Key, Key);

/// Orientation steered by four keys, a fixed step per update.
pub struct KeySteeredSignal {
    bindings: Bindings,
    yaw: f32,
    pitch: f32,
    listeners: Listeners<Quat>,
}

/// Arrow keys.
pub type KeyboardOrientationSignal = KeySteeredSignal;
/// W/A/S/D.
pub type WasdOrientationSignal = KeySteeredSignal;

impl KeySteeredSignal {
    pub fn arrows() -> KeyboardOrientationSignal {
        KeySteeredSignal::with_bindings((Key::Left, Key::Right, Key::Up, Key::Down))
    }

    pub fn wasd() -> WasdOrientationSignal {
        KeySteeredSignal::with_bindings((Key::D, Key::A, Key::W, Key::S))
    }

    fn with_bindings(bindings: Bindings) -> KeySteeredSignal {
        KeySteeredSignal {
            bindings,
            yaw: 0.0,
            pitch: 0.0,
            listeners: Listeners::new(),
        }
    }

    pub fn update(&mut self, input: &InputState) {
        let (yaw_left, yaw_right, pitch_up, pitch_down) = self.bindings;
        let before = (self.yaw, self.pitch);
        if input.is_down(yaw_left) {
            self.yaw += ROTATION_SPEED;
        }
        if input.is_down(yaw_right) {
            self.yaw -= ROTATION_SPEED;
        }
        if input.is_down(pitch_up) {
            self.pitch -= ROTATION_SPEED;
        }
        if input.is_down(pitch_down) {
            self.pitch += ROTATION_SPEED;
        }
        if before != (self.yaw, self.pitch) {
            let value = self.value();
            self.listeners.emit("keyboard", &value);
        }
    }
}

impl InterfaceSignal<Quat> for KeySteeredSignal {
    fn path(&self) -> Option<&str> {
        None
    }

    fn start(&mut self) -> Result<(), ClientError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn value(&self) -> Quat {
        math::yaw_pitch_roll(self.yaw, self.pitch, 0.0)
    }

    fn add_listener(&mut self, mut listener: Box<dyn FnMut(&Quat)>) -> ListenerId {
        self.listeners.add(move |_: &str, q: &Quat| listener(q))
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn arrows_step_per_update() {
        let mut signal = KeySteeredSignal::arrows();
        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        signal.add_listener(Box::new(move |_: &Quat| counter.set(counter.get() + 1)));

        let mut input = InputState::default();
        input.press(Key::Left);
        signal.update(&input);
        signal.update(&input);
        assert!((signal.yaw - 0.1).abs() < 1e-6);

        input.release(Key::Left);
        signal.update(&input);
        assert_eq!(changes.get(), 2);
    }

    #[test]
    fn wasd_ignores_arrows() {
        let mut signal = KeySteeredSignal::wasd();
        let mut input = InputState::default();
        input.press(Key::Up);
        signal.update(&input);
        assert_eq!(signal.value(), Quat::identity());
        input.press(Key::S);
        signal.update(&input);
        assert!((signal.pitch - 0.05).abs() < 1e-6);
    }

    #[test]
    fn wasd_turns_the_way_the_keys_point() {
        let mut signal = KeySteeredSignal::wasd();
        let mut input = InputState::default();
        input.press(Key::A);
        signal.update(&input);
        assert!((signal.yaw + 0.05).abs() < 1e-6);

        input.release(Key::A);
        input.press(Key::D);
        signal.update(&input);
        signal.update(&input);
        assert!((signal.yaw - 0.05).abs() < 1e-6);
    }
}
