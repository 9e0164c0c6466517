use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    O,
    Left,
    Right,
    Up,
    Down,
    Escape,
}

/// Keyboard and mouse state for one frame, standing in for the engine's input polling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    keys: HashSet<Key>,
    mouse: (i32, i32),
}

impl InputState {
    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        self.mouse
    }

    /// Warps the pointer, as `Mouse.SetPosition` would.
    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.mouse = (x, y);
    }
}

/// Replays a fixed input sequence so the sample runs without devices.
pub struct ScriptedInput {
    state: InputState,
}

impl ScriptedInput {
    pub fn new(mouse: (i32, i32)) -> ScriptedInput {
        let mut state = InputState::default();
        state.set_mouse_position(mouse.0, mouse.1);
        ScriptedInput { state }
    }

    /// Input for `frame`; the script presses Escape on `last_frame`.
    pub fn frame(&mut self, frame: u32, last_frame: u32) -> &mut InputState {
        let held = |from: u32, to: u32| frame >= from && frame < to;
        let script = [
            (Key::W, held(10, 70)),
            (Key::A, held(80, 110)),
            (Key::Left, held(120, 150)),
            (Key::Q, held(160, 200)),
            (Key::E, held(200, 220)),
            (Key::O, frame % 240 == 230),
            (Key::Up, held(250, 260)),
            (Key::Escape, frame >= last_frame),
        ];
        for (key, down) in script {
            if down {
                self.state.press(key);
            } else {
                self.state.release(key);
            }
        }

        // Drift the mouse right while in the middle of the run.
        if held(240, 300) {
            let (x, y) = self.state.mouse_position();
            self.state.set_mouse_position(x + 4, y + 1);
        }
        &mut self.state
    }
}
