use std::collections::HashMap;

use game_loop::winit::event::{ElementState, VirtualKeyCode};

pub type KeyCode = VirtualKeyCode;

/// Discrete actions screens can ask about, independent of the key bound to them.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Action {
    Pause,
    Confirm,
}

/// Anything that can report whether an action is asserted during the current update.
pub trait Actions {
    fn is_asserted(&self, action: Action) -> bool;
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
struct KeyState {
    /// Went down at least once since the previous capture
    tapped: bool,
    current: ElementState,
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            tapped: false,
            current: ElementState::Released,
        }
    }
}

#[derive(Default)]
pub struct KeyboardInput {
    state: HashMap<KeyCode, KeyState>,
}

impl KeyboardInput {
    /// True for the one update in which `key` went down, even if it was let go again.
    pub fn pressed(&self, key: KeyCode) -> bool {
        self.state.get(&key).map_or(false, |state| state.tapped)
    }

    pub fn held(&self, key: KeyCode) -> bool {
        self.state
            .get(&key)
            .map_or(false, |state| state.current == ElementState::Pressed)
    }

    /// Folds the keyboard events received since the last update into the key table.
    /// `keys` is drained.
    pub(crate) fn capture_keys(&mut self, keys: &mut Vec<game_loop::winit::event::KeyboardInput>) {
        for state in self.state.values_mut() {
            state.tapped = false;
        }

        for key in keys.drain(..) {
            let Some(code) = key.virtual_keycode else {
                continue;
            };
            let state = self.state.entry(code).or_default();
            // key repeat fires pressed again while held
            if state.current == key.state {
                continue;
            }
            state.current = key.state;
            state.tapped |= key.state == ElementState::Pressed;
        }
    }
}

/// Per-update snapshot of what the players are asking for.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Controls {
    /// -1 up, 1 down
    pub left: f32,
    pub right: f32,
    pub pause: bool,
    pub confirm: bool,
}

impl Controls {
    pub fn from_keyboard(keys: &KeyboardInput) -> Self {
        let axis = |up: KeyCode, down: KeyCode| keys.held(down) as i8 - keys.held(up) as i8;

        Self {
            left: axis(KeyCode::W, KeyCode::S) as f32,
            right: axis(KeyCode::Up, KeyCode::Down) as f32,
            pause: keys.pressed(KeyCode::P),
            confirm: keys.pressed(KeyCode::Space) || keys.pressed(KeyCode::Return),
        }
    }
}

impl Actions for Controls {
    fn is_asserted(&self, action: Action) -> bool {
        match action {
            Action::Pause => self.pause,
            Action::Confirm => self.confirm,
        }
    }
}
