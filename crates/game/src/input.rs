//! Player input handling.
//!
//! This module turns raw key codes and mouse buttons into the per-frame
//! [`PlayerInput`], which in turn becomes the physics [`InputFrame`]. Codes
//! follow the browser `KeyboardEvent.code` naming (`KeyW`, `Space`, ...);
//! mouse buttons are `Mouse0`, `Mouse1`, ...

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyrun_physics::{Action, ActionSet, HeldKeys, InputFrame};

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// A held movement key (one of the [`HeldKeys`] bits).
    Move(u8),
    /// A discrete action fired on press.
    Action(Action),
}

/// Key bindings, by key code. Several codes may map to one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub back: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
    pub grapple: Vec<String>,
    pub barrel_roll: Vec<String>,
    pub front_flip: Vec<String>,
    pub back_flip: Vec<String>,
    pub spin: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let codes = |list: &[&str]| list.iter().map(|code| code.to_string()).collect();
        Self {
            forward: codes(&["KeyW"]),
            back: codes(&["KeyS"]),
            left: codes(&["KeyA"]),
            right: codes(&["KeyD"]),
            jump: codes(&["Space"]),
            grapple: codes(&["KeyE", "Mouse0"]),
            barrel_roll: codes(&["KeyQ"]),
            front_flip: codes(&["KeyZ"]),
            back_flip: codes(&["KeyX"]),
            spin: codes(&["KeyC"]),
        }
    }
}

impl KeyBindings {
    /// Find the control bound to `code`.
    pub fn lookup(&self, code: &str) -> Option<Control> {
        let table = [
            (&self.forward, Control::Move(HeldKeys::FORWARD)),
            (&self.back, Control::Move(HeldKeys::BACK)),
            (&self.left, Control::Move(HeldKeys::LEFT)),
            (&self.right, Control::Move(HeldKeys::RIGHT)),
            (&self.jump, Control::Action(Action::Jump)),
            (&self.grapple, Control::Action(Action::Grapple)),
            (&self.barrel_roll, Control::Action(Action::TrickA)),
            (&self.front_flip, Control::Action(Action::TrickB)),
            (&self.back_flip, Control::Action(Action::TrickC)),
            (&self.spin, Control::Action(Action::TrickD)),
        ];

        table
            .into_iter()
            .find(|(codes, _)| codes.iter().any(|bound| bound == code))
            .map(|(_, control)| control)
    }
}

/// Raw player input for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement keys held.
    pub held: HeldKeys,

    /// Actions fired since the previous frame.
    pub actions: ActionSet,

    /// Mouse delta this frame (pixels).
    pub mouse_delta: (f32, f32),
}

impl PlayerInput {
    /// Convert to a physics input frame looking along `look_direction`.
    pub fn to_frame(&self, look_direction: Vec3) -> InputFrame {
        InputFrame {
            held: self.held,
            actions: self.actions,
            look_direction,
        }
    }

    /// Check if any movement input is active.
    pub fn has_movement(&self) -> bool {
        self.held.0 != 0
    }
}

/// Tracks held keys and actions fired between frames.
///
/// Key-down events for action keys queue the action; it is delivered once
/// with the next [`InputState::take_input`] no matter how long the key stays
/// down. Auto-repeat presses of an already held key are ignored.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HeldKeys,
    pressed: Vec<String>,
    pending: ActionSet,
    mouse_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key or mouse button going down.
    pub fn key_down(&mut self, code: &str, bindings: &KeyBindings) {
        if self.pressed.iter().any(|held| held == code) {
            return;
        }
        self.pressed.push(code.to_string());

        match bindings.lookup(code) {
            Some(Control::Move(key)) => self.held.press(key),
            Some(Control::Action(action)) => self.pending.fire(action),
            None => log::trace!("unbound key {code}"),
        }
    }

    /// Handle a key or mouse button going up.
    pub fn key_up(&mut self, code: &str, bindings: &KeyBindings) {
        self.pressed.retain(|held| held != code);

        if let Some(Control::Move(key)) = bindings.lookup(code) {
            // Another code bound to the same direction may still be down
            let still_held = self
                .pressed
                .iter()
                .any(|other| bindings.lookup(other) == Some(Control::Move(key)));
            if !still_held {
                self.held.release(key);
            }
        }
    }

    /// Accumulate mouse movement (pixels).
    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Movement keys currently held.
    pub fn held(&self) -> HeldKeys {
        self.held
    }

    /// Build this frame's input and clear the per-frame accumulators.
    pub fn take_input(&mut self) -> PlayerInput {
        let input = PlayerInput {
            held: self.held,
            actions: self.pending,
            mouse_delta: self.mouse_delta,
        };
        self.pending = ActionSet::NONE;
        self.mouse_delta = (0.0, 0.0);
        input
    }
}
