//! The runner: movement state plus the view that steers it.

use glam::Vec3;
use skyrun_physics::{Locomotion, PlayerState};

use crate::view::ViewAngles;

/// The player in a session.
#[derive(Debug, Clone)]
pub struct Player {
    /// Display name.
    pub name: String,

    /// Movement physics state.
    pub movement: PlayerState,

    /// Camera angles.
    pub view: ViewAngles,

    /// Number of times the player fell out of the world.
    pub falls: u32,
}

impl Player {
    /// Create a new player at the given eye position.
    pub fn new(name: String, position: Vec3) -> Self {
        Self {
            name,
            movement: PlayerState::new(position),
            view: ViewAngles::default(),
            falls: 0,
        }
    }

    /// Get the player's eye position.
    pub fn position(&self) -> Vec3 {
        self.movement.position
    }

    /// Current locomotion mode.
    pub fn mode(&self) -> Locomotion {
        self.movement.mode
    }

    /// Unit look direction.
    pub fn look_direction(&self) -> Vec3 {
        self.view.look_direction()
    }

    /// Get horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        self.movement.horizontal_speed()
    }
}
