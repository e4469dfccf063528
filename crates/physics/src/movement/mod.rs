//! Player movement: locomotion state, integration, wall-running, the
//! grappling hook and the per-tick controller that ties them together.

mod config;
mod controller;
mod cooldown;
mod grapple;
mod integrate;
mod state;
mod wallrun;

pub use config::MovementConfig;
pub use controller::{ParkourController, TickOutcome};
pub use cooldown::{CooldownKind, Cooldowns};
pub use grapple::GrappleLink;
pub use integrate::{accelerate, apply_friction, apply_gravity, clamp_horizontal_speed, move_direction};
pub use state::{Action, ActionSet, HeldKeys, InputFrame, Locomotion, PlayerState, WallSide};
pub use wallrun::{nearest_wall_face, qualifies, sustain, wall_side, WallContact};
