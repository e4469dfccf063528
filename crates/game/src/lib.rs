//! Skyrun Game Logic
//!
//! This crate wraps the movement kernel in a playable session:
//!
//! - Key bindings and input handling
//! - View angles that produce the look direction
//! - Level loading and the built-in course
//! - Trick score board and speedometer
//! - Session configuration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Game Simulation                        │
//! │  ┌─────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ Input   │───►│ Physics  │───►│ Session state          │  │
//! │  │ + view  │    │ (parkour │    │ (score board,          │  │
//! │  └─────────┘    │ kernel)  │    │  speedometer, player)  │  │
//! │                 └──────────┘    └────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod input;
pub mod level;
pub mod player;
pub mod score;
pub mod simulation;
pub mod view;

// Re-export main types
pub use config::{ConfigError, SessionConfig};
pub use input::{Control, InputState, KeyBindings, PlayerInput};
pub use level::{Level, LevelError};
pub use player::Player;
pub use score::{ScoreBoard, Speedometer};
pub use simulation::Simulation;
pub use view::ViewAngles;

// Re-export physics types for convenience
pub use skyrun_physics::{
    Action, ActionSet, CollisionWorld, HeldKeys, InputFrame, Locomotion, MovementConfig,
    ParkourController, PlayerState, TickOutcome, TrickEvent, TrickKind, Volume, VolumeRole,
};
