//! Skyrun Physics
//!
//! A frame-synchronous first-person movement kernel for parkour traversal.
//! One player moves through a static list of axis-aligned volumes under
//! gravity, player input, a grappling hook and wall-running, and the kernel
//! reports scored trick events as they happen.
//!
//! # Architecture
//!
//! The kernel is split into three systems:
//!
//! - **Collision**: the immutable volume list, grapple ray casts and the
//!   vertical sweep-and-snap resolver
//! - **Movement**: the per-tick controller, integrator, wall-attachment
//!   detector and grapple constraint
//! - **Tricks**: named, scored events produced by actions and landings
//!
//! # Per-tick flow
//!
//! ```text
//! actions ─► integrator ─► grapple pull ─► wallrun ─► gravity/friction/cap
//!                                                          │
//!            events ◄── collision resolver ◄── tentative position
//! ```
//!
//! Nothing here performs I/O or returns errors. Numeric edge cases such as
//! zero-length directions or falling out of the world are handled by policy.

pub mod collision;
pub mod movement;
pub mod tricks;

// Re-export commonly used types
pub use collision::{CollisionWorld, PlayerBounds, RayHit, Volume, VolumeRole};
pub use movement::{
    Action, ActionSet, CooldownKind, Cooldowns, GrappleLink, HeldKeys, InputFrame, Locomotion,
    MovementConfig, ParkourController, PlayerState, TickOutcome, WallSide,
};
pub use tricks::{TrickEvent, TrickKind};
