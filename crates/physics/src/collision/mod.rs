//! Static level geometry and collision queries.
//!
//! The level is a list of axis-aligned boxes. Each box carries a
//! [`VolumeRole`] that decides which queries see it:
//!
//! - [`CollisionWorld::raycast`]: grapple anchor selection, every volume
//! - [`resolve_vertical`]: floor and ceiling contacts, `Normal` and
//!   `JumpBoost` only
//! - [`CollisionWorld::wall_volumes`]: wall-run candidates, `Wall` only
//!
//! # Key Types
//!
//! - [`Volume`]: one box with its role
//! - [`CollisionWorld`]: the immutable volume list plus ray-cast shapes
//! - [`PlayerBounds`]: the vertical cylinder standing in for the player
//! - [`ContactReport`]: what the resolver found this tick

mod resolve;
mod trace;
mod volume;
mod world;

pub use resolve::{resolve_vertical, BoostResponse, ContactReport};
pub use trace::{PlayerBounds, RayHit};
pub use volume::{Volume, VolumeRole};
pub use world::CollisionWorld;
