//! Grappling hook: anchor selection and the per-tick pull.
//!
//! Firing the hook casts a ray from the eye along the look direction against
//! every volume. The nearest hit within range becomes the anchor. While
//! attached, every tick adds a constant-magnitude pull toward the anchor
//! until the player gets close enough, lands, or falls out of the world.

use std::time::Instant;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionWorld;
use crate::tricks::{TrickFeed, TrickKind};

use super::config::MovementConfig;
use super::cooldown::CooldownKind;
use super::state::{InputFrame, Locomotion, PlayerState};

/// The visible grapple line for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrappleLink {
    /// Player eye position.
    pub from: Vec3,
    /// Anchor point.
    pub to: Vec3,
}

/// Fire the grapple. Returns whether it attached.
///
/// The attempt consumes the grapple cooldown whether or not the ray hits.
/// Attempts inside the cooldown are ignored entirely.
pub(crate) fn fire(
    state: &mut PlayerState,
    frame: &InputFrame,
    world: &CollisionWorld,
    config: &MovementConfig,
    now: Instant,
    feed: &mut TrickFeed,
) -> bool {
    if !state
        .cooldowns
        .try_fire(CooldownKind::Grapple, now, config.grapple_cooldown())
    {
        return false;
    }

    let Some(hit) = world.raycast(state.position, frame.look_direction, config.grapple_range) else {
        log::trace!("grapple missed from {:?}", state.position);
        return false;
    };

    log::debug!(
        "grapple attached: anchor={:?} distance={:.1} role={:?}",
        hit.point,
        hit.distance,
        hit.role
    );

    state.mode = Locomotion::Grappling { anchor: hit.point };

    if state.air_time > config.grapple_master_air_time {
        feed.emit(TrickKind::GrappleMaster);
    }

    true
}

/// Apply the grapple pull for this tick, or release when the anchor is
/// reached. Keeps [`PlayerState::grapple_link`] in sync with the mode.
pub(crate) fn pull(state: &mut PlayerState, config: &MovementConfig, delta: f32) {
    let Locomotion::Grappling { anchor } = state.mode else {
        state.grapple_link = None;
        return;
    };

    let to_anchor = anchor - state.position;
    let distance = to_anchor.length();

    if distance > config.grapple_release_distance {
        state.velocity += to_anchor / distance * config.grapple_pull * delta;
        state.grapple_link = Some(GrappleLink {
            from: state.position,
            to: anchor,
        });
    } else {
        log::debug!("grapple released at anchor {:?}", anchor);
        release(state);
    }
}

/// Drop the grapple, falling back to free fall.
pub(crate) fn release(state: &mut PlayerState) {
    if state.grappling() {
        state.mode = Locomotion::Airborne;
    }
    state.grapple_link = None;
}

// ============================================================================
// Tests
// ============================================================================
