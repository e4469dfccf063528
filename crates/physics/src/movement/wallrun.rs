//! Wall-running: attachment detection, sustain and wall-jumps.
//!
//! Only `Wall` volumes are considered. Each wall box exposes four vertical
//! faces (±X, ±Z). The closest face the player is standing off, within the
//! detection distance and overlapping the player vertically, is the
//! candidate; the player attaches to it when moving fast enough and roughly
//! parallel to it.

use std::time::Instant;

use glam::Vec3;

use crate::collision::{CollisionWorld, PlayerBounds, Volume};
use crate::tricks::{TrickFeed, TrickKind};

use super::config::MovementConfig;
use super::cooldown::CooldownKind;
use super::state::{horizontal, InputFrame, Locomotion, PlayerState, WallSide};

/// A wall face near the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    /// Outward face normal (horizontal, unit length).
    pub normal: Vec3,
    /// Distance from the face plane to the player's eye point.
    pub distance: f32,
}

/// Find the closest wall face the player could run along.
///
/// Ignores speed and approach angle; see [`qualifies`].
pub fn nearest_wall_face(
    world: &CollisionWorld,
    bounds: PlayerBounds,
    position: Vec3,
    detect_distance: f32,
) -> Option<WallContact> {
    let mut best: Option<WallContact> = None;

    for volume in world.wall_volumes() {
        if !volume.overlaps_vertically(bounds.bottom(position), bounds.top(position)) {
            continue;
        }

        for contact in face_contacts(volume, position, bounds.radius) {
            if contact.distance < detect_distance
                && best.map_or(true, |b| contact.distance < b.distance)
            {
                best = Some(contact);
            }
        }
    }

    best
}

/// Faces of `volume` the player is in front of, with signed distances.
///
/// A face counts when the player's footprint lies within the face's
/// horizontal extent and the eye point is no more than `radius` behind the
/// face plane.
fn face_contacts(volume: &Volume, position: Vec3, radius: f32) -> impl Iterator<Item = WallContact> {
    let min = volume.min();
    let max = volume.max();

    let within_x = position.x > min.x - radius && position.x < max.x + radius;
    let within_z = position.z > min.z - radius && position.z < max.z + radius;

    let faces = [
        (Vec3::X, position.x - max.x, within_z),
        (Vec3::NEG_X, min.x - position.x, within_z),
        (Vec3::Z, position.z - max.z, within_x),
        (Vec3::NEG_Z, min.z - position.z, within_x),
    ];

    faces
        .into_iter()
        .filter(move |(_, distance, within)| *within && *distance > -radius)
        .map(|(normal, distance, _)| WallContact { normal, distance })
}

/// Whether the player's horizontal velocity is fast enough and close enough
/// to parallel with the face to run along it.
pub fn qualifies(velocity: Vec3, normal: Vec3, config: &MovementConfig) -> bool {
    let flat = horizontal(velocity);
    let speed = flat.length();
    if speed <= config.wall_min_speed {
        return false;
    }
    (flat / speed).dot(normal).abs() < config.wall_max_approach_dot
}

/// Which side of the player the wall is on, from `(forward × normal).y`.
///
/// Falls back to the velocity heading when looking straight along the
/// normal.
pub fn wall_side(forward: Vec3, velocity: Vec3, normal: Vec3) -> WallSide {
    const EPSILON: f32 = 1e-4;

    let mut cross = forward.cross(normal).y;
    if cross.abs() < EPSILON {
        cross = horizontal(velocity).normalize_or_zero().cross(normal).y;
    }

    if cross > EPSILON {
        WallSide::Right
    } else if cross < -EPSILON {
        WallSide::Left
    } else {
        WallSide::None
    }
}

/// Attach, sustain or detach the wall-run for this tick.
///
/// Must only be called while airborne or already wall-attached.
pub(crate) fn update(
    state: &mut PlayerState,
    frame: &InputFrame,
    world: &CollisionWorld,
    config: &MovementConfig,
    delta: f32,
    now: Instant,
    feed: &mut TrickFeed,
) {
    let previous = match state.mode {
        Locomotion::WallAttached { attached_for, .. } => Some(attached_for),
        Locomotion::Airborne => None,
        _ => return,
    };

    let reattach_ready = state
        .cooldowns
        .ready(CooldownKind::WallReattach, now, config.jump_cooldown());

    let contact = nearest_wall_face(world, config.bounds(), state.position, config.wall_detect_distance)
        .filter(|contact| reattach_ready && qualifies(state.velocity, contact.normal, config));

    let Some(contact) = contact else {
        if previous.is_some() {
            log::debug!("wallrun detached at {:?}", state.position);
            state.mode = Locomotion::Airborne;
        }
        return;
    };

    let attached_for = match previous {
        Some(attached_for) => attached_for,
        None => {
            log::debug!(
                "wallrun attached: normal={:?} distance={:.2}",
                contact.normal,
                contact.distance
            );
            feed.emit(TrickKind::Wallrun);
            0.0
        }
    };

    let side = wall_side(frame.forward(), state.velocity, contact.normal);
    sustain(&mut state.velocity, contact.normal, attached_for, config, delta);

    state.mode = Locomotion::WallAttached {
        side,
        normal: contact.normal,
        attached_for: attached_for + delta,
    };
}

/// Steer the velocity along the wall for one tick.
///
/// Horizontal velocity blends toward the wall tangent at a target speed, a
/// small push keeps the player off the wall, and the vertical velocity is
/// held afloat for the float window before it is allowed to sink.
pub fn sustain(
    velocity: &mut Vec3,
    normal: Vec3,
    attached_for: f32,
    config: &MovementConfig,
    delta: f32,
) {
    let flat = horizontal(*velocity);
    let speed = flat.length();

    let mut tangent = normal.cross(Vec3::Y).normalize_or_zero();
    if tangent.dot(flat) < 0.0 {
        tangent = -tangent;
    }

    let target_speed = (speed * config.wall_speed_retention).max(config.wall_target_speed);
    let blend = (delta * config.wall_blend_rate).min(1.0);
    let steered = flat.lerp(tangent * target_speed, blend) + normal * config.wall_push * delta * config.wall_push_rate;

    velocity.x = steered.x;
    velocity.z = steered.z;

    if attached_for < config.wall_float_time {
        velocity.y = velocity.y.max(config.wall_float_floor) + config.wall_lift * delta;
    } else {
        velocity.y = velocity.y.max(config.wall_sink_floor);
    }

    log::trace!(
        "wallrun sustain: attached_for={:.2} velocity={:?}",
        attached_for,
        velocity
    );
}

/// Jump off the wall. Does nothing unless wall-attached.
///
/// The caller has already consumed the jump cooldown.
pub(crate) fn wall_jump(
    state: &mut PlayerState,
    frame: &InputFrame,
    config: &MovementConfig,
    now: Instant,
    feed: &mut TrickFeed,
) {
    let Locomotion::WallAttached { side, normal, .. } = state.mode else {
        return;
    };

    let lateral = frame.right() * -side.sign();
    let push = if lateral == Vec3::ZERO { normal } else { lateral };

    state.velocity.y = config.wall_jump_velocity;
    state.velocity += push * config.wall_jump_push;
    state.mode = Locomotion::Airborne;
    state.cooldowns.mark(CooldownKind::WallReattach, now);

    log::debug!("wall jump off {:?} side", side);
    feed.emit(TrickKind::WallJump);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::collision::VolumeRole;

    /// A long wall along X whose -Z face sits at z=2.5.
    fn wall_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(0.0, 5.0, 3.0), Vec3::new(10.0, 5.0, 0.5), VolumeRole::Wall);
        world
    }

    fn airborne(position: Vec3, velocity: Vec3) -> PlayerState {
        let mut state = PlayerState::new(position);
        state.velocity = velocity;
        state
    }

    #[test]
    fn test_nearest_face() {
        let world = wall_world();
        let contact =
            nearest_wall_face(&world, PlayerBounds::RUNNER, Vec3::new(0.0, 3.0, 1.0), 2.0).unwrap();
        assert_eq!(contact.normal, Vec3::NEG_Z);
        assert!((contact.distance - 1.5).abs() < 1e-5);

        // Too far away
        assert!(nearest_wall_face(&world, PlayerBounds::RUNNER, Vec3::new(0.0, 3.0, -1.0), 2.0).is_none());

        // Past the end of the wall
        assert!(nearest_wall_face(&world, PlayerBounds::RUNNER, Vec3::new(12.0, 3.0, 1.0), 2.0).is_none());

        // Above the wall
        assert!(nearest_wall_face(&world, PlayerBounds::RUNNER, Vec3::new(0.0, 12.0, 1.0), 2.0).is_none());
    }

    #[test]
    fn test_other_roles_are_not_walls() {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(0.0, 5.0, 3.0), Vec3::new(10.0, 5.0, 0.5), VolumeRole::Building);
        assert!(nearest_wall_face(&world, PlayerBounds::RUNNER, Vec3::new(0.0, 3.0, 1.0), 2.0).is_none());
    }

    #[test]
    fn test_qualifies() {
        let config = MovementConfig::default();
        // Parallel
        assert!(qualifies(Vec3::new(20.0, 0.0, 0.0), Vec3::NEG_Z, &config));
        // Head-on
        assert!(!qualifies(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z, &config));
        // Too slow
        assert!(!qualifies(Vec3::new(4.0, -10.0, 0.0), Vec3::NEG_Z, &config));
    }

    #[test]
    fn test_wall_side() {
        // Looking +X with the wall at +Z: wall is on the right
        assert_eq!(wall_side(Vec3::X, Vec3::ZERO, Vec3::NEG_Z), WallSide::Right);
        assert_eq!(wall_side(Vec3::NEG_X, Vec3::ZERO, Vec3::NEG_Z), WallSide::Left);
        // Looking into the wall: use the velocity heading
        assert_eq!(
            wall_side(Vec3::Z, Vec3::new(-10.0, 0.0, 0.0), Vec3::NEG_Z),
            WallSide::Left
        );
    }

    #[test]
    fn test_attach_emits_wallrun_once() {
        let world = wall_world();
        let config = MovementConfig::default();
        let now = Instant::now();
        let frame = InputFrame::looking(Vec3::X);

        let mut state = airborne(Vec3::new(0.0, 3.0, 1.0), Vec3::new(20.0, 0.0, 0.0));

        let mut feed = TrickFeed::new(now);
        update(&mut state, &frame, &world, &config, 0.016, now, &mut feed);
        assert_eq!(state.wall_side(), WallSide::Right);
        let events = feed.into_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, TrickKind::Wallrun);
        assert_eq!(events[0].points, 75);

        let mut feed = TrickFeed::new(now);
        update(&mut state, &frame, &world, &config, 0.016, now, &mut feed);
        assert!(state.wall_attached());
        assert!(feed.into_events().is_empty());

        match state.mode {
            Locomotion::WallAttached { attached_for, .. } => {
                assert!((attached_for - 0.032).abs() < 1e-5)
            }
            other => panic!("expected wall-attached, got {other:?}"),
        }
    }

    #[test]
    fn test_head_on_does_not_attach() {
        let world = wall_world();
        let config = MovementConfig::default();
        let now = Instant::now();
        let mut feed = TrickFeed::new(now);

        let mut state = airborne(Vec3::new(0.0, 3.0, 1.0), Vec3::new(0.0, 0.0, 20.0));
        update(&mut state, &InputFrame::looking(Vec3::Z), &world, &config, 0.016, now, &mut feed);

        assert!(!state.wall_attached());
        assert!(feed.into_events().is_empty());
    }

    #[test]
    fn test_detach_when_wall_ends() {
        let world = wall_world();
        let config = MovementConfig::default();
        let now = Instant::now();
        let mut feed = TrickFeed::new(now);

        let mut state = airborne(Vec3::new(15.0, 3.0, 1.0), Vec3::new(20.0, 0.0, 0.0));
        state.mode = Locomotion::WallAttached {
            side: WallSide::Right,
            normal: Vec3::NEG_Z,
            attached_for: 0.5,
        };

        update(&mut state, &InputFrame::looking(Vec3::X), &world, &config, 0.016, now, &mut feed);
        assert_eq!(state.mode, Locomotion::Airborne);
    }

    #[test]
    fn test_sustain_floats_then_sinks() {
        let config = MovementConfig::default();

        let mut floating = Vec3::new(20.0, -5.0, 0.0);
        sustain(&mut floating, Vec3::NEG_Z, 1.0, &config, 0.1);
        assert!((floating.y - 0.2).abs() < 1e-5);

        let mut sinking = Vec3::new(20.0, -5.0, 0.0);
        sustain(&mut sinking, Vec3::NEG_Z, 3.0, &config, 0.1);
        assert_eq!(sinking.y, -3.0);
    }

    #[test]
    fn test_sustain_steers_along_tangent() {
        let config = MovementConfig::default();
        let mut velocity = Vec3::new(20.0, 0.0, 0.0);
        sustain(&mut velocity, Vec3::NEG_Z, 0.0, &config, 0.1);

        // Blend 0.8 toward 19 along +X, push 0.5 away from the wall (-Z)
        assert!((velocity.x - 19.2).abs() < 1e-4);
        assert!((velocity.z + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_wall_jump() {
        let config = MovementConfig::default();
        let now = Instant::now();
        let mut feed = TrickFeed::new(now);

        let mut state = airborne(Vec3::new(0.0, 3.0, 1.0), Vec3::new(20.0, 0.0, 0.0));
        state.mode = Locomotion::WallAttached {
            side: WallSide::Right,
            normal: Vec3::NEG_Z,
            attached_for: 0.5,
        };

        wall_jump(&mut state, &InputFrame::looking(Vec3::X), &config, now, &mut feed);
        assert_eq!(state.mode, Locomotion::Airborne);
        assert_eq!(state.velocity.y, 14.0);
        // Pushed left, away from the wall on the right
        assert!((state.velocity.z + 15.0).abs() < 1e-5);

        let events = feed.into_events();
        assert_eq!(events[0].kind, TrickKind::WallJump);
        assert_eq!(events[0].points, 100);
    }

    #[test]
    fn test_no_reattach_right_after_wall_jump() {
        let world = wall_world();
        let config = MovementConfig::default();
        let t0 = Instant::now();
        let frame = InputFrame::looking(Vec3::X);

        let mut state = airborne(Vec3::new(0.0, 3.0, 1.0), Vec3::new(20.0, 0.0, 0.0));
        state.cooldowns.mark(CooldownKind::WallReattach, t0);

        let mut feed = TrickFeed::new(t0);
        update(&mut state, &frame, &world, &config, 0.016, t0 + Duration::from_millis(100), &mut feed);
        assert!(!state.wall_attached());

        update(&mut state, &frame, &world, &config, 0.016, t0 + Duration::from_millis(300), &mut feed);
        assert!(state.wall_attached());
    }
}
