//! Vertical sweep-and-snap collision resolution.
//!
//! Only the vertical axis is resolved. For every movement volume whose
//! footprint overlaps the player's, the resolver checks whether the player's
//! feet crossed the volume's top (landing) or the player's head crossed its
//! bottom (ceiling) between the previous and the tentative position, and
//! snaps the tentative Y to the crossed face.
//!
//! Volumes are visited in world order and each one is resolved on its own.
//! When several volumes overlap the player at once, later volumes see the
//! position already corrected by earlier ones; there is no global
//! minimum-penetration pass.

use glam::Vec3;

use super::trace::PlayerBounds;
use super::volume::VolumeRole;
use super::world::CollisionWorld;

/// Slack for face-crossing tests, so a player snapped onto a face last tick
/// still counts as starting on it despite float rounding.
const CONTACT_EPSILON: f32 = 1e-4;

/// Velocity response for landing on a `JumpBoost` volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostResponse {
    /// Factor applied to the reflected downward speed.
    pub reflect: f32,
    /// Minimum upward velocity after the boost.
    pub min_velocity: f32,
}

/// What the resolver found this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    /// Roles of the volumes landed on, in resolution order.
    pub landings: Vec<VolumeRole>,

    /// Number of ceilings hit.
    pub ceiling_hits: usize,
}

impl ContactReport {
    /// Whether the player ended up standing on something.
    #[inline]
    pub fn landed(&self) -> bool {
        !self.landings.is_empty()
    }

    /// Whether the player bumped a ceiling.
    #[inline]
    pub fn hit_ceiling(&self) -> bool {
        self.ceiling_hits > 0
    }
}

/// Resolve the tentative position against the world's movement volumes.
///
/// # Arguments
///
/// * `world` - Level geometry; only `Normal` and `JumpBoost` volumes are used
/// * `bounds` - Player cylinder, centered on the eye point
/// * `previous` - Eye position at the start of the tick
/// * `next` - Tentative eye position (corrected in place)
/// * `velocity` - Player velocity (vertical component corrected in place)
/// * `boost` - Response for `JumpBoost` landings
pub fn resolve_vertical(
    world: &CollisionWorld,
    bounds: PlayerBounds,
    previous: Vec3,
    next: &mut Vec3,
    velocity: &mut Vec3,
    boost: BoostResponse,
) -> ContactReport {
    let mut report = ContactReport::default();
    let half_height = bounds.half_height();

    for volume in world.movement_volumes() {
        if !volume.overlaps_footprint(*next, bounds.radius) {
            continue;
        }

        let top = volume.top();
        let bottom = volume.bottom();

        if bounds.bottom(previous) >= top - CONTACT_EPSILON && bounds.bottom(*next) < top {
            next.y = top + half_height;

            if volume.role.is_jump_boost() {
                velocity.y = (-velocity.y * boost.reflect).max(boost.min_velocity);
            } else {
                velocity.y = velocity.y.max(0.0);
            }

            report.landings.push(volume.role);
        } else if bounds.top(previous) <= bottom + CONTACT_EPSILON && bounds.top(*next) > bottom {
            next.y = bottom - half_height;
            velocity.y = velocity.y.min(0.0);
            report.ceiling_hits += 1;
        }
    }

    report
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BOOST: BoostResponse = BoostResponse {
        reflect: 1.2,
        min_velocity: 15.0,
    };

    fn slab(role: VolumeRole) -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::ZERO, Vec3::new(5.0, 0.5, 5.0), role);
        world
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let world = slab(VolumeRole::Normal);
        let bounds = PlayerBounds::RUNNER;

        let previous = Vec3::new(0.0, 2.0, 0.0);
        let mut next = Vec3::new(0.0, 1.2, 0.0);
        let mut velocity = Vec3::new(0.0, -8.0, 0.0);

        let report = resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);

        assert!(report.landed());
        assert!((next.y - 1.4).abs() < 1e-5);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_landing_keeps_upward_velocity() {
        let world = slab(VolumeRole::Normal);
        let bounds = PlayerBounds::RUNNER;

        // A crossing with upward velocity (e.g. grapple pull) snaps the
        // position but keeps the upward speed.
        let previous = Vec3::new(0.0, 2.0, 0.0);
        let mut next = Vec3::new(0.0, 1.3, 0.0);
        let mut velocity = Vec3::new(0.0, 3.0, 0.0);

        resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);
        assert_eq!(velocity.y, 3.0);
    }

    #[test]
    fn test_jump_boost_reflects() {
        let world = slab(VolumeRole::JumpBoost);
        let bounds = PlayerBounds::RUNNER;

        let previous = Vec3::new(0.0, 3.0, 0.0);
        let mut next = Vec3::new(0.0, 0.7, 0.0);
        let mut velocity = Vec3::new(0.0, -23.0, 0.0);

        let report = resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);

        assert_eq!(report.landings, vec![VolumeRole::JumpBoost]);
        assert!((velocity.y - 27.6).abs() < 1e-4);
    }

    #[test]
    fn test_jump_boost_minimum() {
        let world = slab(VolumeRole::JumpBoost);
        let bounds = PlayerBounds::RUNNER;

        let previous = Vec3::new(0.0, 1.5, 0.0);
        let mut next = Vec3::new(0.0, 1.3, 0.0);
        let mut velocity = Vec3::new(0.0, -2.0, 0.0);

        resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);
        assert_eq!(velocity.y, 15.0);
    }

    #[test]
    fn test_ceiling_snaps_below() {
        let world = slab(VolumeRole::Normal);
        let bounds = PlayerBounds::RUNNER;

        // Head at -0.6 moving up through the bottom face at -0.5
        let previous = Vec3::new(0.0, -1.5, 0.0);
        let mut next = Vec3::new(0.0, -1.2, 0.0);
        let mut velocity = Vec3::new(0.0, 3.0, 0.0);

        let report = resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);

        assert!(report.hit_ceiling());
        assert!(!report.landed());
        assert!((next.y + 1.4).abs() < 1e-5);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_no_footprint_overlap() {
        let world = slab(VolumeRole::Normal);
        let bounds = PlayerBounds::RUNNER;

        let previous = Vec3::new(6.0, 2.0, 0.0);
        let mut next = Vec3::new(6.0, 1.2, 0.0);
        let mut velocity = Vec3::new(0.0, -8.0, 0.0);

        let report = resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);
        assert!(!report.landed());
        assert_eq!(next.y, 1.2);
    }

    #[test]
    fn test_walls_and_buildings_are_ignored() {
        for role in [VolumeRole::Wall, VolumeRole::Building, VolumeRole::Decorative] {
            let world = slab(role);
            let bounds = PlayerBounds::RUNNER;

            let previous = Vec3::new(0.0, 2.0, 0.0);
            let mut next = Vec3::new(0.0, 1.2, 0.0);
            let mut velocity = Vec3::new(0.0, -8.0, 0.0);

            let report = resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);
            assert!(!report.landed(), "{role:?} should not be landed on");
        }
    }

    #[test]
    fn test_order_dependent_stacking() {
        // Two overlapping slabs: the first landing snaps the player onto the
        // lower slab, and the second slab is then evaluated against the
        // corrected position.
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 0.5, 5.0), VolumeRole::Normal);
        world.add_box(Vec3::new(0.0, 0.3, 0.0), Vec3::new(5.0, 0.5, 5.0), VolumeRole::Normal);

        let bounds = PlayerBounds::RUNNER;
        let previous = Vec3::new(0.0, 2.0, 0.0);
        let mut next = Vec3::new(0.0, 1.0, 0.0);
        let mut velocity = Vec3::new(0.0, -10.0, 0.0);

        let report = resolve_vertical(&world, bounds, previous, &mut next, &mut velocity, BOOST);

        assert_eq!(report.landings.len(), 2);
        assert!((next.y - 1.7).abs() < 1e-5);
    }
}
