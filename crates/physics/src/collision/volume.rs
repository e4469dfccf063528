//! Axis-aligned level volumes and their gameplay roles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What a volume is for.
///
/// The role filters which collision queries see the volume. Roles are fixed
/// for the lifetime of a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeRole {
    /// Plain platform: stand on it, bump your head on it.
    #[default]
    Normal,

    /// Platform that reflects a landing upward and scores a trick.
    JumpBoost,

    /// Wall-run surface. Ignored by floor and ceiling resolution.
    Wall,

    /// Building shell. Visible and grapple-able, never collided with.
    Building,

    /// Scenery only. Visible and grapple-able, never collided with.
    Decorative,
}

impl VolumeRole {
    /// Whether the vertical resolver treats this volume as floor/ceiling.
    #[inline]
    pub fn blocks_movement(self) -> bool {
        matches!(self, Self::Normal | Self::JumpBoost)
    }

    /// Whether the wall-attachment detector scans this volume.
    #[inline]
    pub fn supports_wallrun(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Whether landing on this volume triggers the jump boost.
    #[inline]
    pub fn is_jump_boost(self) -> bool {
        matches!(self, Self::JumpBoost)
    }
}

/// A static axis-aligned box in the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Center of the box in world space.
    pub center: Vec3,

    /// Half-size along each axis. Never negative.
    pub half_extents: Vec3,

    /// Gameplay role.
    #[serde(default)]
    pub role: VolumeRole,
}

impl Volume {
    /// Create a volume. Negative half extents are clamped to zero.
    pub fn new(center: Vec3, half_extents: Vec3, role: VolumeRole) -> Self {
        Self {
            center,
            half_extents: half_extents.max(Vec3::ZERO),
            role,
        }
    }

    /// Create a volume from a full size instead of half extents.
    pub fn from_size(center: Vec3, size: Vec3, role: VolumeRole) -> Self {
        Self::new(center, size * 0.5, role)
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Y of the top face.
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Y of the bottom face.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    /// Strict X/Z overlap between this box and a square footprint of
    /// half-width `radius` centered on `position`.
    pub fn overlaps_footprint(&self, position: Vec3, radius: f32) -> bool {
        let min = self.min();
        let max = self.max();
        position.x + radius > min.x
            && position.x - radius < max.x
            && position.z + radius > min.z
            && position.z - radius < max.z
    }

    /// Whether the vertical span `[bottom, top]` overlaps this box's span.
    pub fn overlaps_vertically(&self, bottom: f32, top: f32) -> bool {
        bottom < self.top() && top > self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_filters() {
        assert!(VolumeRole::Normal.blocks_movement());
        assert!(VolumeRole::JumpBoost.blocks_movement());
        assert!(!VolumeRole::Wall.blocks_movement());
        assert!(!VolumeRole::Building.blocks_movement());
        assert!(!VolumeRole::Decorative.blocks_movement());

        assert!(VolumeRole::Wall.supports_wallrun());
        assert!(!VolumeRole::Normal.supports_wallrun());
    }

    #[test]
    fn test_negative_half_extents_clamped() {
        let volume = Volume::new(Vec3::ZERO, Vec3::new(-1.0, 2.0, 3.0), VolumeRole::Normal);
        assert_eq!(volume.half_extents, Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_size() {
        let volume = Volume::from_size(Vec3::new(0.0, -0.5, 0.0), Vec3::new(30.0, 1.0, 30.0), VolumeRole::Normal);
        assert_eq!(volume.top(), 0.0);
        assert_eq!(volume.bottom(), -1.0);
        assert_eq!(volume.min().x, -15.0);
    }

    #[test]
    fn test_footprint_overlap_is_strict() {
        let volume = Volume::new(Vec3::ZERO, Vec3::splat(1.0), VolumeRole::Normal);
        assert!(volume.overlaps_footprint(Vec3::new(1.4, 0.0, 0.0), 0.5));
        // Touching edges do not overlap
        assert!(!volume.overlaps_footprint(Vec3::new(1.5, 0.0, 0.0), 0.5));
    }
}
