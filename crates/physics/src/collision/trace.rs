//! Ray-cast results and the player's collision bounds.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::volume::VolumeRole;

/// Result of a ray cast that hit a volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,

    /// World-space hit point. For a ray starting inside a box this is the
    /// origin itself.
    pub point: Vec3,

    /// Index of the hit volume in the world's volume list.
    pub volume_index: usize,

    /// Role of the hit volume.
    pub role: VolumeRole,
}

/// The player's collision shape: a vertical cylinder centered on the eye
/// point.
///
/// The cylinder's footprint is tested as a square of half-width `radius`
/// against volume footprints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBounds {
    /// Footprint radius (meters).
    pub radius: f32,
    /// Total height (meters).
    pub height: f32,
}

impl PlayerBounds {
    /// The standard parkour runner.
    pub const RUNNER: Self = Self {
        radius: 0.5,
        height: 1.8,
    };

    /// Half of the total height.
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Y of the feet for a player whose eye point is at `position`.
    #[inline]
    pub fn bottom(&self, position: Vec3) -> f32 {
        position.y - self.half_height()
    }

    /// Y of the head for a player whose eye point is at `position`.
    #[inline]
    pub fn top(&self, position: Vec3) -> f32 {
        position.y + self.half_height()
    }
}

impl Default for PlayerBounds {
    fn default() -> Self {
        Self::RUNNER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_span() {
        let bounds = PlayerBounds::RUNNER;
        let position = Vec3::new(0.0, 2.0, 0.0);
        assert!((bounds.bottom(position) - 1.1).abs() < 1e-6);
        assert!((bounds.top(position) - 2.9).abs() < 1e-6);
    }
}
