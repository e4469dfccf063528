//! Collision world containing the level's static volumes.
//!
//! The world is built once per level and then only read, by the movement
//! kernel and by any renderer that wants the same boxes.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::Cuboid;

use super::trace::RayHit;
use super::volume::{Volume, VolumeRole};

/// A volume together with its ray-cast shape.
#[derive(Debug, Clone)]
struct CollisionBrush {
    volume: Volume,
    shape: Cuboid,
    transform: Isometry<Real>,
}

impl CollisionBrush {
    fn new(volume: Volume) -> Self {
        let half = volume.half_extents;
        let center = volume.center;
        Self {
            volume,
            shape: Cuboid::new(Vector::new(half.x, half.y, half.z)),
            transform: Isometry::translation(center.x, center.y, center.z),
        }
    }
}

/// The collision world: an ordered, immutable-after-build list of volumes.
///
/// Order matters. The vertical resolver visits volumes in insertion order
/// and each one may correct the tentative position independently.
///
/// # Thread Safety
///
/// The world holds no interior mutability and can be shared across threads
/// for read-only queries.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self { brushes: Vec::new() }
    }

    /// Build a world from volumes, keeping their order.
    pub fn from_volumes(volumes: impl IntoIterator<Item = Volume>) -> Self {
        Self {
            brushes: volumes.into_iter().map(CollisionBrush::new).collect(),
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `role` - Gameplay role used for query filtering
    ///
    /// Returns the index of the new volume.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, role: VolumeRole) -> usize {
        self.add_volume(Volume::new(center, half_extents, role))
    }

    /// Add a prepared volume. Returns its index.
    pub fn add_volume(&mut self, volume: Volume) -> usize {
        self.brushes.push(CollisionBrush::new(volume));
        self.brushes.len() - 1
    }

    /// Number of volumes.
    pub fn volume_count(&self) -> usize {
        self.brushes.len()
    }

    /// Whether the world has no volumes.
    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    /// Get a volume by index.
    pub fn volume(&self, index: usize) -> Option<&Volume> {
        self.brushes.get(index).map(|brush| &brush.volume)
    }

    /// All volumes in insertion order.
    pub fn volumes(&self) -> impl Iterator<Item = &Volume> + '_ {
        self.brushes.iter().map(|brush| &brush.volume)
    }

    /// Volumes the vertical resolver collides with, in insertion order.
    pub fn movement_volumes(&self) -> impl Iterator<Item = &Volume> + '_ {
        self.volumes().filter(|volume| volume.role.blocks_movement())
    }

    /// Volumes the wall-attachment detector scans, in insertion order.
    pub fn wall_volumes(&self) -> impl Iterator<Item = &Volume> + '_ {
        self.volumes().filter(|volume| volume.role.supports_wallrun())
    }

    /// Cast a ray against every volume and return the nearest hit closer
    /// than `max_distance`.
    ///
    /// Boxes are hollow to the ray: one starting inside a box hits where it
    /// leaves that box. A zero-length direction never hits.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Exclusive upper bound on hit distance
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<(f32, usize)> = None;

        for (index, brush) in self.brushes.iter().enumerate() {
            let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, false) else {
                continue;
            };

            if toi >= max_distance {
                continue;
            }

            // Strictly closer keeps the earliest volume on ties
            if closest.map_or(true, |(best, _)| toi < best) {
                closest = Some((toi, index));
            }
        }

        closest.map(|(distance, volume_index)| RayHit {
            distance,
            point: origin + dir * distance,
            volume_index,
            role: self.brushes[volume_index].volume.role,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
