//! Level loading and the built-in course.
//!
//! A level is an ordered list of volumes plus a spawn point. Levels can be
//! described in TOML:
//!
//! ```toml
//! name = "Rooftops"
//! spawn = [0.0, 5.0, 0.0]
//!
//! [[volumes]]
//! center = [0.0, -0.5, 0.0]
//! half_extents = [15.0, 0.5, 15.0]
//!
//! [[volumes]]
//! center = [45.0, 5.0, 0.0]
//! half_extents = [6.0, 0.5, 6.0]
//! role = "jump_boost"
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyrun_physics::{CollisionWorld, Volume, VolumeRole};
use thiserror::Error;

/// Errors that can occur when loading a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("volume {index}: {reason}")]
    InvalidVolume { index: usize, reason: String },
}

/// A platform of the built-in course: center, full size, boost or not.
type CoursePlatform = ([f32; 3], [f32; 3], bool);

/// The 30 platforms of the built-in course.
const COURSE_PLATFORMS: [CoursePlatform; 30] = [
    ([0.0, -0.5, 0.0], [30.0, 1.0, 30.0], false),
    ([25.0, 1.0, 5.0], [15.0, 1.0, 10.0], false),
    ([45.0, 5.0, 0.0], [12.0, 1.0, 12.0], true),
    ([60.0, 8.0, -5.0], [10.0, 1.0, 10.0], false),
    ([75.0, 12.0, 5.0], [15.0, 1.0, 15.0], false),
    ([75.0, 18.0, -15.0], [10.0, 1.0, 10.0], false),
    ([60.0, 22.0, -25.0], [12.0, 1.0, 12.0], true),
    ([45.0, 25.0, -20.0], [10.0, 1.0, 10.0], false),
    ([30.0, 28.0, -15.0], [8.0, 1.0, 8.0], false),
    ([15.0, 30.0, -10.0], [10.0, 1.0, 10.0], false),
    ([0.0, 33.0, -5.0], [15.0, 1.0, 15.0], true),
    ([-15.0, 35.0, 5.0], [10.0, 1.0, 10.0], false),
    ([-30.0, 38.0, 0.0], [12.0, 1.0, 12.0], false),
    ([-45.0, 40.0, -10.0], [10.0, 1.0, 10.0], false),
    ([-55.0, 42.0, 5.0], [15.0, 1.0, 15.0], true),
    ([-65.0, 45.0, 20.0], [10.0, 1.0, 10.0], false),
    ([-60.0, 48.0, 35.0], [12.0, 1.0, 12.0], false),
    ([-45.0, 50.0, 45.0], [10.0, 1.0, 10.0], false),
    ([-30.0, 52.0, 40.0], [15.0, 1.0, 15.0], true),
    ([-15.0, 55.0, 35.0], [10.0, 1.0, 10.0], false),
    ([0.0, 57.0, 30.0], [12.0, 1.0, 12.0], false),
    ([15.0, 59.0, 25.0], [10.0, 1.0, 10.0], false),
    ([30.0, 61.0, 20.0], [15.0, 1.0, 15.0], true),
    ([45.0, 63.0, 15.0], [20.0, 1.0, 20.0], false),
    ([10.0, 10.0, 20.0], [8.0, 1.0, 8.0], false),
    ([-20.0, 15.0, -20.0], [10.0, 1.0, 10.0], false),
    ([20.0, 20.0, -30.0], [8.0, 1.0, 8.0], true),
    ([-40.0, 25.0, 15.0], [12.0, 1.0, 12.0], false),
    ([-10.0, 45.0, -15.0], [10.0, 1.0, 10.0], false),
    ([35.0, 40.0, 5.0], [8.0, 1.0, 8.0], true),
];

/// Wall-run walls along the course: center and half extents.
const COURSE_WALLS: [([f32; 3], [f32; 3]); 4] = [
    ([35.0, 6.0, -8.0], [12.0, 5.0, 0.5]),
    ([68.0, 14.0, -8.0], [0.5, 6.0, 10.0]),
    ([-40.0, 44.0, 25.0], [0.5, 6.0, 12.0]),
    ([0.0, 50.0, 45.0], [14.0, 6.0, 0.5]),
];

/// Building shells around the course: center and half extents.
const COURSE_BUILDINGS: [([f32; 3], [f32; 3]); 4] = [
    ([100.0, 30.0, 100.0], [15.0, 30.0, 15.0]),
    ([-100.0, 40.0, -80.0], [20.0, 40.0, 20.0]),
    ([80.0, 25.0, -90.0], [12.0, 25.0, 12.0]),
    ([-90.0, 20.0, 90.0], [15.0, 20.0, 15.0]),
];

/// A game level: collision geometry and a spawn point.
#[derive(Debug)]
pub struct Level {
    /// Display name.
    pub name: String,

    /// Level geometry.
    pub world: CollisionWorld,

    /// Player eye position at spawn.
    pub spawn: Vec3,
}

/// On-disk level description.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelFile {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default = "default_spawn")]
    spawn: Vec3,
    #[serde(default)]
    volumes: Vec<VolumeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VolumeDef {
    center: Vec3,
    half_extents: Vec3,
    #[serde(default)]
    role: VolumeRole,
}

fn default_name() -> String {
    "Untitled".to_string()
}

fn default_spawn() -> Vec3 {
    Level::COURSE_SPAWN
}

impl Level {
    /// Where the built-in course spawns the player.
    pub const COURSE_SPAWN: Vec3 = Vec3::new(0.0, 5.0, 0.0);

    /// Create an empty level.
    pub fn new(name: &str, spawn: Vec3) -> Self {
        Self {
            name: name.to_string(),
            world: CollisionWorld::new(),
            spawn,
        }
    }

    /// The built-in parkour course.
    pub fn course() -> Self {
        let mut level = Self::new("Skyline Course", Self::COURSE_SPAWN);

        for (center, size, boost) in COURSE_PLATFORMS {
            let role = if boost {
                VolumeRole::JumpBoost
            } else {
                VolumeRole::Normal
            };
            level
                .world
                .add_volume(Volume::from_size(Vec3::from(center), Vec3::from(size), role));
        }

        for (center, half_extents) in COURSE_WALLS {
            level
                .world
                .add_box(Vec3::from(center), Vec3::from(half_extents), VolumeRole::Wall);
        }

        for (center, half_extents) in COURSE_BUILDINGS {
            level
                .world
                .add_box(Vec3::from(center), Vec3::from(half_extents), VolumeRole::Building);
        }

        level
    }

    /// Parse a level from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, LevelError> {
        let file: LevelFile = toml::from_str(source)?;

        for (index, def) in file.volumes.iter().enumerate() {
            validate_volume(index, def)?;
        }

        let mut level = Self::new(&file.name, file.spawn);
        level.world = CollisionWorld::from_volumes(
            file.volumes
                .into_iter()
                .map(|def| Volume::new(def.center, def.half_extents, def.role)),
        );

        if level.world.is_empty() {
            log::warn!("level '{}' has no volumes", level.name);
        }
        log::debug!(
            "loaded level '{}' with {} volumes",
            level.name,
            level.world.volume_count()
        );

        Ok(level)
    }

    /// Load a level from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LevelError> {
        let source = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Number of volumes the player can stand on.
    pub fn platform_count(&self) -> usize {
        self.world.movement_volumes().count()
    }
}

fn validate_volume(index: usize, def: &VolumeDef) -> Result<(), LevelError> {
    if !def.center.is_finite() || !def.half_extents.is_finite() {
        return Err(LevelError::InvalidVolume {
            index,
            reason: "non-finite coordinates".to_string(),
        });
    }
    if def.half_extents.min_element() < 0.0 {
        return Err(LevelError::InvalidVolume {
            index,
            reason: format!("negative half extents {:?}", def.half_extents),
        });
    }
    Ok(())
}
