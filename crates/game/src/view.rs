//! First-person view angles.
//!
//! The physics kernel only needs a unit look direction; this is the camera
//! stand-in that produces it from accumulated mouse movement. Yaw 0 looks
//! down -Z, positive yaw turns right, positive pitch looks up.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Pitch stays just short of straight up/down so the horizontal forward
/// vector never degenerates.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Mouse pixels to radians per unit of sensitivity.
const RADIANS_PER_PIXEL: f32 = 0.001;

/// Pitch and yaw in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    pub pitch: f32,
    pub yaw: f32,
}

impl ViewAngles {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        let mut angles = Self { pitch, yaw };
        angles.normalize();
        angles
    }

    /// Apply a mouse delta (pixels). Moving the mouse right turns right,
    /// moving it up looks up.
    pub fn apply_mouse(&mut self, delta: (f32, f32), sensitivity: f32) {
        let scale = sensitivity * RADIANS_PER_PIXEL;
        self.yaw += delta.0 * scale;
        self.pitch -= delta.1 * scale;
        self.normalize();
    }

    /// Unit look direction.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    fn normalize(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Wrap yaw to -PI..PI
        while self.yaw > PI {
            self.yaw -= TAU;
        }
        while self.yaw < -PI {
            self.yaw += TAU;
        }
    }
}
