//! Movement configuration constants.
//!
//! All movement parameters are grouped here for easy tuning. The defaults
//! give an arcade feel: fast, floaty and forgiving in the air.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{BoostResponse, PlayerBounds};

/// Configuration for parkour movement physics.
///
/// All values use world units and seconds unless otherwise noted. Missing
/// fields in a serialized config fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Player Dimensions
    // ========================================================================
    /// Footprint radius of the player cylinder.
    pub player_radius: f32,

    /// Total height of the player cylinder (centered on the eye point).
    pub player_height: f32,

    // ========================================================================
    // Input Acceleration
    // ========================================================================
    /// Acceleration applied along the move direction (units/second²).
    pub base_speed: f32,

    /// Acceleration multiplier while grounded.
    pub ground_control: f32,

    /// Acceleration multiplier while wall-running.
    pub wall_control: f32,

    /// Acceleration multiplier while airborne or grappling.
    pub air_control: f32,

    // ========================================================================
    // Gravity and Friction
    // ========================================================================
    /// Gravity acceleration (units/second²).
    pub gravity: f32,

    /// Gravity multiplier while wall-running.
    pub wall_gravity_scale: f32,

    /// Gravity while swinging on the grapple (units/second²).
    pub grapple_gravity: f32,

    /// Per-tick horizontal velocity retention while grounded.
    pub ground_friction: f32,

    /// Per-tick horizontal velocity retention while wall-running.
    pub wall_friction: f32,

    /// Per-tick horizontal velocity retention otherwise.
    pub air_friction: f32,

    /// Horizontal speed cap (units/second).
    pub max_horizontal_speed: f32,

    // ========================================================================
    // Jumping and Landing
    // ========================================================================
    /// Vertical velocity of a ground jump.
    pub jump_velocity: f32,

    /// Reflection factor for landings on jump-boost platforms.
    pub boost_reflect: f32,

    /// Minimum upward velocity after a jump-boost landing.
    pub boost_min_velocity: f32,

    /// Air time (seconds) a landing needs before it can score a speed landing.
    pub speed_landing_air_time: f32,

    /// Horizontal speed a landing needs to score a speed landing.
    pub speed_landing_min_speed: f32,

    // ========================================================================
    // Wall Running
    // ========================================================================
    /// Maximum distance from a wall face to attach.
    pub wall_detect_distance: f32,

    /// Minimum horizontal speed to attach.
    pub wall_min_speed: f32,

    /// Attach only when |dot(velocity direction, wall normal)| is below this.
    pub wall_max_approach_dot: f32,

    /// Floor for the wall-run target speed.
    pub wall_target_speed: f32,

    /// Fraction of the current speed the wall-run target keeps.
    pub wall_speed_retention: f32,

    /// Exponential blend rate toward the wall-run velocity (per second).
    pub wall_blend_rate: f32,

    /// Push away from the wall (units/second, scaled by `wall_push_rate`).
    pub wall_push: f32,

    /// Scale applied to `wall_push` per second.
    pub wall_push_rate: f32,

    /// How long the wall-run keeps the player afloat (seconds).
    pub wall_float_time: f32,

    /// Vertical velocity floor while afloat.
    pub wall_float_floor: f32,

    /// Vertical velocity floor after the float window.
    pub wall_sink_floor: f32,

    /// Upward assist while afloat (units/second²).
    pub wall_lift: f32,

    /// Vertical velocity of a wall-jump.
    pub wall_jump_velocity: f32,

    /// Lateral impulse of a wall-jump.
    pub wall_jump_push: f32,

    // ========================================================================
    // Grappling Hook
    // ========================================================================
    /// Maximum grapple ray length (exclusive).
    pub grapple_range: f32,

    /// Pull acceleration toward the anchor (units/second²).
    pub grapple_pull: f32,

    /// Distance to the anchor at which the grapple lets go.
    pub grapple_release_distance: f32,

    /// Air time (seconds) before a grapple scores "Grapple Master".
    pub grapple_master_air_time: f32,

    // ========================================================================
    // World
    // ========================================================================
    /// Below this Y the player is respawned.
    pub world_floor: f32,

    /// Where the player reappears after falling out of the world.
    pub respawn_position: Vec3,

    /// Largest frame delta the kernel will integrate (seconds).
    pub max_delta: f32,

    // ========================================================================
    // Timers (milliseconds)
    // ========================================================================
    /// Minimum time between jump-type actions.
    pub jump_cooldown_ms: u32,

    /// Minimum time between grapple attempts.
    pub grapple_cooldown_ms: u32,

    /// Minimum time between aerial tricks.
    pub trick_cooldown_ms: u32,

    /// Minimum time between speed reports.
    pub speed_report_interval_ms: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            // Player dimensions
            player_radius: 0.5,
            player_height: 1.8,

            // Input acceleration
            base_speed: 15.0,
            ground_control: 1.0,
            wall_control: 0.8,
            air_control: 0.4,

            // Gravity and friction
            gravity: 30.0,
            wall_gravity_scale: 0.3,
            grapple_gravity: 10.0,
            ground_friction: 0.82,
            wall_friction: 0.95,
            air_friction: 0.99,
            max_horizontal_speed: 50.0,

            // Jumping and landing
            jump_velocity: 12.0,
            boost_reflect: 1.2,
            boost_min_velocity: 15.0,
            speed_landing_air_time: 2.0,
            speed_landing_min_speed: 30.0,

            // Wall running
            wall_detect_distance: 2.0,
            wall_min_speed: 5.0,
            wall_max_approach_dot: 0.7,
            wall_target_speed: 12.0,
            wall_speed_retention: 0.95,
            wall_blend_rate: 8.0,
            wall_push: 0.5,
            wall_push_rate: 10.0,
            wall_float_time: 2.5,
            wall_float_floor: -1.0,
            wall_sink_floor: -3.0,
            wall_lift: 12.0,
            wall_jump_velocity: 14.0,
            wall_jump_push: 15.0,

            // Grappling hook
            grapple_range: 150.0,
            grapple_pull: 45.0,
            grapple_release_distance: 2.0,
            grapple_master_air_time: 1.0,

            // World
            world_floor: -30.0,
            respawn_position: Vec3::new(0.0, 10.0, 0.0),
            max_delta: 0.1,

            // Timers
            jump_cooldown_ms: 300,
            grapple_cooldown_ms: 100,
            trick_cooldown_ms: 1000,
            speed_report_interval_ms: 100,
        }
    }
}

impl MovementConfig {
    /// Create a "tethered" config: a slower, shorter grapple that can't be
    /// spammed.
    pub fn tethered() -> Self {
        Self {
            grapple_range: 100.0,
            grapple_pull: 35.0,
            grapple_cooldown_ms: 500,
            ..Default::default()
        }
    }

    /// The player's collision cylinder.
    pub fn bounds(&self) -> PlayerBounds {
        PlayerBounds {
            radius: self.player_radius,
            height: self.player_height,
        }
    }

    /// Jump-boost landing response.
    pub fn boost_response(&self) -> BoostResponse {
        BoostResponse {
            reflect: self.boost_reflect,
            min_velocity: self.boost_min_velocity,
        }
    }

    /// Input acceleration multiplier for the given support.
    pub fn control_factor(&self, grounded: bool, wall_attached: bool) -> f32 {
        if grounded {
            self.ground_control
        } else if wall_attached {
            self.wall_control
        } else {
            self.air_control
        }
    }

    /// Horizontal velocity retention for the given support.
    pub fn friction(&self, grounded: bool, wall_attached: bool) -> f32 {
        if grounded {
            self.ground_friction
        } else if wall_attached {
            self.wall_friction
        } else {
            self.air_friction
        }
    }

    pub fn jump_cooldown(&self) -> Duration {
        Duration::from_millis(self.jump_cooldown_ms as u64)
    }

    pub fn grapple_cooldown(&self) -> Duration {
        Duration::from_millis(self.grapple_cooldown_ms as u64)
    }

    pub fn trick_cooldown(&self) -> Duration {
        Duration::from_millis(self.trick_cooldown_ms as u64)
    }

    pub fn speed_report_interval(&self) -> Duration {
        Duration::from_millis(self.speed_report_interval_ms as u64)
    }
}
