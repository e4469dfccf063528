//! Velocity integration: input acceleration, gravity, friction, speed cap.
//!
//! These are plain numeric transforms over the velocity. None of them can
//! fail; zero-length directions simply contribute nothing.

use glam::Vec3;

use super::config::MovementConfig;
use super::state::{horizontal, InputFrame, Locomotion};

/// Unit horizontal move direction from held keys and look direction, or zero
/// when the keys cancel out.
pub fn move_direction(frame: &InputFrame) -> Vec3 {
    let (forward_axis, right_axis) = frame.held.axes();
    let wish = frame.forward() * forward_axis + frame.right() * right_axis;
    wish.normalize_or_zero()
}

/// Add input acceleration to the horizontal velocity.
///
/// The increment is `direction * base_speed * delta * control`; it is not
/// bounded here, the speed cap takes care of that later in the tick.
pub fn accelerate(
    velocity: &mut Vec3,
    frame: &InputFrame,
    mode: &Locomotion,
    config: &MovementConfig,
    delta: f32,
) {
    let direction = move_direction(frame);
    if direction == Vec3::ZERO {
        return;
    }

    let control = config.control_factor(mode.is_grounded(), mode.is_wall_attached());
    let step = direction * config.base_speed * delta * control;
    velocity.x += step.x;
    velocity.z += step.z;
}

/// Apply gravity for the current mode.
///
/// Grappling uses its own reduced gravity; wall-running scales normal
/// gravity down.
pub fn apply_gravity(velocity: &mut Vec3, mode: &Locomotion, config: &MovementConfig, delta: f32) {
    if mode.is_grappling() {
        velocity.y -= config.grapple_gravity * delta;
    } else {
        let scale = if mode.is_wall_attached() {
            config.wall_gravity_scale
        } else {
            1.0
        };
        velocity.y -= config.gravity * delta * scale;
    }
}

/// Per-tick horizontal decay for the current mode.
pub fn apply_friction(velocity: &mut Vec3, mode: &Locomotion, config: &MovementConfig) {
    let retention = config.friction(mode.is_grounded(), mode.is_wall_attached());
    velocity.x *= retention;
    velocity.z *= retention;
}

/// Rescale the horizontal velocity down to `max_speed` if it exceeds it.
/// Vertical velocity is untouched.
pub fn clamp_horizontal_speed(velocity: &mut Vec3, max_speed: f32) {
    let speed = horizontal(*velocity).length();
    if speed > max_speed {
        let scale = max_speed / speed;
        velocity.x *= scale;
        velocity.z *= scale;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::state::{HeldKeys, WallSide};

    fn frame_with(keys: &[u8]) -> InputFrame {
        let mut frame = InputFrame::looking(Vec3::NEG_Z);
        for key in keys {
            frame.held.press(*key);
        }
        frame
    }

    #[test]
    fn test_move_direction_diagonal_is_normalized() {
        let frame = frame_with(&[HeldKeys::FORWARD, HeldKeys::RIGHT]);
        let direction = move_direction(&frame);
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.x > 0.0 && direction.z < 0.0);
    }

    #[test]
    fn test_move_direction_cancels() {
        let frame = frame_with(&[HeldKeys::FORWARD, HeldKeys::BACK]);
        assert_eq!(move_direction(&frame), Vec3::ZERO);
    }

    #[test]
    fn test_control_factor_by_mode() {
        let config = MovementConfig::default();
        let frame = frame_with(&[HeldKeys::FORWARD]);

        let mut grounded = Vec3::ZERO;
        accelerate(&mut grounded, &frame, &Locomotion::Grounded, &config, 0.1);
        assert!((grounded.z + 1.5).abs() < 1e-5);

        let mut airborne = Vec3::ZERO;
        accelerate(&mut airborne, &frame, &Locomotion::Airborne, &config, 0.1);
        assert!((airborne.z + 0.6).abs() < 1e-5);

        let wall = Locomotion::WallAttached {
            side: WallSide::Right,
            normal: Vec3::X,
            attached_for: 0.0,
        };
        let mut wall_running = Vec3::ZERO;
        accelerate(&mut wall_running, &frame, &wall, &config, 0.1);
        assert!((wall_running.z + 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_gravity_by_mode() {
        let config = MovementConfig::default();

        let mut falling = Vec3::ZERO;
        apply_gravity(&mut falling, &Locomotion::Airborne, &config, 0.1);
        assert!((falling.y + 3.0).abs() < 1e-5);

        let mut swinging = Vec3::ZERO;
        apply_gravity(&mut swinging, &Locomotion::Grappling { anchor: Vec3::Y }, &config, 0.1);
        assert!((swinging.y + 1.0).abs() < 1e-5);

        let wall = Locomotion::WallAttached {
            side: WallSide::Left,
            normal: Vec3::X,
            attached_for: 0.0,
        };
        let mut wall_running = Vec3::ZERO;
        apply_gravity(&mut wall_running, &wall, &config, 0.1);
        assert!((wall_running.y + 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_speed_cap_keeps_vertical() {
        let mut velocity = Vec3::new(60.0, -20.0, 80.0);
        clamp_horizontal_speed(&mut velocity, 50.0);

        assert!((horizontal(velocity).length() - 50.0).abs() < 1e-3);
        assert_eq!(velocity.y, -20.0);
        // Direction preserved
        assert!((velocity.x / velocity.z - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_friction() {
        let config = MovementConfig::default();
        let mut velocity = Vec3::new(10.0, 5.0, 0.0);
        apply_friction(&mut velocity, &Locomotion::Grounded, &config);
        assert!((velocity.x - 8.2).abs() < 1e-5);
        assert_eq!(velocity.y, 5.0);
    }
}
