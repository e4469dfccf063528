//! Parkour movement controller.
//!
//! This is the main entry point for player movement. It takes one input
//! frame per rendered frame and advances the player through the collision
//! world, returning the tricks emitted along the way.

use std::time::Instant;

use crate::collision::{resolve_vertical, CollisionWorld, VolumeRole};
use crate::tricks::{speed_landing_points, TrickEvent, TrickFeed, TrickKind};

use super::config::MovementConfig;
use super::cooldown::CooldownKind;
use super::grapple;
use super::integrate::{accelerate, apply_friction, apply_gravity, clamp_horizontal_speed};
use super::state::{Action, InputFrame, Locomotion, PlayerState};
use super::wallrun;

/// Everything a tick produced besides the state change itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Tricks emitted this tick, in emission order.
    pub events: Vec<TrickEvent>,

    /// Horizontal speed for the speed sink, present at most once per
    /// report interval. Measured before the speed cap, so it can exceed it
    /// for the tick a grapple pull or wall blend pushes past the cap.
    pub speed_sample: Option<f32>,

    /// Whether the player fell out of the world and was put back at the
    /// respawn point.
    pub respawned: bool,
}

/// Player movement controller.
///
/// Handles all parkour movement physics:
/// - Ground and air acceleration, gravity, friction and the speed cap
/// - Ground jumps, wall-runs and wall-jumps
/// - The grappling hook
/// - Landing, jump-boost and ceiling collision
/// - Aerial tricks and the events produced by movement
///
/// # Example
///
/// ```ignore
/// let controller = ParkourController::with_default_config();
/// let mut state = PlayerState::new(spawn_position);
///
/// // Each frame:
/// let outcome = controller.update(&mut state, &frame, &world, delta, Instant::now());
/// ```
#[derive(Debug, Clone)]
pub struct ParkourController {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl ParkourController {
    /// Create a new controller with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MovementConfig::default())
    }

    /// Advance the player by one frame.
    ///
    /// # Arguments
    ///
    /// * `state` - The player's movement state (will be modified)
    /// * `frame` - Held keys, fired actions and look direction for this frame
    /// * `world` - The level geometry
    /// * `delta` - Seconds since the previous frame
    /// * `now` - Wall-clock time used for cooldowns and event timestamps
    pub fn update(
        &self,
        state: &mut PlayerState,
        frame: &InputFrame,
        world: &CollisionWorld,
        delta: f32,
        now: Instant,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        // A zero or bogus step changes nothing at all
        if !delta.is_finite() || delta <= 0.0 {
            return outcome;
        }
        let delta = delta.min(self.config.max_delta);

        let mut feed = TrickFeed::new(now);

        self.handle_actions(state, frame, world, now, &mut feed);

        accelerate(&mut state.velocity, frame, &state.mode, &self.config, delta);

        grapple::pull(state, &self.config, delta);

        if matches!(state.mode, Locomotion::Airborne | Locomotion::WallAttached { .. }) {
            wallrun::update(state, frame, world, &self.config, delta, now, &mut feed);
        }

        apply_gravity(&mut state.velocity, &state.mode, &self.config, delta);
        apply_friction(&mut state.velocity, &state.mode, &self.config);

        // Reported and scored speed is measured before the cap
        let speed = state.horizontal_speed();
        clamp_horizontal_speed(&mut state.velocity, self.config.max_horizontal_speed);

        if state
            .cooldowns
            .try_fire(CooldownKind::SpeedReport, now, self.config.speed_report_interval())
        {
            outcome.speed_sample = Some(speed);
        }

        self.move_and_collide(state, world, speed, delta, &mut feed);

        if state.position.y < self.config.world_floor {
            log::debug!(
                "fell out of the world at {:?}, respawning at {:?}",
                state.position,
                self.config.respawn_position
            );
            state.reset_to(self.config.respawn_position);
            outcome.respawned = true;
        }

        log::trace!(
            "tick: pos={:?} vel={:?} mode={:?} air_time={:.2}",
            state.position,
            state.velocity,
            state.mode,
            state.air_time
        );

        outcome.events = feed.into_events();
        outcome
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn handle_actions(
        &self,
        state: &mut PlayerState,
        frame: &InputFrame,
        world: &CollisionWorld,
        now: Instant,
        feed: &mut TrickFeed,
    ) {
        for action in frame.actions.iter() {
            match action {
                Action::Jump => self.jump(state, frame, now, feed),
                Action::Grapple => {
                    grapple::fire(state, frame, world, &self.config, now, feed);
                }
                trick => self.aerial_trick(state, trick, now, feed),
            }
        }
    }

    /// Ground jump or wall-jump, sharing one cooldown. A jump with nothing to
    /// push off is ignored and leaves the cooldown alone.
    fn jump(&self, state: &mut PlayerState, frame: &InputFrame, now: Instant, feed: &mut TrickFeed) {
        if !(state.grounded() || state.wall_attached()) {
            return;
        }
        if !state
            .cooldowns
            .try_fire(CooldownKind::Jump, now, self.config.jump_cooldown())
        {
            return;
        }

        if state.grounded() {
            log::debug!("jump from {:?}", state.position);
            state.velocity.y = self.config.jump_velocity;
            state.mode = Locomotion::Airborne;
        } else {
            wallrun::wall_jump(state, frame, &self.config, now, feed);
        }
    }

    fn aerial_trick(&self, state: &mut PlayerState, action: Action, now: Instant, feed: &mut TrickFeed) {
        let Some(kind) = TrickKind::for_action(action) else {
            return;
        };
        if state.grounded() {
            return;
        }
        if state
            .cooldowns
            .try_fire(CooldownKind::Trick, now, self.config.trick_cooldown())
        {
            feed.emit(kind);
        }
    }

    // ========================================================================
    // Collision
    // ========================================================================

    /// Integrate the position, resolve it against the world and update the
    /// ground state.
    fn move_and_collide(
        &self,
        state: &mut PlayerState,
        world: &CollisionWorld,
        speed: f32,
        delta: f32,
        feed: &mut TrickFeed,
    ) {
        let was_grounded = state.grounded();
        let previous = state.position;
        let mut next = previous + state.velocity * delta;

        let contacts = resolve_vertical(
            world,
            self.config.bounds(),
            previous,
            &mut next,
            &mut state.velocity,
            self.config.boost_response(),
        );

        if contacts.hit_ceiling() {
            log::trace!("ceiling hit at {:?}", next);
        }

        if contacts.landed() {
            for (index, role) in contacts.landings.iter().enumerate() {
                if *role == VolumeRole::JumpBoost {
                    feed.emit(TrickKind::JumpBoost);
                }

                if index == 0
                    && !was_grounded
                    && state.air_time > self.config.speed_landing_air_time
                    && speed > self.config.speed_landing_min_speed
                {
                    feed.emit_scored(TrickKind::SpeedLanding, speed_landing_points(speed));
                }
            }

            if !was_grounded {
                log::debug!("landed at {:?} after {:.2}s in the air", next, state.air_time);
            }

            state.mode = Locomotion::Grounded;
            state.grapple_link = None;
            state.air_time = 0.0;
        } else {
            if was_grounded {
                log::debug!("left the ground at {:?}", previous);
                state.mode = Locomotion::Airborne;
            }
            state.air_time += delta;
        }

        state.position = next;
    }
}

// ============================================================================
// Tests
// ============================================================================
