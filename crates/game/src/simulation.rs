//! Game simulation - the main game loop.
//!
//! One simulation drives one player through one level. Each tick applies
//! the mouse to the view, hands the physics kernel an input frame, and
//! routes what comes back into the score board and speedometer.

use std::time::Instant;

use skyrun_physics::{ParkourController, TickOutcome};

use crate::config::SessionConfig;
use crate::input::PlayerInput;
use crate::level::Level;
use crate::player::Player;
use crate::score::{ScoreBoard, Speedometer};

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Session configuration.
    pub config: SessionConfig,

    /// Current level.
    pub level: Level,

    /// The runner.
    pub player: Player,

    /// Trick log and total score.
    pub score: ScoreBoard,

    /// Throttled speed display.
    pub speedometer: Speedometer,

    /// Movement physics controller.
    controller: ParkourController,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    pub fn new(config: SessionConfig, level: Level) -> Self {
        let controller = ParkourController::new(config.movement.clone());
        let spawn = config.spawn_position.unwrap_or(level.spawn);
        let speedometer = Speedometer::new(config.movement.max_horizontal_speed);

        log::debug!("spawning in '{}' at {:?}", level.name, spawn);

        Self {
            frame: 0,
            config,
            level,
            player: Player::new("Runner".to_string(), spawn),
            score: ScoreBoard::new(),
            speedometer,
            controller,
        }
    }

    /// Create a simulation with default configuration on the built-in
    /// course.
    pub fn course() -> Self {
        Self::new(SessionConfig::default(), Level::course())
    }

    /// Advance the simulation by one fixed tick.
    pub fn step(&mut self, input: &PlayerInput, now: Instant) -> TickOutcome {
        let delta = self.config.delta_time();
        self.tick(input, delta, now)
    }

    /// Advance the simulation by `delta` seconds.
    ///
    /// Tricks are appended to the score board, speed samples update the
    /// speedometer. The outcome is returned as well for callers that want to
    /// react to individual events.
    pub fn tick(&mut self, input: &PlayerInput, delta: f32, now: Instant) -> TickOutcome {
        self.player
            .view
            .apply_mouse(input.mouse_delta, self.config.mouse_sensitivity);
        let frame = input.to_frame(self.player.look_direction());

        let outcome = self.controller.update(
            &mut self.player.movement,
            &frame,
            &self.level.world,
            delta,
            now,
        );

        if let Some(speed) = outcome.speed_sample {
            self.speedometer.update(speed);
        }
        if outcome.respawned {
            self.player.falls += 1;
        }
        self.score.record_all(outcome.events.iter().cloned());

        self.frame += 1;
        outcome
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================
