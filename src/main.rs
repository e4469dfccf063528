//! Skyrun - Main Entry Point
//!
//! Runs the parkour movement kernel headless: loads an optional session
//! config and level, drives the runner with a scripted autopilot at a fixed
//! frame rate, and logs tricks and a final summary.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use skyrun_game::{InputState, KeyBindings, Level, MovementConfig, Player, PlayerInput, SessionConfig, Simulation};

#[derive(Parser, Debug)]
#[command(name = "skyrun", version, about = "Run the Skyrun parkour kernel headless with a scripted autopilot")]
struct Opts {
    /// Session config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level file (TOML); the built-in course is used when omitted
    #[arg(long)]
    level: Option<PathBuf>,

    /// Simulated run length in seconds
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Frames per second (default: the config's tick rate)
    #[arg(long)]
    fps: Option<u32>,

    /// Movement preset, used when no config file is given
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Fast 100 ms grapple with 150 range
    Default,
    /// Slower 500 ms grapple with 100 range
    Tethered,
}

impl Preset {
    fn movement(self) -> MovementConfig {
        match self {
            Preset::Default => MovementConfig::default(),
            Preset::Tethered => MovementConfig::tethered(),
        }
    }
}

/// Scripted input: run forward, hop, trick in the air and grapple upward
/// now and then, while slowly turning.
struct Autopilot {
    frame: u64,
    next_trick: usize,
    taps: Vec<&'static str>,
}

impl Autopilot {
    const TRICK_KEYS: [&'static str; 4] = ["KeyQ", "KeyZ", "KeyX", "KeyC"];

    fn new() -> Self {
        Self {
            frame: 0,
            next_trick: 0,
            taps: Vec::new(),
        }
    }

    fn tap(&mut self, input: &mut InputState, bindings: &KeyBindings, code: &'static str) {
        input.key_down(code, bindings);
        self.taps.push(code);
    }

    fn drive(&mut self, input: &mut InputState, bindings: &KeyBindings, player: &Player) -> PlayerInput {
        for code in self.taps.drain(..) {
            input.key_up(code, bindings);
        }

        if self.frame == 0 {
            input.key_down("KeyW", bindings);
        }

        let grounded = player.movement.grounded();
        if grounded && self.frame % 75 == 0 {
            self.tap(input, bindings, "Space");
        }
        if !grounded && self.frame % 40 == 20 {
            let code = Self::TRICK_KEYS[self.next_trick % Self::TRICK_KEYS.len()];
            self.next_trick += 1;
            self.tap(input, bindings, code);
        }

        match self.frame % 180 {
            90 => {
                input.mouse_move(0.0, -300.0);
                self.tap(input, bindings, "KeyE");
            }
            120 => input.mouse_move(0.0, 300.0),
            _ => input.mouse_move(1.0, 0.0),
        }

        self.frame += 1;
        input.take_input()
    }
}

fn load_config(opts: &Opts) -> SessionConfig {
    let mut config = match &opts.config {
        Some(path) => match SessionConfig::from_file(path) {
            Ok(config) => {
                if opts.preset != Preset::Default {
                    log::warn!("--preset is ignored when --config is given");
                }
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                SessionConfig {
                    movement: opts.preset.movement(),
                    ..Default::default()
                }
            }
        },
        None => SessionConfig {
            movement: opts.preset.movement(),
            ..Default::default()
        },
    };

    match opts.fps {
        Some(0) => log::warn!("--fps must be positive; using {}", config.tick_rate),
        Some(fps) => config.tick_rate = fps,
        None => {}
    }

    config
}

fn load_level(opts: &Opts) -> Level {
    match &opts.level {
        Some(path) => Level::from_file(path).unwrap_or_else(|e| {
            log::warn!("{e}; using the built-in course");
            Level::course()
        }),
        None => Level::course(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let config = load_config(&opts);
    let level = load_level(&opts);

    let fps = config.tick_rate;
    let frames = (opts.seconds.max(0.0) * fps as f32).round() as u64;
    let bindings = config.bindings.clone();

    log::info!(
        "running '{}' ({} volumes) for {} frames at {} fps",
        level.name,
        level.world.volume_count(),
        frames,
        fps
    );

    let mut sim = Simulation::new(config, level);
    let mut input = InputState::new();
    let mut autopilot = Autopilot::new();

    let start = Instant::now();
    for frame in 0..frames {
        let now = start + Duration::from_secs_f64(frame as f64 / fps as f64);
        let player_input = autopilot.drive(&mut input, &bindings, &sim.player);
        let outcome = sim.step(&player_input, now);

        let elapsed = frame as f32 / fps as f32;
        for event in &outcome.events {
            log::info!("{:>7.2}s  {} +{}", elapsed, event.name(), event.points);
        }
        if outcome.respawned {
            log::info!("{:>7.2}s  fell off the course, respawned", elapsed);
        }
        if outcome.speed_sample.is_some() {
            log::debug!(
                "{:>7.2}s  speed {:.1} ({:.0}% of cap)",
                elapsed,
                sim.speedometer.speed(),
                sim.speedometer.fraction() * 100.0
            );
        }
    }

    log::info!(
        "finished: score {} from {} tricks, top speed {:.1}, {} falls, final position {:?}",
        sim.score.total(),
        sim.score.len(),
        sim.speedometer.top_speed(),
        sim.player.falls,
        sim.player.position()
    );
    for event in sim.score.recent(skyrun_game::ScoreBoard::RECENT) {
        log::info!("  recent: {} +{}", event.name(), event.points);
    }
}
