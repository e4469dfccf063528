//! Trick log, score and speedometer.
//!
//! These are the sinks the movement kernel reports into: every trick event
//! is appended to the [`ScoreBoard`], and throttled speed samples update the
//! [`Speedometer`].

use skyrun_physics::TrickEvent;

/// Append-only log of tricks with a running total.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    events: Vec<TrickEvent>,
    total: u64,
}

impl ScoreBoard {
    /// Number of tricks the HUD lists.
    pub const RECENT: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append one trick and add its points.
    pub fn record(&mut self, event: TrickEvent) {
        self.total += u64::from(event.points);
        self.events.push(event);
    }

    /// Append tricks in order.
    pub fn record_all(&mut self, events: impl IntoIterator<Item = TrickEvent>) {
        for event in events {
            self.record(event);
        }
    }

    /// Sum of all recorded points.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every trick in the order it happened.
    pub fn events(&self) -> &[TrickEvent] {
        &self.events
    }

    /// The last `count` tricks, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &TrickEvent> + '_ {
        self.events.iter().rev().take(count)
    }
}

/// Last reported horizontal speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speedometer {
    speed: f32,
    max_speed: f32,
    top_speed: f32,
}

impl Speedometer {
    /// Create a speedometer whose gauge is full at `max_speed`.
    pub fn new(max_speed: f32) -> Self {
        Self {
            speed: 0.0,
            max_speed,
            top_speed: 0.0,
        }
    }

    /// Take a new speed sample.
    pub fn update(&mut self, speed: f32) {
        self.speed = speed;
        self.top_speed = self.top_speed.max(speed);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Highest speed reported so far.
    pub fn top_speed(&self) -> f32 {
        self.top_speed
    }

    /// Gauge fill in 0..=1.
    pub fn fraction(&self) -> f32 {
        if self.max_speed <= 0.0 {
            return 0.0;
        }
        (self.speed / self.max_speed).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use skyrun_physics::TrickKind;

    use super::*;

    fn event(kind: TrickKind, points: u32) -> TrickEvent {
        TrickEvent {
            kind,
            points,
            timestamp: Instant::now(),
        }
    }

    #[test]
    fn test_total_accumulates() {
        let mut board = ScoreBoard::new();
        board.record(event(TrickKind::BarrelRoll, 100));
        board.record(event(TrickKind::SpeedLanding, 84));

        assert_eq!(board.total(), 184);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_recent_newest_first() {
        let mut board = ScoreBoard::new();
        board.record_all([
            event(TrickKind::BarrelRoll, 100),
            event(TrickKind::FrontFlip, 150),
            event(TrickKind::BackFlip, 150),
            event(TrickKind::Spin360, 200),
            event(TrickKind::Wallrun, 75),
            event(TrickKind::WallJump, 100),
        ]);

        let recent: Vec<_> = board.recent(ScoreBoard::RECENT).map(|e| e.kind).collect();
        assert_eq!(
            recent,
            vec![
                TrickKind::WallJump,
                TrickKind::Wallrun,
                TrickKind::Spin360,
                TrickKind::BackFlip,
                TrickKind::FrontFlip,
            ]
        );
        // The log itself is untouched
        assert_eq!(board.events()[0].kind, TrickKind::BarrelRoll);
    }

    #[test]
    fn test_speedometer_fraction() {
        let mut gauge = Speedometer::new(50.0);
        gauge.update(25.0);
        assert_eq!(gauge.fraction(), 0.5);

        gauge.update(10.0);
        assert_eq!(gauge.speed(), 10.0);
        assert_eq!(gauge.top_speed(), 25.0);

        gauge.update(80.0);
        assert_eq!(gauge.fraction(), 1.0);
    }
}
