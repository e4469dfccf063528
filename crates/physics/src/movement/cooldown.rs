//! Rate limiting for discrete actions.
//!
//! Each rate-limited category remembers when it last fired. An attempt
//! before the category's cooldown has elapsed is ignored: no event, no state
//! change, and the stored timestamp stays put.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Rate-limited categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CooldownKind {
    /// Ground jumps and wall-jumps share one cooldown.
    Jump,
    /// Grapple attempts, hit or miss.
    Grapple,
    /// Aerial tricks, all four share one cooldown.
    Trick,
    /// Speed reports to the speed sink.
    SpeedReport,
    /// Re-attaching to a wall after a wall-jump.
    WallReattach,
}

/// Last-fired timestamps per category.
#[derive(Debug, Clone, Default)]
pub struct Cooldowns {
    last_fired: HashMap<CooldownKind, Instant>,
}

impl Cooldowns {
    /// Create an empty set; every category is ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `kind` may fire at `now` given its cooldown.
    ///
    /// A category that never fired is always ready. A `now` earlier than the
    /// stored timestamp counts as zero elapsed time.
    pub fn ready(&self, kind: CooldownKind, now: Instant, cooldown: Duration) -> bool {
        match self.last_fired.get(&kind) {
            Some(last) => now.saturating_duration_since(*last) >= cooldown,
            None => true,
        }
    }

    /// Record that `kind` fired at `now`.
    pub fn mark(&mut self, kind: CooldownKind, now: Instant) {
        self.last_fired.insert(kind, now);
    }

    /// Fire `kind` if it is ready, recording the time. Returns whether it
    /// fired.
    pub fn try_fire(&mut self, kind: CooldownKind, now: Instant, cooldown: Duration) -> bool {
        if self.ready(kind, now, cooldown) {
            self.mark(kind, now);
            true
        } else {
            false
        }
    }

    /// When `kind` last fired, if ever.
    pub fn last_fired(&self, kind: CooldownKind) -> Option<Instant> {
        self.last_fired.get(&kind).copied()
    }
}

// ============================================================================
// Tests
// ============================================================================
