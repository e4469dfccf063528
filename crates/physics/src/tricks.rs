//! Named, scored gameplay events.
//!
//! Tricks come from two places: the four aerial trick actions, and physical
//! transitions detected by the movement kernel (jump-boost landings, fast
//! landings, starting a wallrun, wall-jumps and mid-air grapples). The
//! kernel hands them back from each tick in emission order; keeping,
//! displaying and scoring them is the caller's job.

use std::time::Instant;

use crate::movement::Action;

/// Every trick the kernel can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrickKind {
    BarrelRoll,
    FrontFlip,
    BackFlip,
    Spin360,
    JumpBoost,
    SpeedLanding,
    Wallrun,
    WallJump,
    GrappleMaster,
}

impl TrickKind {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BarrelRoll => "Barrel Roll",
            Self::FrontFlip => "Front Flip",
            Self::BackFlip => "Back Flip",
            Self::Spin360 => "360 Spin",
            Self::JumpBoost => "Jump Boost!",
            Self::SpeedLanding => "Speed Landing!",
            Self::Wallrun => "Wallrun!",
            Self::WallJump => "Wall Jump!",
            Self::GrappleMaster => "Grapple Master",
        }
    }

    /// Fixed score, or `None` for tricks scored from the landing speed.
    pub fn fixed_points(self) -> Option<u32> {
        match self {
            Self::BarrelRoll => Some(100),
            Self::FrontFlip | Self::BackFlip => Some(150),
            Self::Spin360 => Some(200),
            Self::JumpBoost => Some(25),
            Self::SpeedLanding => None,
            Self::Wallrun => Some(75),
            Self::WallJump => Some(100),
            Self::GrappleMaster => Some(50),
        }
    }

    /// The aerial trick bound to an action, if any.
    pub fn for_action(action: Action) -> Option<Self> {
        match action {
            Action::TrickA => Some(Self::BarrelRoll),
            Action::TrickB => Some(Self::FrontFlip),
            Action::TrickC => Some(Self::BackFlip),
            Action::TrickD => Some(Self::Spin360),
            Action::Jump | Action::Grapple => None,
        }
    }
}

/// One emitted trick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrickEvent {
    pub kind: TrickKind,
    pub points: u32,
    pub timestamp: Instant,
}

impl TrickEvent {
    /// Display name of the trick.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Collects the tricks emitted during one tick.
#[derive(Debug)]
pub(crate) struct TrickFeed {
    now: Instant,
    events: Vec<TrickEvent>,
}

impl TrickFeed {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            now,
            events: Vec::new(),
        }
    }

    /// Emit a fixed-score trick.
    pub(crate) fn emit(&mut self, kind: TrickKind) {
        let points = kind.fixed_points().unwrap_or(0);
        self.emit_scored(kind, points);
    }

    /// Emit a trick with an explicit score.
    pub(crate) fn emit_scored(&mut self, kind: TrickKind, points: u32) {
        log::debug!("trick: {} (+{})", kind.name(), points);
        self.events.push(TrickEvent {
            kind,
            points,
            timestamp: self.now,
        });
    }

    pub(crate) fn into_events(self) -> Vec<TrickEvent> {
        self.events
    }
}

/// Score for a fast landing: twice the horizontal speed, rounded down.
pub fn speed_landing_points(horizontal_speed: f32) -> u32 {
    (horizontal_speed * 2.0).floor().max(0.0) as u32
}
