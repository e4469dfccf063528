//! Locomotion state and per-tick input structures.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::cooldown::Cooldowns;
use super::grapple::GrappleLink;

/// Which side of the player a wall is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// +1 for right, -1 for left, 0 for none.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// How the player is currently supported.
///
/// Exactly one mode holds per tick, so being grounded and wall-running at the
/// same time is unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Locomotion {
    /// Standing on a movement volume.
    Grounded,

    /// Free fall.
    #[default]
    Airborne,

    /// Running along a wall.
    WallAttached {
        /// Side of the player the wall is on.
        side: WallSide,
        /// Outward normal of the wall face.
        normal: Vec3,
        /// Time spent attached so far (seconds).
        attached_for: f32,
    },

    /// Swinging toward a grapple anchor.
    Grappling {
        /// Fixed world point picked by the grapple ray.
        anchor: Vec3,
    },
}

impl Locomotion {
    #[inline]
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded)
    }

    #[inline]
    pub fn is_wall_attached(&self) -> bool {
        matches!(self, Self::WallAttached { .. })
    }

    #[inline]
    pub fn is_grappling(&self) -> bool {
        matches!(self, Self::Grappling { .. })
    }
}

/// Complete movement state for the player.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Eye position in world space (center of the player cylinder).
    pub position: Vec3,

    /// Velocity in world space (units/second).
    pub velocity: Vec3,

    /// Current locomotion mode.
    pub mode: Locomotion,

    /// Seconds since the player last landed.
    pub air_time: f32,

    /// Rate-limit timestamps for discrete actions.
    pub cooldowns: Cooldowns,

    /// Visual grapple line, recomputed every tick while grappling.
    pub grapple_link: Option<GrappleLink>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mode: Locomotion::Airborne,
            air_time: 0.0,
            cooldowns: Cooldowns::new(),
            grapple_link: None,
        }
    }
}

impl PlayerState {
    /// Create a new state at the given eye position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.mode.is_grounded()
    }

    #[inline]
    pub fn wall_attached(&self) -> bool {
        self.mode.is_wall_attached()
    }

    #[inline]
    pub fn grappling(&self) -> bool {
        self.mode.is_grappling()
    }

    /// Grapple anchor, present exactly while grappling.
    pub fn grapple_anchor(&self) -> Option<Vec3> {
        match self.mode {
            Locomotion::Grappling { anchor } => Some(anchor),
            _ => None,
        }
    }

    /// Wall side, `WallSide::None` unless wall-running.
    pub fn wall_side(&self) -> WallSide {
        match self.mode {
            Locomotion::WallAttached { side, .. } => side,
            _ => WallSide::None,
        }
    }

    /// Get current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        horizontal(self.velocity).length()
    }

    /// Put the player back at `position` at rest, dropping every transient
    /// mode. Cooldown timestamps are kept.
    pub fn reset_to(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.mode = Locomotion::Airborne;
        self.air_time = 0.0;
        self.grapple_link = None;
    }
}

/// The horizontal (X/Z) part of a vector.
#[inline]
pub(crate) fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Discrete actions delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Jump,
    Grapple,
    TrickA,
    TrickB,
    TrickC,
    TrickD,
}

impl Action {
    /// Every action in processing order.
    pub const ALL: [Action; 6] = [
        Action::Jump,
        Action::Grapple,
        Action::TrickA,
        Action::TrickB,
        Action::TrickC,
        Action::TrickD,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of actions fired this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet(u8);

impl ActionSet {
    /// Empty set.
    pub const NONE: Self = Self(0);

    /// Add an action.
    #[inline]
    pub fn fire(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    /// Builder form of [`ActionSet::fire`].
    #[inline]
    pub fn with(mut self, action: Action) -> Self {
        self.fire(action);
        self
    }

    #[inline]
    pub fn contains(self, action: Action) -> bool {
        (self.0 & action.bit()) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Fired actions in processing order.
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |action| self.contains(*action))
    }
}

/// Held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys(pub u8);

impl HeldKeys {
    pub const FORWARD: u8 = 1 << 0;
    pub const BACK: u8 = 1 << 1;
    pub const LEFT: u8 = 1 << 2;
    pub const RIGHT: u8 = 1 << 3;

    /// Check if a key is held.
    #[inline]
    pub fn held(self, key: u8) -> bool {
        (self.0 & key) != 0
    }

    /// Press a key.
    #[inline]
    pub fn press(&mut self, key: u8) {
        self.0 |= key;
    }

    /// Release a key.
    #[inline]
    pub fn release(&mut self, key: u8) {
        self.0 &= !key;
    }

    /// Net (forward, right) axes in -1..=1. Opposite keys cancel.
    pub fn axes(self) -> (f32, f32) {
        let axis = |positive: u8, negative: u8| {
            self.held(positive) as i8 as f32 - self.held(negative) as i8 as f32
        };
        (
            axis(Self::FORWARD, Self::BACK),
            axis(Self::RIGHT, Self::LEFT),
        )
    }
}

/// Everything the input source hands the kernel for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Movement keys currently held.
    pub held: HeldKeys,

    /// Discrete actions fired since the previous tick.
    pub actions: ActionSet,

    /// Unit look direction, owned by the camera.
    pub look_direction: Vec3,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            held: HeldKeys::default(),
            actions: ActionSet::NONE,
            look_direction: Vec3::NEG_Z,
        }
    }
}

impl InputFrame {
    /// An idle frame looking along `look_direction`.
    pub fn looking(look_direction: Vec3) -> Self {
        Self {
            look_direction,
            ..Default::default()
        }
    }

    /// Horizontal forward vector from the look direction, or zero when
    /// looking straight up or down.
    pub fn forward(&self) -> Vec3 {
        horizontal(self.look_direction).normalize_or_zero()
    }

    /// Horizontal right vector (forward × up), or zero.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_are_exclusive() {
        let mut state = PlayerState::new(Vec3::ZERO);
        state.mode = Locomotion::Grounded;
        assert!(state.grounded() && !state.wall_attached());

        state.mode = Locomotion::WallAttached {
            side: WallSide::Left,
            normal: Vec3::X,
            attached_for: 0.0,
        };
        assert!(!state.grounded() && state.wall_attached());
        assert_eq!(state.wall_side(), WallSide::Left);
    }

    #[test]
    fn test_grapple_anchor_follows_mode() {
        let mut state = PlayerState::new(Vec3::ZERO);
        assert_eq!(state.grapple_anchor(), None);

        state.mode = Locomotion::Grappling { anchor: Vec3::ONE };
        assert!(state.grappling());
        assert_eq!(state.grapple_anchor(), Some(Vec3::ONE));
    }

    #[test]
    fn test_action_set() {
        let set = ActionSet::NONE.with(Action::TrickC).with(Action::Jump);
        assert!(set.contains(Action::Jump));
        assert!(!set.contains(Action::Grapple));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Action::Jump, Action::TrickC]);
    }

    #[test]
    fn test_held_keys_cancel() {
        let mut keys = HeldKeys::default();
        keys.press(HeldKeys::FORWARD);
        keys.press(HeldKeys::BACK);
        keys.press(HeldKeys::LEFT);
        assert_eq!(keys.axes(), (0.0, -1.0));
    }

    #[test]
    fn test_frame_directions() {
        // Looking down -Z, right is +X
        let frame = InputFrame::looking(Vec3::new(0.0, -0.5, -1.0));
        assert!((frame.forward() - Vec3::NEG_Z).length() < 1e-5);
        assert!((frame.right() - Vec3::X).length() < 1e-5);

        // Straight down has no horizontal forward
        assert_eq!(InputFrame::looking(Vec3::NEG_Y).forward(), Vec3::ZERO);
    }

    #[test]
    fn test_reset_clears_transients() {
        let mut state = PlayerState::new(Vec3::new(0.0, -31.0, 0.0));
        state.velocity = Vec3::new(3.0, -40.0, 1.0);
        state.mode = Locomotion::Grappling { anchor: Vec3::ONE };
        state.air_time = 4.0;

        state.reset_to(Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(state.position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(state.mode, Locomotion::Airborne);
        assert!(state.grapple_link.is_none());
    }
}
