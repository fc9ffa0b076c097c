//! Movement states and facing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Movement state machine. `Dead` is only left through a session restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    /// Standing; input steers.
    #[default]
    Idle,
    /// Steering toward held keys.
    Walking,
    /// Dodge roll; steering ignored.
    Rolling,
    /// Hurt recoil; steering ignored.
    TakingDamage,
    /// Out of health.
    Dead,
}

impl MovementState {
    /// States in which input steers the player.
    #[must_use]
    pub const fn accepts_steering(self) -> bool {
        !matches!(self, Self::Rolling | Self::TakingDamage)
    }
}

/// Last horizontal direction the player faced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Facing +x.
    #[default]
    Right,
    /// Facing -x.
    Left,
}

impl Facing {
    /// Left for negative `x`, right otherwise.
    #[must_use]
    pub fn from_x(x: f32) -> Self {
        if x < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Unit step along x.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Right => "Right",
            Self::Left => "Left",
        })
    }
}
