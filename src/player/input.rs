//! One tick's worth of player input.

use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// Held keys, edge-triggered actions and the cursor in screen space.
///
/// `roll` and `restart` are presses that happened during the tick; `fire`
/// is the held state of the fire button.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputFrame {
    /// Up key held.
    pub up: bool,
    /// Down key held.
    pub down: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
    /// Roll pressed this tick.
    pub roll: bool,
    /// Fire button held.
    pub fire: bool,
    /// Restart pressed this tick.
    pub restart: bool,
    /// Cursor in screen space.
    pub cursor: (f32, f32),
}

impl InputFrame {
    /// No keys held, cursor at `(x, y)`.
    #[must_use]
    pub const fn at_cursor(x: f32, y: f32) -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            roll: false,
            fire: false,
            restart: false,
            cursor: (x, y),
        }
    }

    /// Holds the direction keys matching the signs of `x` and `y`.
    #[must_use]
    pub fn moving(mut self, x: f32, y: f32) -> Self {
        self.left = x < 0.0;
        self.right = x > 0.0;
        self.up = y < 0.0;
        self.down = y > 0.0;
        self
    }

    /// Presses roll.
    #[must_use]
    pub const fn rolling(mut self) -> Self {
        self.roll = true;
        self
    }

    /// Holds fire.
    #[must_use]
    pub const fn firing(mut self) -> Self {
        self.fire = true;
        self
    }

    /// Presses restart.
    #[must_use]
    pub const fn restarting(mut self) -> Self {
        self.restart = true;
        self
    }

    /// Sum of the held direction keys; components are -1, 0 or 1.
    ///
    /// # Examples
    /// ```
    /// use rollbrawl::InputFrame;
    /// let input = InputFrame::default().moving(1.0, -1.0);
    /// assert_eq!(input.direction().position(), (1.0, -1.0));
    /// ```
    #[must_use]
    pub fn direction(&self) -> Pose {
        let axis = |negative: bool, positive: bool| f32::from(i8::from(positive) - i8::from(negative));
        Pose::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}
