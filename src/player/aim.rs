//! Arm and aim tracking toward the cursor.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIM_KNOCKBACK_DRAG, AIM_KNOCKBACK_FLOOR, AIM_SMOOTHING_RATE, ARM_MAX_TURN_RATE,
    ARM_SMOOTHING_RATE, INITIAL_AIM_DISTANCE,
};
use crate::pose::Pose;
use crate::vector_math::{approach_angle, wrap_degrees};
use crate::weapon::WeaponKind;

/// Smoothed aim state.
///
/// `aim_angle` drives the weapon sprite and `arm_angle` the muzzle position.
/// Both are degrees in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimState {
    /// Weapon sprite angle.
    pub aim_angle: f32,
    /// Muzzle angle; lags the aim.
    pub arm_angle: f32,
    /// Arm length from the body centre.
    pub aim_distance: f32,
    /// Visual recoil pulling the arm in; never negative.
    pub aim_knockback: f32,
    /// Rate of change of `aim_knockback`.
    pub knockback_velocity: f32,
}

impl Default for AimState {
    fn default() -> Self {
        Self {
            aim_angle: 0.0,
            arm_angle: 0.0,
            aim_distance: INITIAL_AIM_DISTANCE,
            aim_knockback: 0.0,
            knockback_velocity: 0.0,
        }
    }
}

impl AimState {
    /// Points both angles straight at `angle` and resets the arm kick.
    pub fn snap_to(&mut self, angle: f32) {
        let wrapped = wrap_degrees(angle);
        self.aim_angle = wrapped;
        self.arm_angle = wrapped;
        self.aim_knockback = 0.0;
    }

    /// Eases toward `target` degrees and integrates the arm kick.
    pub fn track(&mut self, target: f32, dt: f32) {
        self.aim_angle = approach_angle(self.aim_angle, target, AIM_SMOOTHING_RATE, None, dt);
        self.arm_angle = approach_angle(
            self.arm_angle,
            target,
            ARM_SMOOTHING_RATE,
            Some(ARM_MAX_TURN_RATE),
            dt,
        );
        self.aim_knockback += self.knockback_velocity * dt;
        if self.knockback_velocity > AIM_KNOCKBACK_FLOOR {
            self.knockback_velocity -= AIM_KNOCKBACK_DRAG * dt;
        }
        self.aim_knockback = self.aim_knockback.max(0.0);
    }

    /// Hand offset from the body centre for the held weapon.
    ///
    /// The knife is held at double reach and the gatling slightly further
    /// out and lower.
    #[must_use]
    pub fn hand_offset(&self, weapon: WeaponKind) -> Pose {
        let reach = Pose::polar(self.aim_distance - self.aim_knockback, self.arm_angle);
        match weapon {
            WeaponKind::Knife => reach.scale_position(2.0),
            WeaponKind::Gatling => reach.scale_position(1.25) + Pose::new(0.0, 30.0),
            _ => reach,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    fn kick_decays_and_never_goes_negative() {
        let mut aim = AimState {
            knockback_velocity: 1500.0,
            ..AimState::default()
        };
        aim.track(0.0, 0.01);
        assert_abs_diff_eq!(aim.aim_knockback, 15.0, epsilon = 1e-4);
        for _ in 0..100 {
            aim.track(0.0, 0.01);
            assert!(aim.aim_knockback >= 0.0);
        }
        assert_abs_diff_eq!(aim.aim_knockback, 0.0);
        assert!(aim.knockback_velocity <= AIM_KNOCKBACK_FLOOR);
    }

    #[rstest]
    fn arm_leads_aim() {
        let mut aim = AimState::default();
        aim.track(90.0, 0.01);
        // Arm: 9000 deg/s capped to 1000 -> 10. Aim: 90 * 25 * 0.01 = 22.5.
        assert_abs_diff_eq!(aim.arm_angle, 10.0, epsilon = 1e-3);
        assert_abs_diff_eq!(aim.aim_angle, 22.5, epsilon = 1e-3);
    }

    #[rstest]
    fn knife_is_held_further_out() {
        let aim = AimState::default();
        let knife = aim.hand_offset(WeaponKind::Knife);
        let gun = aim.hand_offset(WeaponKind::Gun);
        assert_abs_diff_eq!(knife.x, 2.0 * gun.x, epsilon = 1e-4);
    }
}
