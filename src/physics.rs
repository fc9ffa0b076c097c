//! Physics helper functions.
//!
//! Position drift, speed caps and frame-rate independent damping shared by
//! the player and every projectile kind. Damping is always expressed as a
//! per-second base raised to `dt`, so the result does not depend on how a
//! second is sliced into ticks.

use log::warn;

use crate::pose::Pose;

/// Normalises a tick duration: non-finite or negative values become `0`.
///
/// # Examples
///
/// ```
/// use rollbrawl::physics::sanitize_dt;
/// assert_eq!(sanitize_dt(0.016), 0.016);
/// assert_eq!(sanitize_dt(-1.0), 0.0);
/// assert_eq!(sanitize_dt(f32::NAN), 0.0);
/// ```
#[must_use]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        warn!("ignoring invalid tick duration {dt}");
        0.0
    }
}

/// Constant-velocity drift: `position += velocity * dt`.
///
/// Only the positional parts move; angles are left untouched. Callers apply
/// any acceleration to `velocity` first, which makes the step semi-implicit.
///
/// # Examples
///
/// ```
/// use rollbrawl::{physics::advance, Pose};
/// let mut position = Pose::ZERO;
/// advance(&mut position, Pose::new(10.0, 20.0), 0.5);
/// assert_eq!(position.position(), (5.0, 10.0));
/// ```
pub fn advance(position: &mut Pose, velocity: Pose, dt: f32) {
    let step = sanitize_dt(dt);
    *position = position.add_weighted(Pose::from_vec2(velocity.to_vec2()), step, None);
}

/// Returns the multiplier `base^dt` for a per-second decay `base`.
///
/// # Examples
///
/// ```
/// use rollbrawl::physics::decay_factor;
/// assert!((decay_factor(0.5, 2.0) - 0.25).abs() < 1e-6);
/// assert_eq!(decay_factor(0.5, 0.0), 1.0);
/// ```
#[must_use]
pub fn decay_factor(base: f32, dt: f32) -> f32 {
    base.powf(sanitize_dt(dt))
}

/// Decays a scalar by `base^dt`.
#[must_use]
pub fn decay(value: f32, base: f32, dt: f32) -> f32 {
    value * decay_factor(base, dt)
}

/// Decays the positional part of a velocity by `base^dt`.
pub fn decay_pose(velocity: &mut Pose, base: f32, dt: f32) {
    *velocity = velocity.scale_position(decay_factor(base, dt));
}

/// Caps the magnitude of `velocity` at `cap`, keeping its direction.
///
/// Returns `true` when the velocity was reduced.
pub fn clamp_speed(velocity: &mut Pose, cap: f32) -> bool {
    if velocity.magnitude() > cap {
        *velocity = velocity.scale_to(cap);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::sixty_hz(60)]
    #[case::one_forty_four_hz(144)]
    #[case::ten_hz(10)]
    fn decay_is_tick_rate_independent(#[case] ticks: u16) {
        let dt = 1.0 / f32::from(ticks);
        let mut v = Pose::new(100.0, 0.0);
        for _ in 0..ticks {
            decay_pose(&mut v, 0.5, dt);
        }
        assert_relative_eq!(v.x, 50.0, epsilon = 1e-2);
    }

    #[rstest]
    fn clamp_keeps_direction() {
        let mut v = Pose::new(300.0, -400.0);
        assert!(clamp_speed(&mut v, 100.0));
        assert_relative_eq!(v.x, 60.0, epsilon = 1e-4);
        assert_relative_eq!(v.y, -80.0, epsilon = 1e-4);
        assert!(!clamp_speed(&mut v, 200.0));
    }

    #[rstest]
    fn drift_leaves_angle_alone() {
        let mut p = Pose::with_angle(0.0, 0.0, 45.0);
        advance(&mut p, Pose::with_angle(1.0, 1.0, 90.0), 1.0);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.angle, 45.0);
    }

    #[rstest]
    #[case::infinite(f32::INFINITY)]
    #[case::nan(f32::NAN)]
    #[case::negative(-0.5)]
    fn invalid_dt_freezes_motion(#[case] dt: f32) {
        let mut p = Pose::new(3.0, 4.0);
        advance(&mut p, Pose::new(10.0, 10.0), dt);
        assert_eq!(p, Pose::new(3.0, 4.0));
    }
}
