//! Two-dimensional pose value type.
//!
//! A [`Pose`] is a screen-space position (`+y` points down) paired with an
//! independent orientation in degrees, counter-clockwise from `+x`. It doubles
//! as the velocity and direction vector type throughout the simulation. Every
//! operation returns a new value; callers copy instead of sharing.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::vector_math::screen_unit;

/// Position plus orientation. See the module docs for conventions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component, growing downwards.
    pub y: f32,
    /// Orientation in degrees.
    pub angle: f32,
}

impl Pose {
    /// The origin with no rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a pose at `(x, y)` with zero angle.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, angle: 0.0 }
    }

    /// Creates a pose at `(x, y)` with the given angle.
    #[must_use]
    pub const fn with_angle(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, angle }
    }

    /// Builds a position from polar coordinates: `radius` along
    /// `theta_degrees`, using the screen convention (`+y` is down, so
    /// 90° points up).
    ///
    /// # Examples
    /// ```
    /// use rollbrawl::Pose;
    /// let up = Pose::polar(10.0, 90.0);
    /// assert!(up.x.abs() < 1e-4);
    /// assert!((up.y + 10.0).abs() < 1e-4);
    /// ```
    #[must_use]
    pub fn polar(radius: f32, theta_degrees: f32) -> Self {
        let unit = screen_unit(theta_degrees.to_radians());
        Self::new(unit.x * radius, unit.y * radius)
    }

    /// Pose at `v` with zero angle.
    #[must_use]
    pub const fn from_vec2(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Position part as a `glam` vector.
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Position part as a tuple.
    #[must_use]
    pub const fn position(self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Length of the position part.
    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.to_vec2().length()
    }

    /// Euclidean distance between the position parts.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }

    /// Angle of the position vector in radians, `atan2(-y, x)`.
    #[must_use]
    pub fn angle_of_position(self) -> f32 {
        (-self.y).atan2(self.x)
    }

    /// Angle of the position vector in degrees, `atan2(-y, x)`.
    ///
    /// # Examples
    /// ```
    /// use rollbrawl::Pose;
    /// assert!((Pose::new(0.0, -5.0).angle_of_position_degrees() - 90.0).abs() < 1e-4);
    /// ```
    #[must_use]
    pub fn angle_of_position_degrees(self) -> f32 {
        self.angle_of_position().to_degrees()
    }

    /// Screen-space unit vector pointing along this pose's `angle`.
    #[must_use]
    pub fn unit_vector(self) -> (f32, f32) {
        let unit = screen_unit(self.angle.to_radians());
        (unit.x, unit.y)
    }

    /// Rescales the position part to length `magnitude`, keeping the angle.
    ///
    /// A zero vector has no direction, so it becomes `(magnitude, 0)`.
    ///
    /// # Examples
    /// ```
    /// use rollbrawl::Pose;
    /// let v = Pose::ZERO.scale_to(5.0);
    /// assert_eq!((v.x, v.y), (5.0, 0.0));
    /// ```
    #[must_use]
    pub fn scale_to(self, magnitude: f32) -> Self {
        let current = self.magnitude();
        if current == 0.0 || !current.is_finite() {
            return Self::with_angle(magnitude, 0.0, self.angle);
        }
        let k = magnitude / current;
        Self::with_angle(self.x * k, self.y * k, self.angle)
    }

    /// Scales the position part only.
    #[must_use]
    pub fn scale_position(self, k: f32) -> Self {
        Self::with_angle(self.x * k, self.y * k, self.angle)
    }

    /// Rotates the position part by `degrees` in screen space.
    ///
    /// # Examples
    /// ```
    /// use rollbrawl::Pose;
    /// let r = Pose::new(1.0, 0.0).rotate(90.0);
    /// assert!(r.x.abs() < 1e-5 && (r.y + 1.0).abs() < 1e-5);
    /// ```
    #[must_use]
    pub fn rotate(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::with_angle(
            self.x * cos + self.y * sin,
            -self.x * sin + self.y * cos,
            self.angle,
        )
    }

    /// Adds `other * weight`, optionally expressing `other` in the rotated
    /// frame of `frame` first. Angles add with the same weight.
    #[must_use]
    pub fn add_weighted(self, other: Self, weight: f32, frame: Option<Self>) -> Self {
        let framed = frame.map_or(other, |f| other.rotate(f.angle));
        Self::with_angle(
            self.x + framed.x * weight,
            self.y + framed.y * weight,
            self.angle + framed.angle * weight,
        )
    }

    /// Component-wise power that keeps each component's sign.
    #[must_use]
    pub fn signed_pow(self, exponent: f32) -> Self {
        let pow = |v: f32| v.abs().powf(exponent).copysign(v);
        Self::with_angle(pow(self.x), pow(self.y), self.angle)
    }

    /// Weighted blend `self * weight + other * (1 - weight)` of positions.
    #[must_use]
    pub fn blend(self, other: Self, weight: f32) -> Self {
        Self::new(
            self.x * weight + other.x * (1.0 - weight),
            self.y * weight + other.y * (1.0 - weight),
        )
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.angle.is_finite()
    }
}

impl Add for Pose {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_weighted(other, 1.0, None)
    }
}

impl Sub for Pose {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.add_weighted(other, -1.0, None)
    }
}

/// Scales position and angle alike.
impl Mul<f32> for Pose {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        Self::with_angle(self.x * k, self.y * k, self.angle * k)
    }
}

impl Neg for Pose {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl AddAssign for Pose {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Pose {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl MulAssign<f32> for Pose {
    fn mul_assign(&mut self, k: f32) {
        *self = *self * k;
    }
}

impl From<(f32, f32)> for Pose {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Pose> for (f32, f32) {
    fn from(pose: Pose) -> Self {
        pose.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    fn frame_rebasing_rotates_before_adding() {
        let frame = Pose::with_angle(0.0, 0.0, 90.0);
        let moved = Pose::ZERO.add_weighted(Pose::new(10.0, 0.0), 1.0, Some(frame));
        assert_abs_diff_eq!(moved.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(moved.y, -10.0, epsilon = 1e-4);
    }

    #[rstest]
    fn unframed_addition_weights_every_component() {
        let sum = Pose::with_angle(1.0, 1.0, 10.0).add_weighted(Pose::with_angle(2.0, 4.0, 6.0), 0.5, None);
        assert_eq!(sum, Pose::with_angle(2.0, 3.0, 13.0));
    }

    #[rstest]
    fn subtraction_is_component_wise() {
        let d = Pose::with_angle(5.0, 7.0, 30.0) - Pose::with_angle(1.0, 2.0, 10.0);
        assert_eq!(d, Pose::with_angle(4.0, 5.0, 20.0));
    }

    #[rstest]
    fn scale_to_keeps_direction() {
        let v = Pose::new(3.0, 4.0).scale_to(10.0);
        assert_abs_diff_eq!(v.x, 6.0, epsilon = 1e-5);
        assert_abs_diff_eq!(v.y, 8.0, epsilon = 1e-5);
    }

    #[rstest]
    fn signed_pow_preserves_sign() {
        let p = Pose::new(-4.0, 9.0).signed_pow(0.5);
        assert_abs_diff_eq!(p.x, -2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 3.0, epsilon = 1e-5);
    }

    #[rstest]
    fn polar_round_trips_through_angle() {
        let p = Pose::polar(1.0, 135.0);
        assert_abs_diff_eq!(p.angle_of_position_degrees(), 135.0, epsilon = 1e-3);
    }
}
