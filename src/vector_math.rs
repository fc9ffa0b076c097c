//! Angle helpers shared by aim smoothing, spin and spawn jitter.
//! All angles here are degrees unless the name says otherwise.
use glam::Vec2;
use ordered_float::OrderedFloat;

/// Returns the magnitude of a 2D vector expressed by its components.
///
/// # Examples
/// ```
/// use rollbrawl::vector_math::vec_mag;
/// assert!((vec_mag(3.0, 4.0) - 5.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn vec_mag(x: f32, y: f32) -> f32 {
    Vec2::new(x, y).length()
}

/// Returns the unit vector in the direction of the supplied components.
///
/// Non-finite or zero input yields `(0.0, 0.0)`.
///
/// # Examples
///
/// ```
/// use rollbrawl::vec_normalize;
/// let (nx, ny) = vec_normalize(3.0, 4.0);
/// assert!((nx - 0.6).abs() < 1e-6);
/// assert!((ny - 0.8).abs() < 1e-6);
/// assert_eq!(vec_normalize(0.0, 0.0), (0.0, 0.0));
/// ```
#[must_use]
pub fn vec_normalize(x: f32, y: f32) -> (f32, f32) {
    let vector = Vec2::new(x, y);
    if !vector.is_finite() {
        return (0.0, 0.0);
    }
    let normalised = vector.try_normalize().unwrap_or(Vec2::ZERO);
    (normalised.x, normalised.y)
}

/// Picks the shortest signed representative of `delta` among
/// `{delta - 360, delta, delta + 360}`.
///
/// Blending toward a target through this value never takes the long way
/// around the circle when the raw difference crosses the 0/360 seam.
///
/// # Examples
/// ```
/// use rollbrawl::vector_math::shortest_delta;
/// assert!((shortest_delta(350.0) - -10.0).abs() < 1e-4);
/// assert!((shortest_delta(-350.0) - 10.0).abs() < 1e-4);
/// assert!((shortest_delta(20.0) - 20.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn shortest_delta(delta: f32) -> f32 {
    [delta - 360.0, delta, delta + 360.0]
        .into_iter()
        .min_by_key(|candidate| OrderedFloat(candidate.abs()))
        .unwrap_or(delta)
}

/// Wraps an angle into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Moves `current` toward `target` by `rate * delta * dt`, where `delta` is
/// the shortest signed difference, capping the per-second turn at
/// `max_rate` when given and never overshooting the target.
///
/// The result is wrapped into `[0, 360)`.
#[must_use]
pub fn approach_angle(current: f32, target: f32, rate: f32, max_rate: Option<f32>, dt: f32) -> f32 {
    let delta = shortest_delta(current - target);
    let mut change = delta * rate;
    if let Some(cap) = max_rate {
        if change.abs() > cap {
            change *= cap / change.abs();
        }
    }
    change *= dt;
    if change.abs() > delta.abs() && delta != 0.0 {
        change *= delta.abs() / change.abs();
    }
    wrap_degrees(current - change)
}

/// Screen-space unit vector for an angle in radians (+y is down).
#[must_use]
pub fn screen_unit(radians: f32) -> Vec2 {
    Vec2::new(radians.cos(), -radians.sin())
}
