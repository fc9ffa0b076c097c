//! Projectile families and the per-session active set.
//!
//! Each variant embeds a shared [`Body`] and layers its own motion law on
//! top. Destruction is one-way and pruning happens once per tick, after
//! movement and collisions.

mod bread;
mod bullet;
mod shuriken;

pub use bread::Bread;
pub use bullet::Bullet;
pub use shuriken::Shuriken;

use rand::Rng;
use serde::Serialize;

use crate::constants::SPAWN_JITTER_SPREAD;
use crate::cue::EffectQueue;
use crate::enemy::{Enemy, EnemyId};
use crate::physics::advance;
use crate::pose::Pose;

/// State every projectile carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    /// Position; `angle` is the sprite orientation in degrees.
    pub position: Pose,
    /// Velocity in units per second.
    pub velocity: Pose,
    /// Seconds since launch.
    pub age: f32,
    /// Hit radius.
    pub radius: f32,
    /// Damage dealt per strike.
    pub damage: f32,
    destroyed: bool,
}

impl Body {
    /// Fresh body with zero age.
    #[must_use]
    pub const fn new(position: Pose, velocity: Pose, radius: f32, damage: f32) -> Self {
        Self {
            position,
            velocity,
            age: 0.0,
            radius,
            damage,
            destroyed: false,
        }
    }

    /// Marks the body destroyed. There is no way back.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Whether the body awaits pruning.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Drifts along the velocity and ages by `dt`.
    pub fn step(&mut self, dt: f32) {
        advance(&mut self.position, self.velocity, dt);
        self.age += dt;
    }

    /// Magnitude of the velocity.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

/// Unit heading along `direction`; a zero direction falls back to `+x`.
pub(crate) fn heading(direction: Pose) -> Pose {
    let base = if direction.magnitude() == 0.0 {
        Pose::new(1.0, 0.0)
    } else {
        direction
    };
    let angle = base.angle_of_position();
    Pose::new(angle.cos(), -angle.sin())
}

/// [`heading`] rotated by a uniform angle in `[-SPREAD/2, SPREAD/2)`.
pub(crate) fn jittered_heading<R: Rng + ?Sized>(direction: Pose, rng: &mut R) -> Pose {
    let jitter = rng.random::<f32>() * SPAWN_JITTER_SPREAD - SPAWN_JITTER_SPREAD / 2.0;
    let angle = heading(direction).angle_of_position() + jitter;
    Pose::new(angle.cos(), -angle.sin())
}

/// One active projectile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Projectile {
    /// Straight-flying round.
    Bullet(Bullet),
    /// Lobbed loaf.
    Bread(Bread),
    /// Spinning star.
    Shuriken(Shuriken),
}

impl Projectile {
    /// Shared state of the variant.
    #[must_use]
    pub const fn body(&self) -> &Body {
        match self {
            Self::Bullet(bullet) => &bullet.body,
            Self::Bread(bread) => &bread.body,
            Self::Shuriken(star) => &star.body,
        }
    }

    /// Mutable shared state.
    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Self::Bullet(bullet) => &mut bullet.body,
            Self::Bread(bread) => &mut bread.body,
            Self::Shuriken(star) => &mut star.body,
        }
    }

    /// Whether the projectile awaits pruning.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.body().is_destroyed()
    }

    /// Advances the variant's motion law by `dt`.
    pub fn update(&mut self, dt: f32, effects: &mut EffectQueue) {
        match self {
            Self::Bullet(bullet) => bullet.update(dt),
            Self::Bread(bread) => bread.update(dt, effects),
            Self::Shuriken(star) => star.update(dt),
        }
    }

    /// Whether a hit on `enemy` should register. Shuriken strike each enemy once.
    #[must_use]
    pub fn can_strike(&self, enemy: EnemyId) -> bool {
        match self {
            Self::Shuriken(star) => !star.has_struck(enemy),
            Self::Bullet(_) | Self::Bread(_) => true,
        }
    }

    /// Variant reaction to touching `enemy`. Damage is dealt by the caller.
    pub fn hit<E: Enemy>(&mut self, enemy: &mut E, effects: &mut EffectQueue) {
        match self {
            Self::Bullet(bullet) => bullet.hit(enemy, effects),
            Self::Bread(bread) => bread.bounce(effects),
            Self::Shuriken(star) => star.hit(enemy.id(), effects),
        }
    }
}

/// The active projectile collection owned by a session.
#[derive(Debug, Default)]
pub struct ProjectileSet {
    items: Vec<Projectile>,
}

impl ProjectileSet {
    /// Adds one projectile.
    pub fn push(&mut self, projectile: Projectile) {
        self.items.push(projectile);
    }

    /// Adds several projectiles.
    pub fn extend<I>(&mut self, projectiles: I)
    where
        I: IntoIterator<Item = Projectile>,
    {
        self.items.extend(projectiles);
    }

    /// Projectiles in launch order.
    pub fn iter(&self) -> std::slice::Iter<'_, Projectile> {
        self.items.iter()
    }

    /// Mutable projectiles in launch order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Projectile> {
        self.items.iter_mut()
    }

    /// Advances every live projectile. Destroyed ones stay until [`Self::prune`].
    pub fn advance(&mut self, dt: f32, effects: &mut EffectQueue) {
        for projectile in self.items.iter_mut().filter(|p| !p.is_destroyed()) {
            projectile.update(dt, effects);
        }
    }

    /// Drops destroyed projectiles and returns how many went.
    pub fn prune(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|p| !p.is_destroyed());
        before - self.items.len()
    }

    /// Number of projectiles, destroyed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every projectile.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a ProjectileSet {
    type Item = &'a Projectile;
    type IntoIter = std::slice::Iter<'a, Projectile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    fn zero_direction_heads_along_x() {
        let unit = heading(Pose::ZERO);
        assert_abs_diff_eq!(unit.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(unit.y, 0.0, epsilon = 1e-6);
    }

    #[rstest]
    fn jitter_stays_within_spread() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let unit = jittered_heading(Pose::new(0.0, -3.0), &mut rng);
            let offset = unit.angle_of_position() - std::f32::consts::FRAC_PI_2;
            assert!(offset.abs() <= SPAWN_JITTER_SPREAD / 2.0 + 1e-5);
            assert_abs_diff_eq!(unit.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[rstest]
    fn prune_removes_only_destroyed() {
        let mut set = ProjectileSet::default();
        set.push(Projectile::Shuriken(Shuriken::spawn(Pose::ZERO, Pose::new(1.0, 0.0), 30.0)));
        set.push(Projectile::Shuriken(Shuriken::spawn(Pose::ZERO, Pose::new(0.0, 1.0), 30.0)));
        if let Some(first) = set.iter_mut().next() {
            first.body_mut().destroy();
        }
        assert_eq!(set.prune(), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.prune(), 0);
    }
}
