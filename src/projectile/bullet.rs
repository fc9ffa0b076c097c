use rand::Rng;
use serde::Serialize;

use super::{jittered_heading, Body};
use crate::constants::{
    BULLET_OFFSCREEN_MARGIN, BULLET_RADIUS, BULLET_SPEED, BULLET_VELOCITY_TRANSFER, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use crate::cue::{EffectQueue, ParticleKind, SparkStyle};
use crate::enemy::Enemy;
use crate::pose::Pose;

/// Fast straight-line round fired by the gun and the gatling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bullet {
    pub(crate) body: Body,
}

impl Bullet {
    /// Spawns a bullet at `origin` heading along a jittered `direction`.
    ///
    /// Also drops a casing particle between the muzzle and the `shooter`.
    pub fn spawn<R: Rng + ?Sized>(
        origin: Pose,
        direction: Pose,
        damage: f32,
        shooter: Pose,
        rng: &mut R,
        effects: &mut EffectQueue,
    ) -> Self {
        effects.burst(ParticleKind::Casing, origin.blend(shooter, 0.25), Pose::ZERO, 1);
        let velocity = jittered_heading(direction, rng).scale_to(BULLET_SPEED);
        let facing = velocity.angle_of_position_degrees();
        Self {
            body: Body::new(
                Pose::with_angle(origin.x, origin.y, facing),
                velocity,
                BULLET_RADIUS,
                damage,
            ),
        }
    }

    /// Shared projectile state.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    pub(crate) fn update(&mut self, dt: f32) {
        self.body.step(dt);
        let Pose { x, y, .. } = self.body.position;
        let margin = BULLET_OFFSCREEN_MARGIN;
        if x < -margin || x > WINDOW_WIDTH + margin || y < -margin || y > WINDOW_HEIGHT + margin {
            self.body.destroy();
        }
    }

    /// Consumes the bullet and nudges `enemy` toward the bullet's velocity.
    pub(crate) fn hit<E: Enemy>(&mut self, enemy: &mut E, effects: &mut EffectQueue) {
        self.body.destroy();
        effects.burst(
            ParticleKind::Spark(SparkStyle::Impact),
            self.body.position,
            -self.body.velocity,
            12,
        );
        let relative = self.body.velocity - enemy.velocity();
        enemy.apply_impulse(relative.scale_position(BULLET_VELOCITY_TRANSFER));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::TargetDummy;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bullet() -> Bullet {
        let mut rng = StdRng::seed_from_u64(3);
        let mut effects = EffectQueue::default();
        Bullet::spawn(
            Pose::new(100.0, 100.0),
            Pose::new(1.0, 0.0),
            60.0,
            Pose::new(60.0, 100.0),
            &mut rng,
            &mut effects,
        )
    }

    #[rstest]
    fn spawns_at_full_speed(bullet: Bullet) {
        assert_abs_diff_eq!(bullet.body().speed(), BULLET_SPEED, epsilon = 0.5);
        assert_abs_diff_eq!(bullet.body().damage, 60.0);
    }

    #[rstest]
    fn leaves_play_area_and_stays_destroyed(mut bullet: Bullet) {
        for _ in 0..120 {
            bullet.update(1.0 / 60.0);
        }
        assert!(bullet.body().is_destroyed());
        bullet.body.position = Pose::new(100.0, 100.0);
        bullet.update(1.0 / 60.0);
        assert!(bullet.body().is_destroyed());
    }

    #[rstest]
    fn hit_transfers_a_tenth_of_relative_velocity(mut bullet: Bullet) {
        let mut effects = EffectQueue::default();
        let mut enemy = TargetDummy::new(1, Pose::new(100.0, 100.0));
        let velocity = bullet.body().velocity;
        bullet.hit(&mut enemy, &mut effects);
        assert!(bullet.body().is_destroyed());
        assert_abs_diff_eq!(enemy.velocity().x, velocity.x * 0.1, epsilon = 1e-3);
        assert_abs_diff_eq!(enemy.velocity().y, velocity.y * 0.1, epsilon = 1e-3);
        assert_eq!(effects.particles().len(), 1);
    }
}
