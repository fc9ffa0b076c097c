use rand::Rng;
use serde::Serialize;

use super::{jittered_heading, Body};
use crate::constants::{
    BREAD_BOUNCE_FACTOR, BREAD_BOUNCE_ZVEL, BREAD_DRAG_BASE, BREAD_GRAVITY, BREAD_LAUNCH_ZVEL,
    BREAD_MAX_AGE, BREAD_RADIUS, BREAD_REST_ANGLE, BREAD_SPEED,
};
use crate::cue::{EffectQueue, ParticleKind, SoundCue};
use crate::physics::decay_pose;
use crate::pose::Pose;

/// Lobbed loaf with simulated height.
///
/// `z` is the height above the floor, negative while airborne (screen up).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bread {
    pub(crate) body: Body,
    z: f32,
    zvel: f32,
    spin_speed: f32,
    landed: bool,
    bounced: bool,
    max_age: f32,
}

impl Bread {
    /// Launches a loaf from `origin` with jitter and a random spin.
    pub fn spawn<R: Rng + ?Sized>(origin: Pose, direction: Pose, damage: f32, rng: &mut R) -> Self {
        let velocity = jittered_heading(direction, &mut *rng).scale_to(BREAD_SPEED);
        let mut facing = velocity.angle_of_position_degrees();
        if velocity.x < 0.0 {
            facing += 180.0;
        }
        let spin_direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            body: Body::new(
                Pose::with_angle(origin.x, origin.y, facing),
                velocity,
                BREAD_RADIUS,
                damage,
            ),
            z: 0.0,
            zvel: BREAD_LAUNCH_ZVEL,
            spin_speed: rng.random::<f32>() * 100.0 + 260.0 * spin_direction,
            landed: false,
            bounced: false,
            max_age: BREAD_MAX_AGE,
        }
    }

    /// Shared projectile state.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Height above the floor.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Spin in degrees per second.
    #[must_use]
    pub const fn spin_speed(&self) -> f32 {
        self.spin_speed
    }

    /// Whether the loaf has come to rest.
    #[must_use]
    pub const fn has_landed(&self) -> bool {
        self.landed
    }

    /// Whether the loaf already bounced off an enemy.
    #[must_use]
    pub const fn has_bounced(&self) -> bool {
        self.bounced
    }

    pub(crate) fn update(&mut self, dt: f32, effects: &mut EffectQueue) {
        self.body.step(dt);
        self.body.position.angle -= self.spin_speed * dt;
        decay_pose(&mut self.body.velocity, BREAD_DRAG_BASE, dt);
        self.zvel += BREAD_GRAVITY * dt;
        self.z += self.zvel * dt;
        if self.z <= 0.0 {
            return;
        }
        self.z = 0.0;
        self.zvel = 0.0;
        if self.body.speed() > 0.0 {
            self.body.velocity = Pose::ZERO;
            effects.burst(
                ParticleKind::Puff,
                self.body.position + Pose::new(0.0, -20.0),
                Pose::ZERO,
                7,
            );
            self.landed = true;
            effects.sound(SoundCue::Bread);
        }
        self.spin_speed = 0.0;
        self.body.position.angle = BREAD_REST_ANGLE;
        if self.body.age > self.max_age {
            self.body.destroy();
        }
    }

    /// Knocks the loaf back the way it came. Only the first call counts.
    pub(crate) fn bounce(&mut self, effects: &mut EffectQueue) {
        if self.bounced {
            return;
        }
        self.bounced = true;
        self.body.velocity = self.body.velocity.scale_position(-BREAD_BOUNCE_FACTOR);
        self.zvel = BREAD_BOUNCE_ZVEL;
        effects.sound(SoundCue::Bread);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::{fixture, rstest};

    const DT: f32 = 1.0 / 60.0;

    #[fixture]
    fn loaf() -> Bread {
        let mut rng = StdRng::seed_from_u64(5);
        Bread::spawn(Pose::new(0.0, 0.0), Pose::new(1.0, 0.0), 0.0, &mut rng)
    }

    #[rstest]
    fn spin_has_a_random_direction(loaf: Bread) {
        assert!((160.0..=360.0).contains(&loaf.spin_speed().abs()));
    }

    #[rstest]
    fn lands_once_then_stays_grounded(mut loaf: Bread) {
        let mut effects = EffectQueue::default();
        while !loaf.has_landed() {
            loaf.update(DT, &mut effects);
            assert!(loaf.z() <= 0.0);
        }
        assert_eq!(loaf.body().velocity, Pose::ZERO);
        assert_abs_diff_eq!(loaf.spin_speed(), 0.0);
        assert_abs_diff_eq!(loaf.body().position.angle, BREAD_REST_ANGLE);
        for _ in 0..120 {
            loaf.update(DT, &mut effects);
            assert_abs_diff_eq!(loaf.z(), 0.0);
        }
        let landings = effects.particles().iter().filter(|p| p.kind == ParticleKind::Puff).count();
        assert_eq!(landings, 1);
    }

    #[rstest]
    fn bounce_is_once_per_flight(mut loaf: Bread) {
        let mut effects = EffectQueue::default();
        loaf.update(DT, &mut effects);
        let before = loaf.body().velocity;
        loaf.bounce(&mut effects);
        loaf.bounce(&mut effects);
        assert!(loaf.has_bounced());
        assert_abs_diff_eq!(loaf.body().velocity.x, -0.8 * before.x, epsilon = 1e-4);
        assert_eq!(effects.cues().len(), 1);
    }

    #[rstest]
    fn airborne_bread_never_times_out(mut loaf: Bread) {
        let mut effects = EffectQueue::default();
        loaf.body.age = BREAD_MAX_AGE + 1.0;
        loaf.update(DT, &mut effects);
        assert!(loaf.z() < 0.0);
        assert!(!loaf.body().is_destroyed());
        while loaf.z() < 0.0 || !loaf.has_landed() {
            loaf.update(DT, &mut effects);
        }
        assert!(loaf.body().is_destroyed());
    }
}
