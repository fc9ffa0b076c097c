use serde::Serialize;

use super::{heading, Body};
use crate::constants::{
    SHURIKEN_ALPHA, SHURIKEN_CRUISE_DRAG_BASE, SHURIKEN_FADE_AGE, SHURIKEN_FADE_DRAG_BASE,
    SHURIKEN_FADE_RATE, SHURIKEN_RADIUS, SHURIKEN_SPEED, SHURIKEN_SPIN_DECAY_BASE,
    SHURIKEN_SPIN_SPEED,
};
use crate::cue::{EffectQueue, ParticleKind, SparkStyle};
use crate::enemy::EnemyId;
use crate::physics::{decay, decay_pose};
use crate::pose::Pose;

/// Spinning star that passes through enemies and fades out after cruising.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shuriken {
    pub(crate) body: Body,
    spin_speed: f32,
    alpha: f32,
    struck: Vec<EnemyId>,
}

impl Shuriken {
    /// Spawns a star at `origin` flying exactly along `direction`.
    #[must_use]
    pub fn spawn(origin: Pose, direction: Pose, damage: f32) -> Self {
        let velocity = heading(direction).scale_to(SHURIKEN_SPEED);
        let facing = velocity.angle_of_position_degrees();
        Self {
            body: Body::new(
                Pose::with_angle(origin.x, origin.y, facing),
                velocity,
                SHURIKEN_RADIUS,
                damage,
            ),
            spin_speed: SHURIKEN_SPIN_SPEED,
            alpha: SHURIKEN_ALPHA,
            struck: Vec::new(),
        }
    }

    /// Shared projectile state.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Opacity in `[0, 255]`.
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Spin in degrees per second.
    #[must_use]
    pub const fn spin_speed(&self) -> f32 {
        self.spin_speed
    }

    /// Whether `enemy` was already hit by this star.
    #[must_use]
    pub fn has_struck(&self, enemy: EnemyId) -> bool {
        self.struck.contains(&enemy)
    }

    fn fading(&self) -> bool {
        self.body.age > SHURIKEN_FADE_AGE
    }

    pub(crate) fn update(&mut self, dt: f32) {
        let drag = if self.fading() {
            SHURIKEN_FADE_DRAG_BASE
        } else {
            SHURIKEN_CRUISE_DRAG_BASE
        };
        decay_pose(&mut self.body.velocity, drag, dt);
        self.body.step(dt);
        self.body.position.angle += self.spin_speed * dt;
        if self.fading() {
            self.spin_speed = decay(self.spin_speed, SHURIKEN_SPIN_DECAY_BASE, dt);
            self.alpha -= SHURIKEN_FADE_RATE * dt;
        }
        if self.alpha < 0.0 {
            self.body.destroy();
        }
    }

    /// Records the strike and throws grey sparks; the star keeps flying.
    pub(crate) fn hit(&mut self, enemy: EnemyId, effects: &mut EffectQueue) {
        self.struck.push(enemy);
        effects.burst(
            ParticleKind::Spark(SparkStyle::Steel),
            self.body.position,
            Pose::ZERO,
            12,
        );
    }
}
