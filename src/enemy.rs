//! Enemy contract consumed by the combat core.
//!
//! Enemy behaviour lives outside this crate. The core only reads the
//! observable state below and calls the damage hooks. [`TargetDummy`] is a
//! passive implementation used by the headless driver and the tests.

use serde::{Deserialize, Serialize};

use crate::physics::{advance, decay_pose};
use crate::pose::Pose;

/// Stable identifier, unique within a session.
pub type EnemyId = u32;

/// Capability tag replacing runtime type checks on enemy subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Ordinary grunt; crushed by a rolling player.
    #[default]
    Generic,
    /// Boss body; survives a rolling player.
    Boss,
    /// Detached boss hand.
    BossHand,
}

/// How an enemy hurts the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackMode {
    /// Contact damage only.
    #[default]
    Normal,
    /// Vertical beam: anything within the corridor around the enemy's x is hit.
    Laser,
}

/// What the simulation needs to know about, and do to, an enemy.
pub trait Enemy {
    /// Session-unique identifier.
    fn id(&self) -> EnemyId;
    /// Capability tag.
    fn kind(&self) -> EnemyKind;
    /// Current attack; contact-only unless overridden.
    fn attack_mode(&self) -> AttackMode {
        AttackMode::Normal
    }
    /// Centre in world units.
    fn position(&self) -> Pose;
    /// Collision radius.
    fn radius(&self) -> f32;
    /// Current velocity.
    fn velocity(&self) -> Pose;
    /// Remaining health.
    fn health(&self) -> f32;
    /// Whether touching this enemy hurts the player.
    fn is_damaging(&self) -> bool;
    /// Already doomed; ignored by every hit test.
    fn is_lethal(&self) -> bool;
    /// Removed at the end of the tick.
    fn is_destroyed(&self) -> bool;
    /// Out of melee reach (e.g. a boss hand lifted off the floor).
    fn is_raised(&self) -> bool;
    /// Subtracts `amount` from health.
    fn take_damage(&mut self, amount: f32);
    /// Flags the enemy for removal.
    fn destroy(&mut self);
    /// Flags the enemy as already doomed.
    fn mark_lethal(&mut self);
    /// Adds `delta` to the enemy's velocity.
    fn apply_impulse(&mut self, delta: Pose);
    /// Reaction to hitting the player with a laser.
    fn swoop_above_player(&mut self) {}
}

/// Passive enemy that drifts with whatever velocity it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDummy {
    id: EnemyId,
    kind: EnemyKind,
    attack_mode: AttackMode,
    position: Pose,
    velocity: Pose,
    radius: f32,
    health: f32,
    damaging: bool,
    lethal: bool,
    destroyed: bool,
    raised: bool,
    swoops: u32,
    damage_taken: f32,
}

impl TargetDummy {
    /// Radius given by [`Self::new`].
    pub const DEFAULT_RADIUS: f32 = 50.0;
    /// Health given by [`Self::new`].
    pub const DEFAULT_HEALTH: f32 = 1000.0;

    /// Damaging generic dummy at rest.
    #[must_use]
    pub const fn new(id: EnemyId, position: Pose) -> Self {
        Self {
            id,
            kind: EnemyKind::Generic,
            attack_mode: AttackMode::Normal,
            position,
            velocity: Pose::ZERO,
            radius: Self::DEFAULT_RADIUS,
            health: Self::DEFAULT_HEALTH,
            damaging: true,
            lethal: false,
            destroyed: false,
            raised: false,
            swoops: 0,
            damage_taken: 0.0,
        }
    }

    /// Sets the capability tag.
    #[must_use]
    pub const fn with_kind(mut self, kind: EnemyKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the attack mode.
    #[must_use]
    pub const fn with_attack_mode(mut self, mode: AttackMode) -> Self {
        self.attack_mode = mode;
        self
    }

    /// Sets the collision radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the starting health.
    #[must_use]
    pub const fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    /// Sets the initial drift.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: Pose) -> Self {
        self.velocity = velocity;
        self
    }

    /// Whether contact hurts the player.
    #[must_use]
    pub const fn damaging(mut self, damaging: bool) -> Self {
        self.damaging = damaging;
        self
    }

    /// Whether the knife can reach it.
    #[must_use]
    pub const fn raised(mut self, raised: bool) -> Self {
        self.raised = raised;
        self
    }

    /// Teleports the dummy.
    pub fn set_position(&mut self, position: Pose) {
        self.position = position;
    }

    /// Total damage received so far.
    #[must_use]
    pub const fn damage_taken(&self) -> f32 {
        self.damage_taken
    }

    /// How many times the dummy was asked to swoop.
    #[must_use]
    pub const fn swoops(&self) -> u32 {
        self.swoops
    }

    /// Drifts along the current velocity, bleeding it off with `drag_base^dt`.
    pub fn drift(&mut self, dt: f32, drag_base: f32) {
        advance(&mut self.position, self.velocity, dt);
        decay_pose(&mut self.velocity, drag_base, dt);
    }
}

impl Enemy for TargetDummy {
    fn id(&self) -> EnemyId {
        self.id
    }

    fn kind(&self) -> EnemyKind {
        self.kind
    }

    fn attack_mode(&self) -> AttackMode {
        self.attack_mode
    }

    fn position(&self) -> Pose {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn velocity(&self) -> Pose {
        self.velocity
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn is_damaging(&self) -> bool {
        self.damaging
    }

    fn is_lethal(&self) -> bool {
        self.lethal
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn is_raised(&self) -> bool {
        self.raised
    }

    fn take_damage(&mut self, amount: f32) {
        if self.destroyed {
            return;
        }
        self.damage_taken += amount;
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.lethal = true;
            self.destroy();
        }
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn mark_lethal(&mut self) {
        self.lethal = true;
    }

    fn apply_impulse(&mut self, delta: Pose) {
        self.velocity += delta;
    }

    fn swoop_above_player(&mut self) {
        self.swoops += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dummy() -> TargetDummy {
        TargetDummy::new(1, Pose::new(100.0, 100.0)).with_health(100.0)
    }

    #[rstest]
    fn lethal_damage_destroys(mut dummy: TargetDummy) {
        dummy.take_damage(60.0);
        assert!(!dummy.is_destroyed());
        dummy.take_damage(60.0);
        assert!(dummy.is_destroyed());
        assert!(dummy.is_lethal());
        assert_relative_eq!(dummy.health(), 0.0);
        dummy.take_damage(10.0);
        assert_relative_eq!(dummy.damage_taken(), 120.0);
    }

    #[rstest]
    fn drift_moves_and_slows(dummy: TargetDummy) {
        let mut moving = dummy.with_velocity(Pose::new(100.0, 0.0));
        moving.drift(1.0, 0.5);
        assert_relative_eq!(moving.position().x, 200.0);
        assert_relative_eq!(moving.velocity().x, 50.0);
    }
}
