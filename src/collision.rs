//! Hit tests between the player, enemies and projectiles.
//!
//! Every check here runs on post-move positions. A fast bullet can skip past
//! a thin enemy between two ticks; that tunnelling is accepted.

use log::trace;

use crate::constants::LASER_CORRIDOR_HALF_WIDTH;
use crate::cue::EffectQueue;
use crate::enemy::{AttackMode, Enemy, EnemyKind};
use crate::pose::Pose;
use crate::projectile::ProjectileSet;

/// Strict circle overlap: touching edges do not count.
///
/// # Examples
/// ```
/// use rollbrawl::{collision::circles_overlap, Pose};
/// assert!(circles_overlap(Pose::ZERO, 10.0, Pose::new(19.0, 0.0), 10.0));
/// assert!(!circles_overlap(Pose::ZERO, 10.0, Pose::new(20.0, 0.0), 10.0));
/// ```
#[must_use]
pub fn circles_overlap(a: Pose, a_radius: f32, b: Pose, b_radius: f32) -> bool {
    a.distance_to(b) < a_radius + b_radius
}

/// Inclusive reach test used by melee strikes.
#[must_use]
pub fn within_reach(point: Pose, target: Pose, reach: f32) -> bool {
    point.distance_to(target) <= reach
}

/// Whether `player` sits inside a laser corridor centred on `source.x`.
#[must_use]
pub fn in_laser_corridor(player: Pose, source: Pose) -> bool {
    (source.x - player.x).abs() < LASER_CORRIDOR_HALF_WIDTH
}

/// Player posture relevant to contact resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPosture {
    /// Player centre.
    pub position: Pose,
    /// Player radius.
    pub radius: f32,
    /// Rolling players crush grunts instead of getting hurt.
    pub rolling: bool,
    /// Dead players touch nothing.
    pub dead: bool,
}

/// Outcome of the player touching an enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Body contact; knock the player back along `direction`.
    Hurt {
        /// Unnormalised push away from the enemy.
        direction: Pose,
    },
    /// Boss laser; knockback is horizontal only and the boss swoops.
    Laser {
        /// Horizontal push away from the beam.
        direction: Pose,
    },
    /// A rolling player ran over a grunt.
    Crushed,
}

/// Finds the enemies touching the player this tick, as `(index, contact)`.
///
/// A dead player touches nothing. While rolling, every overlapping grunt is
/// reported as [`Contact::Crushed`] and bosses are ignored. Otherwise the
/// scan stops at the first hurtful contact.
#[must_use]
pub fn player_contacts<E: Enemy>(posture: PlayerPosture, enemies: &[E]) -> Vec<(usize, Contact)> {
    let mut contacts = Vec::new();
    if posture.dead {
        return contacts;
    }
    for (index, enemy) in enemies.iter().enumerate() {
        if !enemy.is_damaging() || enemy.is_lethal() || enemy.is_destroyed() {
            continue;
        }
        let touching = circles_overlap(posture.position, posture.radius, enemy.position(), enemy.radius());
        if posture.rolling {
            if touching && enemy.kind() == EnemyKind::Generic {
                contacts.push((index, Contact::Crushed));
            }
            continue;
        }
        if touching {
            let direction = posture.position - enemy.position();
            contacts.push((index, Contact::Hurt { direction }));
            break;
        }
        if enemy.kind() == EnemyKind::Boss
            && enemy.attack_mode() == AttackMode::Laser
            && in_laser_corridor(posture.position, enemy.position())
        {
            let direction = Pose::new(posture.position.x - enemy.position().x, 0.0);
            contacts.push((index, Contact::Laser { direction }));
            break;
        }
    }
    contacts
}

/// Resolves projectile–enemy overlaps and returns the number of hits.
///
/// The resolver delivers the projectile's damage first, then lets the
/// projectile react. A projectile destroyed by a hit stops scanning.
pub fn resolve_projectile_hits<E: Enemy>(
    projectiles: &mut ProjectileSet,
    enemies: &mut [E],
    effects: &mut EffectQueue,
) -> usize {
    let mut hits = 0;
    for projectile in projectiles.iter_mut() {
        for enemy in enemies.iter_mut() {
            if projectile.is_destroyed() {
                break;
            }
            if enemy.is_lethal() || enemy.is_destroyed() {
                continue;
            }
            let body = projectile.body();
            if !circles_overlap(body.position, body.radius, enemy.position(), enemy.radius()) {
                continue;
            }
            if !projectile.can_strike(enemy.id()) {
                continue;
            }
            let damage = body.damage;
            if damage > 0.0 {
                enemy.take_damage(damage);
            }
            projectile.hit(enemy, effects);
            trace!("projectile struck enemy {} for {damage}", enemy.id());
            hits += 1;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::TargetDummy;
    use rstest::{fixture, rstest};

    #[fixture]
    fn posture() -> PlayerPosture {
        PlayerPosture {
            position: Pose::new(500.0, 500.0),
            radius: 40.0,
            rolling: false,
            dead: false,
        }
    }

    #[rstest]
    fn first_contact_wins(posture: PlayerPosture) {
        let enemies = vec![
            TargetDummy::new(1, Pose::new(530.0, 500.0)),
            TargetDummy::new(2, Pose::new(470.0, 500.0)),
        ];
        let contacts = player_contacts(posture, &enemies);
        assert_eq!(contacts.len(), 1);
        assert!(matches!(contacts.first(), Some((0, Contact::Hurt { direction })) if direction.x < 0.0));
    }

    #[rstest]
    fn harmless_and_doomed_enemies_are_skipped(posture: PlayerPosture) {
        let mut doomed = TargetDummy::new(2, Pose::new(500.0, 500.0));
        doomed.mark_lethal();
        let enemies = vec![
            TargetDummy::new(1, Pose::new(500.0, 500.0)).damaging(false),
            doomed,
        ];
        assert!(player_contacts(posture, &enemies).is_empty());
    }

    #[rstest]
    fn rolling_crushes_every_grunt_but_not_bosses(posture: PlayerPosture) {
        let rolling = PlayerPosture { rolling: true, ..posture };
        let enemies = vec![
            TargetDummy::new(1, Pose::new(510.0, 500.0)),
            TargetDummy::new(2, Pose::new(490.0, 500.0)),
            TargetDummy::new(3, Pose::new(500.0, 510.0)).with_kind(EnemyKind::Boss),
        ];
        let contacts = player_contacts(rolling, &enemies);
        assert_eq!(contacts, vec![(0, Contact::Crushed), (1, Contact::Crushed)]);
    }

    #[rstest]
    #[case::inside(30.0, true)]
    #[case::edge(40.0, false)]
    #[case::outside(90.0, false)]
    fn laser_corridor_ignores_vertical_distance(posture: PlayerPosture, #[case] dx: f32, #[case] hit: bool) {
        let boss = TargetDummy::new(9, Pose::new(500.0 + dx, -800.0))
            .with_kind(EnemyKind::Boss)
            .with_attack_mode(AttackMode::Laser);
        let contacts = player_contacts(posture, &[boss]);
        assert_eq!(!contacts.is_empty(), hit);
        if hit {
            assert!(matches!(
                contacts.first(),
                Some((0, Contact::Laser { direction })) if direction.y == 0.0 && direction.x < 0.0
            ));
        }
    }

    #[rstest]
    fn dead_player_touches_nothing(posture: PlayerPosture) {
        let dead = PlayerPosture { dead: true, ..posture };
        let enemies = vec![TargetDummy::new(1, Pose::new(500.0, 500.0))];
        assert!(player_contacts(dead, &enemies).is_empty());
    }
}
