//! Projectile flight, hit resolution and pruning against passive dummies.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rollbrawl::collision::resolve_projectile_hits;
use rollbrawl::{
    Bread, Bullet, EffectQueue, Enemy, InputFrame, Pose, Projectile, ProjectileSet, Shuriken,
    TargetDummy, WeaponKind,
};
use rstest::{fixture, rstest};
use test_utils::{session_at, FixedCamera, DT};

#[fixture]
fn effects() -> EffectQueue {
    EffectQueue::default()
}

fn bullet_at(position: Pose, effects: &mut EffectQueue) -> Projectile {
    let mut rng = StdRng::seed_from_u64(21);
    let bullet = Bullet::spawn(position, Pose::new(1.0, 0.0), 60.0, position, &mut rng, effects);
    Projectile::Bullet(bullet)
}

#[rstest]
fn bullet_strikes_only_the_first_of_stacked_enemies(mut effects: EffectQueue) {
    let spot = Pose::new(400.0, 400.0);
    let mut set = ProjectileSet::default();
    set.push(bullet_at(spot, &mut effects));
    let mut enemies = vec![TargetDummy::new(1, spot), TargetDummy::new(2, spot)];

    assert_eq!(resolve_projectile_hits(&mut set, &mut enemies, &mut effects), 1);
    let taken: Vec<f32> = enemies.iter().map(TargetDummy::damage_taken).collect();
    assert_eq!(taken, vec![60.0, 0.0]);

    assert_eq!(resolve_projectile_hits(&mut set, &mut enemies, &mut effects), 0);
    assert_eq!(set.prune(), 1);
}

#[rstest]
fn doomed_enemies_absorb_nothing(mut effects: EffectQueue) {
    let spot = Pose::new(400.0, 400.0);
    let mut set = ProjectileSet::default();
    set.push(bullet_at(spot, &mut effects));
    let mut doomed = TargetDummy::new(1, spot);
    doomed.mark_lethal();
    let mut enemies = vec![doomed];

    assert_eq!(resolve_projectile_hits(&mut set, &mut enemies, &mut effects), 0);
    assert!(set.iter().all(|p| !p.is_destroyed()));
}

#[rstest]
fn bread_bounces_back_once_without_damage(mut effects: EffectQueue) {
    let spot = Pose::new(700.0, 700.0);
    let mut rng = StdRng::seed_from_u64(4);
    let mut set = ProjectileSet::default();
    set.push(Projectile::Bread(Bread::spawn(spot, Pose::new(1.0, 0.0), 0.0, &mut rng)));
    let launch = set.iter().next().map(|p| p.body().velocity).unwrap_or_default();
    let mut enemies = vec![TargetDummy::new(1, spot)];

    resolve_projectile_hits(&mut set, &mut enemies, &mut effects);
    resolve_projectile_hits(&mut set, &mut enemies, &mut effects);

    let Some(Projectile::Bread(bread)) = set.iter().next() else {
        panic!("bread should still be in flight");
    };
    assert!(bread.has_bounced());
    assert_abs_diff_eq!(bread.body().velocity.x, -0.8 * launch.x, epsilon = 1e-3);
    assert_abs_diff_eq!(bread.body().velocity.y, -0.8 * launch.y, epsilon = 1e-3);
    assert!(enemies.iter().all(|dummy| dummy.damage_taken() == 0.0));
}

#[rstest]
fn shuriken_passes_through_and_strikes_each_enemy_once(mut effects: EffectQueue) {
    let mut set = ProjectileSet::default();
    set.push(Projectile::Shuriken(Shuriken::spawn(
        Pose::new(0.0, 1000.0),
        Pose::new(1.0, 0.0),
        30.0,
    )));
    let mut enemies = vec![
        TargetDummy::new(1, Pose::new(300.0, 1000.0)),
        TargetDummy::new(2, Pose::new(600.0, 1000.0)),
    ];

    let mut hits = 0;
    for _ in 0..30 {
        set.advance(DT, &mut effects);
        hits += resolve_projectile_hits(&mut set, &mut enemies, &mut effects);
    }

    assert_eq!(hits, 2);
    for dummy in &enemies {
        assert_abs_diff_eq!(dummy.damage_taken(), 30.0);
    }
    assert_eq!(set.prune(), 0);
}

#[rstest]
fn stray_bullet_is_pruned_once_off_screen() {
    let mut session = session_at(Pose::new(1000.0, 1000.0), 12);
    let mut camera = FixedCamera::default();
    let aim = InputFrame::at_cursor(1500.0, 1000.0);

    let first = session.update(DT, &aim.firing(), &[], &mut camera);
    assert_eq!(first.active_projectiles, 1);
    let pruned: usize = (0..60)
        .map(|_| session.update(DT, &aim, &[], &mut camera).pruned_projectiles)
        .sum();

    assert_eq!(pruned, 1);
    assert!(session.projectiles().is_empty());
}

#[rstest]
fn shuriken_fan_fades_out_and_is_pruned() {
    let mut session = session_at(Pose::new(1400.0, 1000.0), 12);
    session.player_mut().set_weapon(WeaponKind::Shuriken);
    let mut camera = FixedCamera::default();
    let aim = InputFrame::at_cursor(1400.0, 500.0);

    session.update(DT, &aim.firing(), &[], &mut camera);
    assert_eq!(session.projectiles().len(), 5);

    let mut previous = 255.0_f32;
    let mut pruned = 0;
    for _ in 0..240 {
        let report = session.update(DT, &aim, &[], &mut camera);
        pruned += report.pruned_projectiles;
        let faintest = session
            .projectiles()
            .iter()
            .filter_map(|p| match p {
                Projectile::Shuriken(star) => Some(star.alpha()),
                _ => None,
            })
            .fold(f32::INFINITY, f32::min);
        if faintest.is_finite() {
            assert!(faintest <= previous);
            previous = faintest;
        }
    }

    assert_eq!(pruned, 5);
    assert!(session.projectiles().is_empty());
}
