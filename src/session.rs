//! The per-session world and its single update entry point.
//!
//! [`Session`] owns the player, the enemies, the live projectiles and the
//! effect queue. [`Session::update`] runs one tick in a fixed order:
//! animation events, timers, triggers, movement, firing, aim, projectile
//! advancement, collision and finally pruning.

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::collision::resolve_projectile_hits;
use crate::config::Tuning;
use crate::constants::DAMAGE_FLASH_FADE_RATE;
use crate::cue::EffectQueue;
use crate::enemy::Enemy;
use crate::physics::sanitize_dt;
use crate::player::{InputFrame, MovementState, Player};
use crate::pose::Pose;
use crate::presentation::{AnimationEvent, Camera};
use crate::projectile::ProjectileSet;
use crate::weapon::{fire, FireReport, WeaponKind};

/// Mutable view of the session handed to the player phases and weapons.
///
/// Every field is a disjoint borrow of [`Session`], so phases can mutate
/// enemies, projectiles and effects side by side.
pub struct FrameContext<'a, E> {
    /// Live enemies.
    pub enemies: &'a mut [E],
    /// Projectiles in flight.
    pub projectiles: &'a mut ProjectileSet,
    /// Presentation requests for this tick.
    pub effects: &'a mut EffectQueue,
    /// Session random source.
    pub rng: &'a mut StdRng,
    /// Alpha of the red damage overlay; faded by the session.
    pub damage_flash_alpha: &'a mut f32,
    /// Set when a dead player presses restart.
    pub restart_requested: &'a mut bool,
    /// Startup tuning.
    pub tuning: &'a Tuning,
}

/// Summary of one [`Session::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    /// Tick number, starting at one.
    pub tick: u64,
    /// Player state after the tick.
    pub state: MovementState,
    /// Player health after the tick.
    pub health: f32,
    /// Equipped weapon after the tick.
    pub weapon: WeaponKind,
    /// Shot fired this tick, if any.
    pub fired: Option<FireReport>,
    /// Projectile strikes on enemies.
    pub projectile_hits: usize,
    /// Whether the player took a hit.
    pub hurt: bool,
    /// Whether the player died this tick.
    pub died: bool,
    /// Projectiles removed at the end of the tick.
    pub pruned_projectiles: usize,
    /// Destroyed enemies removed at the end of the tick.
    pub pruned_enemies: usize,
    /// Projectiles still in flight.
    pub active_projectiles: usize,
}

/// One play session: the single writer of all simulation state.
#[derive(Debug)]
pub struct Session<E> {
    player: Player,
    projectiles: ProjectileSet,
    enemies: Vec<E>,
    effects: EffectQueue,
    damage_flash_alpha: f32,
    restart_requested: bool,
    rng: StdRng,
    tuning: Tuning,
    tick: u64,
}

impl<E: Enemy> Session<E> {
    /// Creates a session with no enemies and a seeded random source.
    #[must_use]
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            player: Player::new(&tuning),
            projectiles: ProjectileSet::default(),
            enemies: Vec::new(),
            effects: EffectQueue::default(),
            damage_flash_alpha: 0.0,
            restart_requested: false,
            rng: StdRng::seed_from_u64(seed),
            tuning,
            tick: 0,
        }
    }

    /// Adds `enemies` to a fresh session.
    #[must_use]
    pub fn with_enemies<I: IntoIterator<Item = E>>(mut self, enemies: I) -> Self {
        self.enemies.extend(enemies);
        self
    }

    /// Adds an enemy mid-session.
    pub fn spawn_enemy(&mut self, enemy: E) {
        trace!("enemy {} joined the session", enemy.id());
        self.enemies.push(enemy);
    }

    /// Runs one tick and reports what happened.
    ///
    /// `events` are the animation completions produced by the presenter
    /// since the previous tick. `camera` maps the cursor into the world and
    /// receives the new camera target.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputFrame,
        events: &[AnimationEvent],
        camera: &mut dyn Camera,
    ) -> TickReport {
        let step = sanitize_dt(dt);
        self.tick += 1;
        self.damage_flash_alpha = (self.damage_flash_alpha - DAMAGE_FLASH_FADE_RATE * step).max(0.0);

        let mapped = camera.screen_to_world(input.cursor);
        let cursor = if mapped.is_finite() {
            mapped
        } else {
            warn!("camera mapped the cursor to a non-finite point; aiming at the player");
            self.player.position()
        };

        let Self {
            player,
            projectiles,
            enemies,
            effects,
            damage_flash_alpha,
            restart_requested,
            rng,
            tuning,
            tick,
        } = self;
        let mut frame = FrameContext {
            enemies: enemies.as_mut_slice(),
            projectiles,
            effects,
            rng,
            damage_flash_alpha,
            restart_requested,
            tuning,
        };

        for event in events {
            player.on_animation_finished(*event, &mut frame);
        }
        player.tick_timers(step);
        let direction = player.steering_direction(input);
        player.handle_triggers(input, direction, &mut frame);
        player.steer(direction, step, &mut frame);

        let fired = if player.wants_to_fire(input) {
            fire(player, cursor, &mut frame)
        } else {
            None
        };
        player.track_aim(cursor, step);
        camera.set_target(player.camera_target(cursor));
        player.footsteps(step, &mut frame);

        frame.projectiles.advance(step, frame.effects);
        let hurt = player.resolve_contacts(&mut frame);
        let projectile_hits = resolve_projectile_hits(frame.projectiles, frame.enemies, frame.effects);
        let died = player.check_death(&mut frame);

        let pruned_projectiles = frame.projectiles.prune();
        let active_projectiles = frame.projectiles.len();
        let before = enemies.len();
        enemies.retain(|enemy| !enemy.is_destroyed());
        let pruned_enemies = before - enemies.len();

        debug_assert!(
            (0.0..=player.max_health()).contains(&player.health()),
            "health left its range"
        );
        trace!(
            "tick {tick}: {:?} hp {:.1} hits {projectile_hits} live {active_projectiles}",
            player.state(),
            player.health()
        );

        TickReport {
            tick: *tick,
            state: player.state(),
            health: player.health(),
            weapon: player.weapon(),
            fired,
            projectile_hits,
            hurt,
            died,
            pruned_projectiles,
            pruned_enemies,
            active_projectiles,
        }
    }

    /// Resets the player and clears projectiles and pending effects.
    ///
    /// Enemies are left alone; their lifecycle belongs to whoever spawned
    /// them.
    pub fn restart(&mut self) {
        info!("session restarting after {} ticks", self.tick);
        self.player = Player::new(&self.tuning);
        self.projectiles.clear();
        self.effects.clear();
        self.damage_flash_alpha = 0.0;
        self.restart_requested = false;
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player, for scripted setups.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Projectiles in flight.
    #[must_use]
    pub const fn projectiles(&self) -> &ProjectileSet {
        &self.projectiles
    }

    /// Mutable projectile set.
    pub fn projectiles_mut(&mut self) -> &mut ProjectileSet {
        &mut self.projectiles
    }

    /// Live enemies.
    #[must_use]
    pub fn enemies(&self) -> &[E] {
        &self.enemies
    }

    /// Mutable enemy list.
    pub fn enemies_mut(&mut self) -> &mut Vec<E> {
        &mut self.enemies
    }

    /// Cues, particle bursts and shakes queued since they were last drained.
    #[must_use]
    pub const fn effects(&self) -> &EffectQueue {
        &self.effects
    }

    /// Mutable access for draining the queue after a tick.
    pub fn effects_mut(&mut self) -> &mut EffectQueue {
        &mut self.effects
    }

    /// Opacity of the red damage overlay.
    #[must_use]
    pub const fn damage_flash_alpha(&self) -> f32 {
        self.damage_flash_alpha
    }

    /// Whether a restart is pending.
    #[must_use]
    pub const fn restart_requested(&self) -> bool {
        self.restart_requested
    }

    /// Startup tuning.
    #[must_use]
    pub const fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Ticks run since the session started.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Places the player, mostly for scripted scenarios.
    pub fn place_player(&mut self, position: Pose) {
        debug!("player placed at ({:.1}, {:.1})", position.x, position.y);
        self.player.set_position(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DAMAGE_FLASH_ALPHA;
    use crate::cue::SoundCue;
    use crate::enemy::TargetDummy;
    use crate::projectile::Projectile;
    use approx::assert_abs_diff_eq;
    use rstest::{fixture, rstest};

    /// Treats screen coordinates as world coordinates.
    #[derive(Default)]
    struct WorldCamera {
        targets: Vec<Pose>,
    }

    impl Camera for WorldCamera {
        fn screen_to_world(&self, point: (f32, f32)) -> Pose {
            Pose::from(point)
        }

        fn set_target(&mut self, target: Pose) {
            self.targets.push(target);
        }
    }

    #[fixture]
    fn session() -> Session<TargetDummy> {
        Session::new(Tuning::default(), 11)
    }

    #[rstest]
    fn bullet_fired_this_tick_is_advanced_before_collision(mut session: Session<TargetDummy>) {
        session.place_player(Pose::new(1000.0, 1000.0));
        let mut camera = WorldCamera::default();
        let input = InputFrame::at_cursor(1500.0, 1000.0).firing();
        let report = session.update(0.01, &input, &[], &mut camera);

        assert_eq!(report.fired.map(|f| f.spawned), Some(1));
        let Some(Projectile::Bullet(bullet)) = session.projectiles().iter().next() else {
            panic!("expected a live bullet");
        };
        assert!(bullet.body().age > 0.0);
    }

    #[rstest]
    fn damage_flash_fades_to_zero(mut session: Session<TargetDummy>) {
        session.damage_flash_alpha = DAMAGE_FLASH_ALPHA;
        let mut camera = WorldCamera::default();
        let idle = InputFrame::at_cursor(0.0, 0.0);
        session.update(0.25, &idle, &[], &mut camera);
        assert_abs_diff_eq!(session.damage_flash_alpha(), 105.0, epsilon = 1e-3);
        session.update(0.25, &idle, &[], &mut camera);
        assert_abs_diff_eq!(session.damage_flash_alpha(), 0.0);
    }

    #[rstest]
    fn invalid_dt_still_ticks(mut session: Session<TargetDummy>) {
        let start = session.player().position();
        let mut camera = WorldCamera::default();
        let report = session.update(f32::NAN, &InputFrame::at_cursor(0.0, 0.0), &[], &mut camera);
        assert_eq!(report.tick, 1);
        assert_eq!(session.player().position(), start);
        assert_eq!(camera.targets.len(), 1);
    }

    #[rstest]
    fn camera_target_leans_toward_cursor(mut session: Session<TargetDummy>) {
        session.place_player(Pose::new(1000.0, 1000.0));
        let mut camera = WorldCamera::default();
        session.update(0.0, &InputFrame::at_cursor(1500.0, 1000.0), &[], &mut camera);
        let target = camera.targets.last().copied().unwrap_or_default();
        assert_abs_diff_eq!(target.x, 1100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(target.y, 1000.0, epsilon = 1e-3);
    }

    #[rstest]
    fn restart_resets_player_and_clears_world(mut session: Session<TargetDummy>) {
        session.place_player(Pose::new(1000.0, 1000.0));
        session.player_mut().set_weapon(WeaponKind::Shuriken);
        let mut camera = WorldCamera::default();
        session.update(0.01, &InputFrame::at_cursor(1500.0, 1000.0).firing(), &[], &mut camera);
        assert!(!session.projectiles().is_empty());
        assert!(session.effects().has_sound(SoundCue::Shuriken));

        session.restart();
        assert!(session.projectiles().is_empty());
        assert!(session.effects().is_empty());
        assert_eq!(session.player().weapon(), WeaponKind::Gun);
        assert_abs_diff_eq!(session.player().health(), session.tuning().max_health);
    }

    #[rstest]
    fn destroyed_enemies_are_pruned_at_end_of_tick(session: Session<TargetDummy>) {
        let mut crowded = session.with_enemies([
            TargetDummy::new(1, Pose::new(200.0, 200.0)).with_health(10.0),
            TargetDummy::new(2, Pose::new(1250.0, 1000.0)).with_health(10.0),
        ]);
        crowded.place_player(Pose::new(1000.0, 1000.0));
        crowded.player_mut().set_weapon(WeaponKind::Knife);
        let mut camera = WorldCamera::default();
        let report = crowded.update(0.0, &InputFrame::at_cursor(1250.0, 1000.0).firing(), &[], &mut camera);
        assert_eq!(report.pruned_enemies, 1);
        assert_eq!(crowded.enemies().len(), 1);
        assert_eq!(crowded.enemies().first().map(Enemy::id), Some(1));
    }
}
