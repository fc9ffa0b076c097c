//! Weapon kinds, their tuning table and the fire dispatch.
//!
//! [`fire`] is the single entry point: it gates on the cooldown, points the
//! arm at the cursor and then runs the per-kind spawn and effect logic.

use log::{debug, trace};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::collision::within_reach;
use crate::constants::{
    BREAD_COOLDOWN, BREAD_DAMAGE, FIRE_COOLDOWN, GATLING_BARREL_DROP, GATLING_BARREL_EXTRA,
    GATLING_COOLDOWN, GATLING_DAMAGE, GATLING_RECOIL, GUN_COOLDOWN, GUN_DAMAGE, GUN_RECOIL,
    KNIFE_COOLDOWN, KNIFE_DAMAGE, KNIFE_REACH, MUZZLE_EXTRA, SHURIKEN_COOLDOWN, SHURIKEN_DAMAGE,
    SHURIKEN_RECOIL,
};
use crate::cue::{Animation, AnimationOptions, ParticleKind, SoundCue, SparkStyle};
use crate::enemy::Enemy;
use crate::physics::clamp_speed;
use crate::player::Player;
use crate::pose::Pose;
use crate::projectile::{Bread, Bullet, Projectile, Shuriken};
use crate::session::FrameContext;

/// The six weapon kinds. Closed, so an unknown mode cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Pistol.
    Gun,
    /// Lobbed loaf that bounces off enemies.
    Bread,
    /// Five-star fan that passes through enemies.
    Shuriken,
    /// Flamethrower; roots the player.
    Fire,
    /// Rapid fire; slows the player.
    Gatling,
    /// Melee stab.
    Knife,
}

impl WeaponKind {
    /// Every kind in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Gun,
        Self::Bread,
        Self::Shuriken,
        Self::Fire,
        Self::Gatling,
        Self::Knife,
    ];

    /// Numeric mode code used by saved input scripts and the HUD badges.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Bread => 1,
            Self::Knife => 2,
            Self::Shuriken => 3,
            Self::Gun => 4,
            Self::Fire => 5,
            Self::Gatling => 6,
        }
    }

    /// Decodes a mode code; unknown codes yield `None`.
    ///
    /// # Examples
    /// ```
    /// use rollbrawl::WeaponKind;
    /// assert_eq!(WeaponKind::from_code(6), Some(WeaponKind::Gatling));
    /// assert_eq!(WeaponKind::from_code(0), None);
    /// ```
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Sprite-sheet prefix and display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gun => "Gun",
            Self::Bread => "Bread",
            Self::Shuriken => "Shuriken",
            Self::Fire => "Fire",
            Self::Gatling => "Gatling",
            Self::Knife => "Knife",
        }
    }

    /// Case-insensitive lookup by [`Self::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Built-in cooldown and damage.
    #[must_use]
    pub const fn default_stats(self) -> WeaponStats {
        let (cooldown, damage) = match self {
            Self::Gun => (GUN_COOLDOWN, GUN_DAMAGE),
            Self::Bread => (BREAD_COOLDOWN, BREAD_DAMAGE),
            Self::Shuriken => (SHURIKEN_COOLDOWN, SHURIKEN_DAMAGE),
            Self::Fire => (FIRE_COOLDOWN, 0.0),
            Self::Gatling => (GATLING_COOLDOWN, GATLING_DAMAGE),
            Self::Knife => (KNIFE_COOLDOWN, KNIFE_DAMAGE),
        };
        WeaponStats { cooldown, damage }
    }

    /// Impulse applied to the player opposite the aim.
    #[must_use]
    pub const fn recoil(self) -> f32 {
        match self {
            Self::Gun => GUN_RECOIL,
            Self::Gatling => GATLING_RECOIL,
            Self::Shuriken => SHURIKEN_RECOIL,
            Self::Bread | Self::Fire | Self::Knife => 0.0,
        }
    }

    /// Initial velocity of the arm's visual kick.
    #[must_use]
    pub const fn knockback_velocity(self) -> f32 {
        match self {
            Self::Gun | Self::Shuriken => 1500.0,
            Self::Gatling => 200.0,
            Self::Bread | Self::Fire | Self::Knife => 0.0,
        }
    }

    /// Sound played when firing.
    #[must_use]
    pub const fn sound(self) -> SoundCue {
        match self {
            Self::Gun => SoundCue::Pistol,
            Self::Bread => SoundCue::Bread,
            Self::Shuriken => SoundCue::Shuriken,
            Self::Fire => SoundCue::FlameBurst,
            Self::Gatling => SoundCue::Gatling,
            Self::Knife => SoundCue::Knife,
        }
    }

    /// Picks uniformly among the kinds other than `self`.
    ///
    /// Falls back to the full set if filtering leaves nothing.
    pub fn reroll<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let others: Vec<Self> = Self::ALL.into_iter().filter(|kind| *kind != self).collect();
        let pool: &[Self] = if others.is_empty() { &Self::ALL } else { &others };
        pool.choose(rng).copied().unwrap_or(self)
    }
}

/// Tunable numbers for one weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Seconds that must elapse between shots.
    pub cooldown: f32,
    /// Damage per projectile or per knife hit.
    pub damage: f32,
}

/// Cooldown and damage for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponTable {
    gun: WeaponStats,
    bread: WeaponStats,
    shuriken: WeaponStats,
    fire: WeaponStats,
    gatling: WeaponStats,
    knife: WeaponStats,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            gun: WeaponKind::Gun.default_stats(),
            bread: WeaponKind::Bread.default_stats(),
            shuriken: WeaponKind::Shuriken.default_stats(),
            fire: WeaponKind::Fire.default_stats(),
            gatling: WeaponKind::Gatling.default_stats(),
            knife: WeaponKind::Knife.default_stats(),
        }
    }
}

impl WeaponTable {
    /// Stats for `kind`.
    #[must_use]
    pub const fn get(&self, kind: WeaponKind) -> WeaponStats {
        match kind {
            WeaponKind::Gun => self.gun,
            WeaponKind::Bread => self.bread,
            WeaponKind::Shuriken => self.shuriken,
            WeaponKind::Fire => self.fire,
            WeaponKind::Gatling => self.gatling,
            WeaponKind::Knife => self.knife,
        }
    }

    /// Replaces the stats for `kind`.
    pub fn set(&mut self, kind: WeaponKind, stats: WeaponStats) {
        let slot = match kind {
            WeaponKind::Gun => &mut self.gun,
            WeaponKind::Bread => &mut self.bread,
            WeaponKind::Shuriken => &mut self.shuriken,
            WeaponKind::Fire => &mut self.fire,
            WeaponKind::Gatling => &mut self.gatling,
            WeaponKind::Knife => &mut self.knife,
        };
        *slot = stats;
    }

    /// Cooldown of `kind` in seconds.
    #[must_use]
    pub const fn cooldown(&self, kind: WeaponKind) -> f32 {
        self.get(kind).cooldown
    }

    /// Damage of `kind`.
    #[must_use]
    pub const fn damage(&self, kind: WeaponKind) -> f32 {
        self.get(kind).damage
    }
}

/// Angular offsets of the five-star shuriken fan, in degrees.
///
/// The values come from `(180 / PI) * (-1 + d / 2)` and are kept literally:
/// roughly -57.3, -28.6, 0, 28.6 and 57.3 degrees.
#[must_use]
pub fn shuriken_fan_offsets() -> [f32; 5] {
    let step = |d: f32| std::f32::consts::FRAC_1_PI * 180.0 * (-1.0 + d / 2.0);
    [step(0.0), step(1.0), step(2.0), step(3.0), step(4.0)]
}

/// What a successful [`fire`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FireReport {
    /// Weapon that fired.
    pub weapon: WeaponKind,
    /// Projectiles launched.
    pub spawned: usize,
    /// Enemies stabbed.
    pub knife_hits: usize,
}

/// Fires the player's current weapon at `cursor` (world space).
///
/// Returns `None` without touching any state when the cooldown has not
/// elapsed. Posture gating (rolling, already firing, dead) is the caller's
/// job.
pub fn fire<E: Enemy>(
    player: &mut Player,
    cursor: Pose,
    frame: &mut FrameContext<'_, E>,
) -> Option<FireReport> {
    let kind = player.weapon;
    if player.last_fire < frame.tuning.weapons.cooldown(kind) {
        trace!("{} still cooling down ({:.3}s)", kind.name(), player.last_fire);
        return None;
    }

    player.last_fire = 0.0;
    player.firing = true;
    let relative = Pose::new(cursor.x - player.position.x, cursor.y - player.position.y);
    let aim = relative.angle_of_position_degrees();
    player.aim.snap_to(aim);
    player.aim.knockback_velocity = kind.knockback_velocity();

    player.face_hand(relative);
    let facing = player.hand_facing();
    frame
        .effects
        .animate(Animation::HandFire(kind, facing), AnimationOptions::RESTART);

    let arm = player.aim.arm_angle;
    let muzzle = player.position + Pose::polar(player.aim.aim_distance + MUZZLE_EXTRA, arm);
    let damage = frame.tuning.weapons.damage(kind);
    let before = frame.projectiles.len();
    let mut knife_hits = 0;

    match kind {
        WeaponKind::Gun => {
            frame.effects.burst(
                ParticleKind::MuzzleFlash,
                Pose::with_angle(muzzle.x, muzzle.y, arm),
                Pose::ZERO,
                1,
            );
            let bullet = Bullet::spawn(muzzle, relative, damage, player.position, frame.rng, frame.effects);
            frame.projectiles.push(Projectile::Bullet(bullet));
            frame.effects.shake(relative, 15.0);
            frame.effects.burst(
                ParticleKind::Spark(SparkStyle::Muzzle),
                player.hand_pose(),
                relative,
                8,
            );
        }
        WeaponKind::Bread => {
            let bread = Bread::spawn(muzzle, relative, damage, frame.rng);
            frame.projectiles.push(Projectile::Bread(bread));
        }
        WeaponKind::Gatling => {
            clamp_speed(&mut player.velocity, frame.tuning.max_gatling_speed);
            let drop = Pose::new(0.0, GATLING_BARREL_DROP);
            let barrel = |extra: f32| player.position + Pose::polar(player.aim.aim_distance + extra, arm);
            let flash = barrel(GATLING_BARREL_EXTRA + 30.0) + drop;
            frame.effects.burst(
                ParticleKind::MuzzleFlash,
                Pose::with_angle(flash.x, flash.y, arm),
                Pose::ZERO,
                1,
            );
            let origin = barrel(GATLING_BARREL_EXTRA) + drop.scale_position(0.5);
            let bullet = Bullet::spawn(origin, relative, damage, player.position, frame.rng, frame.effects);
            frame.projectiles.push(Projectile::Bullet(bullet));
            frame.effects.shake(relative, 10.0);
            let sparks = ParticleKind::Spark(SparkStyle::Muzzle);
            frame
                .effects
                .burst(sparks, barrel(GATLING_BARREL_EXTRA) + drop, relative, 5);
            frame.effects.burst(sparks, barrel(5.0) + drop, relative, 5);
        }
        WeaponKind::Shuriken => {
            for offset in shuriken_fan_offsets() {
                let heading = Pose::polar(1.0, aim + offset);
                let star = Shuriken::spawn(muzzle, heading, damage);
                frame.projectiles.push(Projectile::Shuriken(star));
            }
        }
        WeaponKind::Fire => {
            frame
                .effects
                .animate(Animation::FlameVanish, AnimationOptions::RESTART);
        }
        WeaponKind::Knife => {
            knife_hits = knife_strike(player.position, relative, damage, frame);
        }
    }
    frame.effects.sound(kind.sound());

    let recoil = kind.recoil();
    if recoil > 0.0 {
        player.velocity += (-relative).scale_to(recoil);
    }

    let spawned = frame.projectiles.len() - before;
    debug!(
        "fired {} at {aim:.1}deg: {spawned} projectile(s), {knife_hits} knife hit(s)",
        kind.name()
    );
    Some(FireReport {
        weapon: kind,
        spawned,
        knife_hits,
    })
}

/// Resolves one knife swing and returns the number of enemies struck.
///
/// The strike point sits [`KNIFE_REACH`] units along the aim. An enemy is hit
/// when its centre lies within `radius + KNIFE_REACH` of that point,
/// inclusive. Each enemy is considered once per swing.
fn knife_strike<E: Enemy>(origin: Pose, relative: Pose, damage: f32, frame: &mut FrameContext<'_, E>) -> usize {
    let strike = relative.scale_to(KNIFE_REACH) + origin;
    let mut hits = 0;
    for enemy in frame.enemies.iter_mut() {
        if enemy.is_lethal() || enemy.is_destroyed() || enemy.is_raised() {
            continue;
        }
        if !within_reach(strike, enemy.position(), enemy.radius() + KNIFE_REACH) {
            continue;
        }
        enemy.take_damage(damage);
        hits += 1;
        let at = enemy.position().blend(origin, 0.7);
        frame
            .effects
            .burst(ParticleKind::Spark(SparkStyle::Impact), at, Pose::ZERO, 16);
    }
    hits
}
