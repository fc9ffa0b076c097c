//! Fire-and-forget presentation requests emitted by the simulation.
//!
//! The core never talks to audio or sprite playback directly. It appends
//! [`Cue`]s, [`ParticleBurst`]s and [`Shake`]s to an [`EffectQueue`] and the
//! renderer drains them after the tick.

use std::fmt;

use serde::Serialize;

use crate::player::Facing;
use crate::pose::Pose;
use crate::weapon::WeaponKind;

/// Sound families. Each may map to several loaded variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoundCue {
    /// Walking footfall.
    Footstep,
    /// Dodge-roll whoosh.
    Roll,
    /// Player hurt.
    TakeDamage,
    /// Player death.
    Death,
    /// Pistol shot.
    Pistol,
    /// Gatling round.
    Gatling,
    /// Shuriken throw.
    Shuriken,
    /// Flamethrower burst.
    FlameBurst,
    /// Bread lob.
    Bread,
    /// Knife swing.
    Knife,
}

/// Sprite layer an animation plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Layer {
    /// Player body.
    Body,
    /// Weapon hand.
    Hand,
    /// Roll cooldown wheel.
    Stamina,
    /// Flamethrower plume.
    Flame,
}

impl Layer {
    /// Playback rate of the layer's sprite sheets.
    #[must_use]
    pub const fn frames_per_second(self) -> f32 {
        match self {
            Self::Stamina => 16.0,
            Self::Body | Self::Hand | Self::Flame => 12.0,
        }
    }
}

/// Every named animation the player drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Animation {
    /// Standing still.
    Idle(Facing),
    /// Walking toward the camera or sideways.
    Walk(Facing),
    /// Walking up the screen.
    WalkBack(Facing),
    /// Hurt recoil.
    TakeDamage(Facing),
    /// Dodge roll.
    Rolling,
    /// Collapse; holds the last frame.
    Dead,
    /// Weapon held between shots.
    HandIdle(WeaponKind, Facing),
    /// One firing swing of the weapon.
    HandFire(WeaponKind, Facing),
    /// Cooldown wheel filling.
    Stamina,
    /// Hidden wheel.
    StaminaIdle,
    /// Plume at rest.
    FlameIdle,
    /// Plume burning out.
    FlameVanish,
}

impl Animation {
    /// Layer this animation belongs to.
    #[must_use]
    pub const fn layer(self) -> Layer {
        match self {
            Self::Idle(_)
            | Self::Walk(_)
            | Self::WalkBack(_)
            | Self::TakeDamage(_)
            | Self::Rolling
            | Self::Dead => Layer::Body,
            Self::HandIdle(..) | Self::HandFire(..) => Layer::Hand,
            Self::Stamina | Self::StaminaIdle => Layer::Stamina,
            Self::FlameIdle | Self::FlameVanish => Layer::Flame,
        }
    }

    /// Frames in the sprite-sheet strip.
    #[must_use]
    pub const fn frame_count(self) -> u16 {
        match self {
            Self::Idle(_) | Self::Walk(_) | Self::WalkBack(_) => 8,
            Self::TakeDamage(_) => 3,
            Self::Rolling => 6,
            Self::Dead => 10,
            Self::HandIdle(WeaponKind::Fire, _) => 2,
            Self::HandIdle(..) | Self::StaminaIdle => 1,
            Self::HandFire(weapon, _) => match weapon {
                WeaponKind::Gatling => 2,
                WeaponKind::Gun | WeaponKind::Bread | WeaponKind::Shuriken => 4,
                WeaponKind::Knife => 6,
                WeaponKind::Fire => 10,
            },
            Self::Stamina => 15,
            Self::FlameIdle => 4,
            Self::FlameVanish => 14,
        }
    }

    /// Looping animations never report completion.
    #[must_use]
    pub const fn is_looping(self) -> bool {
        matches!(
            self,
            Self::Idle(_)
                | Self::Walk(_)
                | Self::WalkBack(_)
                | Self::HandIdle(..)
                | Self::StaminaIdle
                | Self::FlameIdle
        )
    }

    /// Playback rate; the gatling and knife swings run at double speed.
    #[must_use]
    pub const fn frames_per_second(self) -> f32 {
        match self {
            Self::HandFire(WeaponKind::Gatling | WeaponKind::Knife, _) => 24.0,
            _ => self.layer().frames_per_second(),
        }
    }

    /// Seconds one pass takes at [`Self::frames_per_second`].
    #[must_use]
    pub fn duration(self) -> f32 {
        f32::from(self.frame_count()) / self.frames_per_second()
    }
}

/// Renders the sprite-sheet key, e.g. `WalkBackLeft` or `GatlingFireRight`.
impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle(facing) => write!(f, "Idle{facing}"),
            Self::Walk(facing) => write!(f, "Walk{facing}"),
            Self::WalkBack(facing) => write!(f, "WalkBack{facing}"),
            Self::TakeDamage(facing) => write!(f, "TakeDamage{facing}"),
            Self::Rolling => f.write_str("Rolling"),
            Self::Dead => f.write_str("Dead"),
            Self::HandIdle(weapon, facing) => write!(f, "{}Idle{facing}", weapon.name()),
            Self::HandFire(weapon, facing) => write!(f, "{}Fire{facing}", weapon.name()),
            Self::Stamina => f.write_str("Stamina"),
            Self::StaminaIdle => f.write_str("StaminaIdle"),
            Self::FlameIdle => f.write_str("Idle"),
            Self::FlameVanish => f.write_str("Vanish"),
        }
    }
}

/// How a start request treats an animation that is already playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimationOptions {
    /// Restart when this animation is already playing.
    pub restart_if_active: bool,
    /// Reset the clock when switching to it.
    pub clear_time: bool,
}

impl AnimationOptions {
    /// Always start from frame zero.
    pub const RESTART: Self = Self {
        restart_if_active: true,
        clear_time: true,
    };
    /// Leave an already-active animation alone.
    pub const CONTINUE: Self = Self {
        restart_if_active: false,
        clear_time: false,
    };
    /// Switch without restarting, but reset the clock when switching.
    pub const SWITCH: Self = Self {
        restart_if_active: false,
        clear_time: true,
    };
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self::RESTART
    }
}

/// One presentation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Cue {
    /// Play a variant of a sound family.
    Sound(SoundCue),
    /// Start an animation on its layer.
    Animate {
        /// Animation to start.
        animation: Animation,
        /// Restart behaviour.
        options: AnimationOptions,
    },
}

/// Colour scheme of a spark burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SparkStyle {
    /// Orange muzzle sparks.
    Muzzle,
    /// White impact sparks.
    Impact,
    /// Grey shuriken sparks.
    Steel,
}

/// Particle families the renderer spawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ParticleKind {
    /// Dust puff.
    Puff,
    /// Muzzle flash oriented along the burst position's angle.
    MuzzleFlash,
    /// Short-lived spark.
    Spark(SparkStyle),
    /// Ejected shell casing.
    Casing,
}

/// Request to spawn `count` particles of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleBurst {
    /// Particle family.
    pub kind: ParticleKind,
    /// Spawn point.
    pub position: Pose,
    /// Base velocity of each particle.
    pub velocity: Pose,
    /// Number of particles.
    pub count: u32,
}

/// Screen-shake request along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shake {
    /// Shake axis.
    pub direction: Pose,
    /// Shake strength.
    pub amount: f32,
}

/// Per-session buffer of presentation requests, drained by the renderer.
#[derive(Debug, Default)]
pub struct EffectQueue {
    cues: Vec<Cue>,
    particles: Vec<ParticleBurst>,
    shakes: Vec<Shake>,
}

impl EffectQueue {
    /// Queues a sound.
    pub fn sound(&mut self, sound: SoundCue) {
        self.cues.push(Cue::Sound(sound));
    }

    /// Queues an animation start.
    pub fn animate(&mut self, animation: Animation, options: AnimationOptions) {
        self.cues.push(Cue::Animate { animation, options });
    }

    /// Queues a particle burst.
    pub fn burst(&mut self, kind: ParticleKind, position: Pose, velocity: Pose, count: u32) {
        self.particles.push(ParticleBurst {
            kind,
            position,
            velocity,
            count,
        });
    }

    /// Queues a screen shake.
    pub fn shake(&mut self, direction: Pose, amount: f32) {
        self.shakes.push(Shake { direction, amount });
    }

    /// Pending cues in emission order.
    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Pending particle bursts.
    #[must_use]
    pub fn particles(&self) -> &[ParticleBurst] {
        &self.particles
    }

    /// Pending shakes.
    #[must_use]
    pub fn shakes(&self) -> &[Shake] {
        &self.shakes
    }

    /// Removes and yields every pending cue.
    pub fn drain_cues(&mut self) -> std::vec::Drain<'_, Cue> {
        self.cues.drain(..)
    }

    /// Removes and yields every pending burst.
    pub fn drain_particles(&mut self) -> std::vec::Drain<'_, ParticleBurst> {
        self.particles.drain(..)
    }

    /// Removes and yields every pending shake.
    pub fn drain_shakes(&mut self) -> std::vec::Drain<'_, Shake> {
        self.shakes.drain(..)
    }

    /// Whether any sound cue of the given family is pending.
    #[must_use]
    pub fn has_sound(&self, sound: SoundCue) -> bool {
        self.cues.contains(&Cue::Sound(sound))
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty() && self.particles.is_empty() && self.shakes.is_empty()
    }

    /// Drops everything pending.
    pub fn clear(&mut self) {
        self.cues.clear();
        self.particles.clear();
        self.shakes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::walk_back(Animation::WalkBack(Facing::Left), "WalkBackLeft")]
    #[case::hand_fire(Animation::HandFire(WeaponKind::Gatling, Facing::Right), "GatlingFireRight")]
    #[case::hand_idle(Animation::HandIdle(WeaponKind::Knife, Facing::Left), "KnifeIdleLeft")]
    #[case::flame(Animation::FlameVanish, "Vanish")]
    fn animation_keys_match_sheet_names(#[case] animation: Animation, #[case] key: &str) {
        assert_eq!(animation.to_string(), key);
    }

    #[rstest]
    #[case::roll(Animation::Rolling, 0.5)]
    #[case::stamina(Animation::Stamina, 0.9375)]
    #[case::knife(Animation::HandFire(WeaponKind::Knife, Facing::Right), 0.25)]
    #[case::gatling(Animation::HandFire(WeaponKind::Gatling, Facing::Left), 1.0 / 12.0)]
    #[case::gun(Animation::HandFire(WeaponKind::Gun, Facing::Right), 1.0 / 3.0)]
    fn one_shot_durations_follow_frame_rate(#[case] animation: Animation, #[case] seconds: f32) {
        assert!(!animation.is_looping());
        approx::assert_abs_diff_eq!(animation.duration(), seconds, epsilon = 1e-6);
    }

    #[rstest]
    fn drain_empties_only_the_drained_queue() {
        let mut queue = EffectQueue::default();
        queue.sound(SoundCue::Roll);
        queue.shake(Pose::new(1.0, 0.0), 15.0);
        assert!(queue.has_sound(SoundCue::Roll));
        let cues: Vec<_> = queue.drain_cues().collect();
        assert_eq!(cues, vec![Cue::Sound(SoundCue::Roll)]);
        assert!(!queue.is_empty());
        assert_eq!(queue.drain_shakes().count(), 1);
        assert!(queue.is_empty());
    }
}
