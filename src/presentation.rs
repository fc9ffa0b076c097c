//! Contracts for the collaborators that draw and play the simulation.
//!
//! The core never talks to a sprite or an audio device directly. It queues
//! [`Cue`]s, and a [`Presenter`] replays them onto an [`AnimationPlayer`] per
//! layer and a [`SoundManager`]. Animation completions come back as
//! [`AnimationEvent`] values that the session consumes on the next tick.

use hashbrown::HashMap;
use log::{debug, info, trace};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::cue::{Animation, AnimationOptions, Cue, Layer, SoundCue};
use crate::error::AssetError;
use crate::player::{Facing, Player};
use crate::pose::Pose;
use crate::weapon::WeaponKind;

/// Reported by an [`AnimationPlayer`] when a non-looping animation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnimationEvent {
    /// The animation reached its last frame.
    Finished(Animation),
}

/// One sprite layer capable of playing keyed animations.
#[cfg_attr(test, mockall::automock)]
pub trait AnimationPlayer {
    /// Starts `animation`, honouring `options`.
    fn start_animation(&mut self, animation: Animation, options: AnimationOptions);

    /// Advances playback and returns the animations that finished.
    fn update(&mut self, dt: f32) -> Vec<AnimationEvent>;

    /// Moves the layer.
    fn set_position(&mut self, position: Pose);

    /// Sprite rotation in degrees.
    fn set_angle(&mut self, degrees: f32);
}

/// Opaque handle to a loaded sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SoundHandle(
    /// Backend-assigned id.
    pub u32,
);

/// Audio backend.
#[cfg_attr(test, mockall::automock)]
pub trait SoundManager {
    /// Loads the sound at `path`.
    ///
    /// # Errors
    /// Returns an [`AssetError`] when the file is missing or unusable.
    fn load(&mut self, path: &str) -> Result<SoundHandle, AssetError>;

    /// Plays a loaded sound once.
    fn play(&mut self, sound: SoundHandle);

    /// Sets playback volume in `[0, 1]`.
    fn set_volume(&mut self, sound: SoundHandle, volume: f32);
}

/// Viewport mapping and smoothing target.
#[cfg_attr(test, mockall::automock)]
pub trait Camera {
    /// Maps a screen point into the world.
    fn screen_to_world(&self, point: (f32, f32)) -> Pose;

    /// Point the camera eases toward.
    fn set_target(&mut self, target: Pose);
}

/// Sound files per cue and their playback volume.
const SOUND_ASSETS: [(SoundCue, &[&str], f32); 10] = [
    (
        SoundCue::Footstep,
        &[
            "assets/sounds/Footstep-1.mp3",
            "assets/sounds/Footstep-2.mp3",
            "assets/sounds/Footstep-3.mp3",
        ],
        0.1,
    ),
    (SoundCue::Roll, &["assets/sounds/die_roll.mp3"], 1.0),
    (SoundCue::TakeDamage, &["assets/sounds/Taking-Damage.ogg"], 1.0),
    (SoundCue::Death, &["assets/sounds/Player-Death.mp3"], 1.0),
    (SoundCue::Pistol, &["assets/sounds/Pistol_v2.mp3"], 0.5),
    (
        SoundCue::Gatling,
        &[
            "assets/sounds/Gatling-Gun-1.mp3",
            "assets/sounds/Gatling-Gun-2.mp3",
            "assets/sounds/Gatling-Gun-3.mp3",
        ],
        0.3,
    ),
    (
        SoundCue::Shuriken,
        &[
            "assets/sounds/Shuriken-1.mp3",
            "assets/sounds/Shuriken-2.mp3",
            "assets/sounds/Shuriken-3.mp3",
        ],
        0.3,
    ),
    (SoundCue::FlameBurst, &["assets/sounds/Flame-Burst_v2.ogg"], 1.0),
    (
        SoundCue::Bread,
        &[
            "assets/sounds/Bread-1.mp3",
            "assets/sounds/Bread-2.mp3",
            "assets/sounds/Bread-3.mp3",
        ],
        0.2,
    ),
    (SoundCue::Knife, &["assets/sounds/Knife-2.mp3"], 0.3),
];

/// Every player sound, loaded up front.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    clips: HashMap<SoundCue, Vec<SoundHandle>>,
}

impl SoundBank {
    /// Loads and levels every sound the player can emit.
    ///
    /// # Errors
    /// Fails on the first sound the backend cannot load.
    pub fn load<S: SoundManager + ?Sized>(manager: &mut S) -> Result<Self, AssetError> {
        let mut clips = HashMap::new();
        for (cue, paths, volume) in SOUND_ASSETS {
            let mut handles = Vec::with_capacity(paths.len());
            for path in paths {
                let handle = manager.load(path)?;
                manager.set_volume(handle, volume);
                handles.push(handle);
            }
            clips.insert(cue, handles);
        }
        info!("loaded {} sound cues", clips.len());
        Ok(Self { clips })
    }

    /// Handles loaded for `cue`; empty when nothing was loaded.
    #[must_use]
    pub fn variants(&self, cue: SoundCue) -> &[SoundHandle] {
        self.clips.get(&cue).map(Vec::as_slice).unwrap_or_default()
    }

    /// One of the variants for `cue`, picked uniformly.
    pub fn pick<R: Rng + ?Sized>(&self, cue: SoundCue, rng: &mut R) -> Option<SoundHandle> {
        self.variants(cue).choose(rng).copied()
    }
}

/// The four sprite layers that make up the player.
#[derive(Debug)]
pub struct Layers<A> {
    /// Player body.
    pub body: A,
    /// Weapon hand.
    pub hand: A,
    /// Roll-recovery wheel.
    pub stamina: A,
    /// Flamethrower plume.
    pub flame: A,
}

impl<A> Layers<A> {
    fn get_mut(&mut self, layer: Layer) -> &mut A {
        match layer {
            Layer::Body => &mut self.body,
            Layer::Hand => &mut self.hand,
            Layer::Stamina => &mut self.stamina,
            Layer::Flame => &mut self.flame,
        }
    }
}

/// Headless [`AnimationPlayer`] that only keeps time.
///
/// One-shot animations report [`AnimationEvent::Finished`] once, after
/// [`Animation::duration`] seconds; looping ones never do.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    active: Option<Animation>,
    elapsed: f32,
    reported: bool,
    position: Pose,
    angle: f32,
}

impl AnimationClock {
    /// Animation currently playing.
    #[must_use]
    pub const fn active(&self) -> Option<Animation> {
        self.active
    }

    /// Seconds into the active animation.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Last position set.
    #[must_use]
    pub const fn position(&self) -> Pose {
        self.position
    }

    /// Last angle set, in degrees.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }
}

impl AnimationPlayer for AnimationClock {
    fn start_animation(&mut self, animation: Animation, options: AnimationOptions) {
        if self.active == Some(animation) {
            if !options.restart_if_active {
                return;
            }
        } else {
            self.active = Some(animation);
            if !options.clear_time {
                self.reported = false;
                return;
            }
        }
        self.elapsed = 0.0;
        self.reported = false;
    }

    fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let Some(animation) = self.active else {
            return Vec::new();
        };
        self.elapsed += dt.max(0.0);
        let duration = animation.duration();
        if animation.is_looping() {
            if duration > 0.0 {
                self.elapsed %= duration;
            }
            return Vec::new();
        }
        if self.reported || self.elapsed < duration {
            return Vec::new();
        }
        self.reported = true;
        vec![AnimationEvent::Finished(animation)]
    }

    fn set_position(&mut self, position: Pose) {
        self.position = position;
    }

    fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees;
    }
}

const STAMINA_OFFSET: Pose = Pose::new(-50.0, -40.0);

/// Replays cues onto the player's layers and the sound backend.
#[derive(Debug)]
pub struct Presenter<A, S> {
    layers: Layers<A>,
    sounds: S,
    bank: SoundBank,
    hand_animation: Animation,
}

impl<A: AnimationPlayer, S: SoundManager> Presenter<A, S> {
    /// Loads every sound and puts each layer in its resting animation.
    ///
    /// # Errors
    /// Returns the [`AssetError`] of the first sound that fails to load. A
    /// missing asset is fatal; the simulation should not start.
    pub fn new(mut layers: Layers<A>, mut sounds: S) -> Result<Self, AssetError> {
        let bank = SoundBank::load(&mut sounds)?;
        let hand_animation = Animation::HandIdle(WeaponKind::Gun, Facing::Right);
        layers
            .body
            .start_animation(Animation::Idle(Facing::Right), AnimationOptions::RESTART);
        layers
            .hand
            .start_animation(hand_animation, AnimationOptions::RESTART);
        layers
            .stamina
            .start_animation(Animation::StaminaIdle, AnimationOptions::RESTART);
        layers
            .flame
            .start_animation(Animation::FlameIdle, AnimationOptions::RESTART);
        Ok(Self {
            layers,
            sounds,
            bank,
            hand_animation,
        })
    }

    /// Plays drained cues in order; sound variants are picked with `rng`.
    pub fn present<I, R>(&mut self, cues: I, rng: &mut R)
    where
        I: IntoIterator<Item = Cue>,
        R: Rng + ?Sized,
    {
        for cue in cues {
            match cue {
                Cue::Sound(sound) => match self.bank.pick(sound, rng) {
                    Some(handle) => self.sounds.play(handle),
                    None => debug!("no sound loaded for {sound:?}"),
                },
                Cue::Animate { animation, options } => self.start(animation, options),
            }
        }
    }

    fn start(&mut self, animation: Animation, options: AnimationOptions) {
        let layer = animation.layer();
        if layer == Layer::Hand {
            self.hand_animation = animation;
        }
        trace!("{layer:?} layer -> {animation}");
        self.layers.get_mut(layer).start_animation(animation, options);
    }

    /// Moves every layer to the player's current pose and keeps the idle
    /// hand pointed the right way.
    pub fn sync(&mut self, player: &Player) {
        self.layers.body.set_position(player.position());
        if !player.is_rolling() && !player.is_dead() {
            if !player.is_firing() {
                let idle = Animation::HandIdle(player.weapon(), player.hand_facing());
                if idle != self.hand_animation {
                    self.start(idle, AnimationOptions::SWITCH);
                }
                if player.weapon() == WeaponKind::Fire {
                    self.layers
                        .flame
                        .start_animation(Animation::FlameIdle, AnimationOptions::CONTINUE);
                }
            }
            let hand = player.hand_pose();
            self.layers.hand.set_position(hand);
            self.layers.hand.set_angle(hand.angle);
            if player.weapon() == WeaponKind::Fire {
                self.layers.flame.set_position(hand);
                self.layers.flame.set_angle(hand.angle);
            }
        }
        if player.stamina_visible() {
            self.layers.stamina.set_position(player.position() + STAMINA_OFFSET);
        }
    }

    /// Advances every layer and gathers the animations that finished.
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let mut events = self.layers.body.update(dt);
        events.extend(self.layers.hand.update(dt));
        events.extend(self.layers.stamina.update(dt));
        events.extend(self.layers.flame.update(dt));
        events
    }

    /// The sprite layers.
    #[must_use]
    pub const fn layers(&self) -> &Layers<A> {
        &self.layers
    }

    /// The audio backend.
    #[must_use]
    pub const fn sounds(&self) -> &S {
        &self.sounds
    }

    /// Loaded sound handles.
    #[must_use]
    pub const fn bank(&self) -> &SoundBank {
        &self.bank
    }
}
