//! The player avatar and its per-tick phases.
//!
//! [`crate::session::Session::update`] calls the phases below in a fixed
//! order: animation events, timers, triggers, steering, firing, aim, contacts
//! and finally the death check. Each phase only touches the player and the
//! borrowed [`FrameContext`].

mod aim;
mod input;
mod state;

pub use aim::AimState;
pub use input::InputFrame;
pub use state::{Facing, MovementState};

use log::{debug, info, trace};
use rand::Rng;
use serde::Serialize;

use crate::collision::{player_contacts, Contact, PlayerPosture};
use crate::config::Tuning;
use crate::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, CAMERA_PLAYER_WEIGHT, DAMAGE_FLASH_ALPHA, FOOTSTEP_INTERVAL,
    HEALTH_REGEN_PER_SEC, HURT_KNOCKBACK, HURT_SHAKE, IDLE_DRAG_BASE, INVULNERABILITY_WINDOW,
    LAST_FIRE, PLAYER_RADIUS, ROLL_DUST_PUFFS, ROLL_EXIT_SHAKE, SINCE_DAMAGE, SINCE_ROLL_FINISH,
    WALK_ACCELERATION,
};
use crate::cue::{Animation, AnimationOptions, ParticleKind, SoundCue};
use crate::enemy::Enemy;
use crate::physics::{advance, clamp_speed, decay_pose};
use crate::pose::Pose;
use crate::presentation::AnimationEvent;
use crate::session::FrameContext;
use crate::weapon::WeaponKind;

/// The player avatar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub(crate) position: Pose,
    pub(crate) velocity: Pose,
    radius: f32,
    health: f32,
    max_health: f32,
    state: MovementState,
    facing: Facing,
    hand_facing: Facing,
    body_animation: Animation,
    pub(crate) weapon: WeaponKind,
    /// Seconds since the last shot.
    pub(crate) last_fire: f32,
    pub(crate) firing: bool,
    pub(crate) aim: AimState,
    since_damage: f32,
    since_roll_finish: f32,
    since_kick: f32,
    stamina_visible: bool,
}

impl Player {
    /// Spawns the player in the arena centre with full health and a gun.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            position: Pose::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            velocity: Pose::ZERO,
            radius: PLAYER_RADIUS,
            health: tuning.max_health,
            max_health: tuning.max_health,
            state: MovementState::Idle,
            facing: Facing::Right,
            hand_facing: Facing::Right,
            body_animation: Animation::Idle(Facing::Right),
            weapon: tuning.starting_weapon,
            last_fire: LAST_FIRE,
            firing: false,
            aim: AimState::default(),
            since_damage: SINCE_DAMAGE,
            since_roll_finish: SINCE_ROLL_FINISH,
            since_kick: 0.0,
            stamina_visible: false,
        }
    }

    /// Centre in world units.
    #[must_use]
    pub const fn position(&self) -> Pose {
        self.position
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> Pose {
        self.velocity
    }

    /// Collision radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Health ceiling.
    #[must_use]
    pub const fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Movement state.
    #[must_use]
    pub const fn state(&self) -> MovementState {
        self.state
    }

    /// Side the body sprite faces.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Side the hand sprite is mirrored to.
    #[must_use]
    pub const fn hand_facing(&self) -> Facing {
        self.hand_facing
    }

    /// Equipped weapon.
    #[must_use]
    pub const fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    /// Seconds since the last shot.
    #[must_use]
    pub const fn cooldown_timer(&self) -> f32 {
        self.last_fire
    }

    /// Smoothed aim and arm angles.
    #[must_use]
    pub const fn aim(&self) -> &AimState {
        &self.aim
    }

    /// Seconds since the last hit.
    #[must_use]
    pub const fn since_damage(&self) -> f32 {
        self.since_damage
    }

    /// Seconds since the last roll ended; zero while rolling.
    #[must_use]
    pub const fn since_roll_finish(&self) -> f32 {
        self.since_roll_finish
    }

    /// Whether the roll cooldown wheel is showing.
    #[must_use]
    pub const fn stamina_visible(&self) -> bool {
        self.stamina_visible
    }

    /// Whether a firing swing is still playing.
    #[must_use]
    pub const fn is_firing(&self) -> bool {
        self.firing
    }

    /// Whether a roll is in progress.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.state == MovementState::Rolling
    }

    /// Whether the player has died.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.state == MovementState::Dead
    }

    /// Teleports the player.
    pub fn set_position(&mut self, position: Pose) {
        self.position = position;
    }

    /// Overrides the velocity.
    pub fn set_velocity(&mut self, velocity: Pose) {
        self.velocity = velocity;
    }

    /// Equips `weapon`.
    pub fn set_weapon(&mut self, weapon: WeaponKind) {
        self.weapon = weapon;
    }

    /// Sets the seconds elapsed since the last shot.
    pub fn set_cooldown_timer(&mut self, seconds: f32) {
        self.last_fire = seconds.max(0.0);
    }

    /// Sets health, clamped into `[0, max_health]`.
    pub fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }

    /// World-space hand pose; `angle` is the weapon sprite angle.
    #[must_use]
    pub fn hand_pose(&self) -> Pose {
        let at = self.position + self.aim.hand_offset(self.weapon);
        let flip = if self.hand_facing == Facing::Left { 180.0 } else { 0.0 };
        Pose::with_angle(at.x, at.y, (self.aim.aim_angle + flip) % 360.0)
    }

    fn posture(&self) -> PlayerPosture {
        PlayerPosture {
            position: self.position,
            radius: self.radius,
            rolling: self.is_rolling(),
            dead: self.is_dead(),
        }
    }

    fn set_body_animation<E: Enemy>(
        &mut self,
        animation: Animation,
        options: AnimationOptions,
        frame: &mut FrameContext<'_, E>,
    ) {
        if animation != self.body_animation || options.restart_if_active {
            self.body_animation = animation;
            frame.effects.animate(animation, options);
        }
    }

    /// Reacts to an animation that finished during the previous tick.
    pub fn on_animation_finished<E: Enemy>(&mut self, event: AnimationEvent, frame: &mut FrameContext<'_, E>) {
        let AnimationEvent::Finished(animation) = event;
        match animation {
            Animation::Rolling if self.is_rolling() => self.stop_rolling(frame),
            Animation::TakeDamage(_) if self.state == MovementState::TakingDamage => {
                self.state = MovementState::Idle;
            }
            Animation::HandFire(..) => self.firing = false,
            Animation::Stamina => self.stamina_visible = false,
            _ => {}
        }
    }

    /// Advances timers and passive regeneration.
    pub fn tick_timers(&mut self, dt: f32) {
        self.since_damage += dt;
        self.health = (self.health + HEALTH_REGEN_PER_SEC * dt).min(self.max_health);
        if self.is_rolling() {
            self.since_roll_finish = 0.0;
        } else {
            self.since_roll_finish += dt;
        }
        self.last_fire += dt;
    }

    /// Input direction after posture locks: zero while dead or while the
    /// flamethrower is firing.
    #[must_use]
    pub fn steering_direction(&self, input: &InputFrame) -> Pose {
        if self.is_dead() || (self.firing && self.weapon == WeaponKind::Fire) {
            Pose::ZERO
        } else {
            input.direction()
        }
    }

    /// Handles the roll and restart presses.
    pub fn handle_triggers<E: Enemy>(&mut self, input: &InputFrame, direction: Pose, frame: &mut FrameContext<'_, E>) {
        if input.roll && !self.is_rolling() && !self.is_dead() && !self.stamina_visible {
            self.roll(direction, frame);
        }
        if input.restart && self.is_dead() {
            info!("restart requested");
            *frame.restart_requested = true;
        }
    }

    /// Whether the fire button may start a shot this tick.
    #[must_use]
    pub fn wants_to_fire(&self, input: &InputFrame) -> bool {
        input.fire && !self.is_rolling() && !self.firing && !self.is_dead()
    }

    fn roll<E: Enemy>(&mut self, direction: Pose, frame: &mut FrameContext<'_, E>) {
        self.last_fire = LAST_FIRE;
        self.state = MovementState::Rolling;
        self.set_body_animation(Animation::Rolling, AnimationOptions::RESTART, frame);
        let heading = if direction.magnitude() == 0.0 {
            Pose::new(self.facing.sign(), 0.0)
        } else {
            direction
        };
        self.velocity = heading.scale_position(frame.tuning.roll_mult_factor);
        self.firing = false;
        frame.effects.sound(SoundCue::Roll);
        debug!("roll started toward ({:.1}, {:.1})", heading.x, heading.y);
    }

    fn stop_rolling<E: Enemy>(&mut self, frame: &mut FrameContext<'_, E>) {
        self.state = MovementState::Idle;
        self.stamina_visible = true;
        frame.effects.animate(Animation::Stamina, AnimationOptions::RESTART);
        self.set_body_animation(Animation::Idle(Facing::Right), AnimationOptions::RESTART, frame);
        frame
            .effects
            .burst(ParticleKind::Puff, self.position, Pose::ZERO, ROLL_DUST_PUFFS);
        let previous = self.weapon;
        self.weapon = previous.reroll(frame.rng);
        frame.effects.shake(self.velocity, ROLL_EXIT_SHAKE);
        debug!("roll finished; weapon {} -> {}", previous.name(), self.weapon.name());
    }

    /// Applies steering, drag and speed caps, then moves the player and
    /// keeps its circle inside the arena.
    pub fn steer<E: Enemy>(&mut self, direction: Pose, dt: f32, frame: &mut FrameContext<'_, E>) {
        let flashing = *frame.damage_flash_alpha > 0.0;
        let previous = self.state;
        if self.state.accepts_steering() {
            if direction.magnitude() > 0.0 {
                self.velocity += direction.scale_to(WALK_ACCELERATION * dt);
                self.state = MovementState::Walking;
            } else {
                if !flashing {
                    decay_pose(&mut self.velocity, IDLE_DRAG_BASE, dt);
                }
                if self.state != MovementState::Dead {
                    self.state = MovementState::Idle;
                }
            }
            if direction.x != 0.0 {
                self.facing = Facing::from_x(direction.x);
            }
        }

        match self.state {
            MovementState::Walking => {
                let entering = previous != MovementState::Walking;
                if entering {
                    self.since_kick = 0.0;
                }
                let animation = if direction.y < 0.0 {
                    Animation::WalkBack(self.facing)
                } else {
                    Animation::Walk(self.facing)
                };
                let options = AnimationOptions {
                    restart_if_active: false,
                    clear_time: entering,
                };
                self.set_body_animation(animation, options, frame);
            }
            MovementState::Idle => {
                self.set_body_animation(Animation::Idle(self.facing), AnimationOptions::CONTINUE, frame);
            }
            MovementState::Dead => {
                self.set_body_animation(Animation::Dead, AnimationOptions::CONTINUE, frame);
            }
            MovementState::TakingDamage => {
                self.set_body_animation(
                    Animation::TakeDamage(self.facing),
                    AnimationOptions::CONTINUE,
                    frame,
                );
            }
            MovementState::Rolling => {}
        }

        if !self.is_rolling() && !flashing {
            clamp_speed(&mut self.velocity, frame.tuning.max_run_speed);
        }
        if self.firing && self.weapon == WeaponKind::Gatling {
            clamp_speed(&mut self.velocity, frame.tuning.max_gatling_speed);
        }
        advance(&mut self.position, self.velocity, dt);
        self.clamp_to_arena();
    }

    fn clamp_to_arena(&mut self) {
        let r = self.radius;
        self.position.x = self.position.x.clamp(r, ARENA_WIDTH - r);
        self.position.y = self.position.y.clamp(r, ARENA_HEIGHT - r);
    }

    /// Eases the aim toward `cursor` and, between shots, re-mirrors the hand
    /// to the side it points at.
    pub fn track_aim(&mut self, cursor: Pose, dt: f32) {
        let relative = Pose::new(cursor.x - self.position.x, cursor.y - self.position.y);
        self.aim.track(relative.angle_of_position_degrees(), dt);
        if !self.firing {
            self.hand_facing = Facing::from_x(self.aim.hand_offset(self.weapon).x);
        }
    }

    /// Camera focus: mostly the player, pulled a fifth of the way to the cursor.
    #[must_use]
    pub fn camera_target(&self, cursor: Pose) -> Pose {
        self.position.blend(cursor, CAMERA_PLAYER_WEIGHT)
    }

    /// Records which way the hand faces for a shot aimed along `relative`.
    pub(crate) fn face_hand(&mut self, relative: Pose) {
        self.hand_facing = Facing::from_x(relative.x);
    }

    /// Kicks up dust and plays a footstep every third of a second of walking.
    pub fn footsteps<E: Enemy>(&mut self, dt: f32, frame: &mut FrameContext<'_, E>) {
        if self.state == MovementState::Walking {
            self.since_kick += dt;
        }
        let speed = self.velocity.magnitude();
        if self.since_kick <= FOOTSTEP_INTERVAL || speed <= 0.0 {
            return;
        }
        self.since_kick -= FOOTSTEP_INTERVAL;
        let heel = self.position + self.velocity.scale_to(30.0);
        let kick = self.velocity.scale_position(-0.3);
        for spread in [-20.0, 0.0, 20.0] {
            let jitter = Pose::new(
                frame.rng.random::<f32>() * 10.0 - 5.0,
                frame.rng.random::<f32>() * 10.0 - 5.0,
            );
            frame
                .effects
                .burst(ParticleKind::Puff, heel + jitter, kick.rotate(spread), 1);
        }
        frame.effects.sound(SoundCue::Footstep);
    }

    /// Knocks the player back along `direction` and takes a fixed bite of
    /// health. Ignored inside the invulnerability window.
    ///
    /// Returns whether the hit landed.
    pub fn get_hurt<E: Enemy>(&mut self, direction: Pose, frame: &mut FrameContext<'_, E>) -> bool {
        if self.since_damage < INVULNERABILITY_WINDOW {
            trace!("hurt ignored, {:.2}s into invulnerability", self.since_damage);
            return false;
        }
        let push = if direction.magnitude() == 0.0 {
            Pose::new(1.0, 0.0)
        } else {
            direction
        };
        self.velocity += push.scale_to(HURT_KNOCKBACK);
        frame.effects.sound(SoundCue::TakeDamage);
        *frame.damage_flash_alpha = DAMAGE_FLASH_ALPHA;
        frame.effects.shake(push, HURT_SHAKE);
        self.since_damage = 0.0;
        self.health -= frame.tuning.health_loss;
        self.state = MovementState::TakingDamage;
        self.set_body_animation(Animation::TakeDamage(self.facing), AnimationOptions::RESTART, frame);
        debug!("player hurt, health now {:.1}", self.health);
        true
    }

    /// Resolves enemy contact for this tick. Returns whether the player was hurt.
    pub fn resolve_contacts<E: Enemy>(&mut self, frame: &mut FrameContext<'_, E>) -> bool {
        let mut hurt = false;
        for (index, contact) in player_contacts(self.posture(), frame.enemies) {
            match contact {
                Contact::Crushed => {
                    if let Some(enemy) = frame.enemies.get_mut(index) {
                        debug!("rolled over enemy {}", enemy.id());
                        enemy.mark_lethal();
                        enemy.destroy();
                    }
                }
                Contact::Hurt { direction } => {
                    hurt |= self.get_hurt(direction, frame);
                }
                Contact::Laser { direction } => {
                    hurt |= self.get_hurt(direction, frame);
                    if let Some(enemy) = frame.enemies.get_mut(index) {
                        enemy.swoop_above_player();
                    }
                }
            }
        }
        hurt
    }

    /// Enters `Dead` once health has dropped below zero, then clamps health.
    ///
    /// Returns `true` on the tick the player dies.
    pub fn check_death<E: Enemy>(&mut self, frame: &mut FrameContext<'_, E>) -> bool {
        let dies = self.health < 0.0 && !self.is_dead();
        if dies {
            self.state = MovementState::Dead;
            self.firing = false;
            frame.effects.sound(SoundCue::Death);
            self.set_body_animation(Animation::Dead, AnimationOptions::RESTART, frame);
            info!("player died");
        }
        self.health = self.health.clamp(0.0, self.max_health);
        debug_assert!(self.position.is_finite(), "player position went non-finite");
        dies
    }
}
