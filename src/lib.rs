#![cfg_attr(docsrs, feature(doc_cfg))]
//! Simulation core of a top-down roll-and-shoot brawler.
//!
//! The crate owns player movement, the six weapons, their projectiles and
//! damage resolution against enemies. Rendering, audio and enemy behaviour
//! stay outside: the core talks to them through the traits in
//! [`presentation`] and the [`Enemy`] contract, and everything is driven by
//! [`Session::update`].
pub mod collision;
pub mod config;
pub mod constants;
pub mod cue;
pub mod enemy;
pub mod error;
pub mod logging;
pub mod physics;
pub mod player;
pub mod pose;
pub mod presentation;
pub mod projectile;
pub mod session;
pub mod vector_math;
pub mod weapon;

// Re-export commonly used items
pub use collision::{circles_overlap, within_reach, Contact};
pub use config::{SimConfig, Tuning};
pub use cue::{Animation, AnimationOptions, Cue, EffectQueue, ParticleBurst, Shake, SoundCue};
pub use enemy::{AttackMode, Enemy, EnemyId, EnemyKind, TargetDummy};
pub use error::{AssetError, ConfigError};
pub use logging::init as init_logging;
pub use player::{Facing, InputFrame, MovementState, Player};
pub use pose::Pose;
pub use presentation::{
    AnimationClock, AnimationEvent, AnimationPlayer, Camera, Layers, Presenter, SoundBank,
    SoundHandle, SoundManager,
};
pub use projectile::{Bread, Bullet, Projectile, ProjectileSet, Shuriken};
pub use session::{FrameContext, Session, TickReport};
pub use vector_math::{vec_mag, vec_normalize};
pub use weapon::{FireReport, WeaponKind, WeaponStats, WeaponTable};

#[cfg(test)]
mod assertions {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Pose: Copy, Send, Sync);
    assert_impl_all!(InputFrame: Copy, Send, Sync);
    assert_impl_all!(WeaponKind: Copy, Send, Sync);
    assert_impl_all!(MovementState: Copy, Send, Sync);
    assert_impl_all!(Tuning: Copy, Send, Sync);
    assert_impl_all!(Cue: Copy, Send, Sync);
    assert_impl_all!(AnimationEvent: Copy, Send, Sync);
    assert_impl_all!(TickReport: Copy, Send, Sync);
}

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust
    //! use rollbrawl::prelude::*;
    //!
    //! let mut session: Session<TargetDummy> = Session::new(Tuning::default(), 7);
    //! session.spawn_enemy(TargetDummy::new(1, Pose::new(1600.0, 1000.0)));
    //! assert_eq!(session.player().state(), MovementState::Idle);
    //! ```

    pub use crate::enemy::{Enemy, TargetDummy};
    pub use crate::player::{InputFrame, MovementState};
    pub use crate::pose::Pose;
    pub use crate::presentation::Camera;
    pub use crate::session::Session;
    pub use crate::weapon::WeaponKind;
    pub use crate::Tuning;
}
