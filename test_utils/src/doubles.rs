//! Recording doubles for the presentation contracts.

use rollbrawl::{
    Animation, AnimationClock, AnimationEvent, AnimationOptions, AnimationPlayer, AssetError,
    Camera, Pose, SoundHandle, SoundManager,
};

/// Camera mapping screen points to world points by a fixed offset.
///
/// Every target pushed by the session is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct FixedCamera {
    /// World position of the screen origin.
    pub offset: Pose,
    /// Every target pushed, oldest first.
    pub targets: Vec<Pose>,
}

impl FixedCamera {
    /// Camera whose screen origin sits at `offset` in the world.
    pub fn new(offset: Pose) -> Self {
        Self {
            offset,
            targets: Vec::new(),
        }
    }

    /// Most recent camera target, if any tick has run.
    pub fn last_target(&self) -> Option<Pose> {
        self.targets.last().copied()
    }
}

impl Camera for FixedCamera {
    fn screen_to_world(&self, point: (f32, f32)) -> Pose {
        self.offset + Pose::from(point)
    }

    fn set_target(&mut self, target: Pose) {
        self.targets.push(target);
    }
}

/// Animation layer that keeps real timing and logs every start request.
#[derive(Debug, Clone, Default)]
pub struct RecordingLayer {
    clock: AnimationClock,
    /// Start requests in arrival order.
    pub started: Vec<(Animation, AnimationOptions)>,
}

impl RecordingLayer {
    /// Animation currently playing.
    pub fn active(&self) -> Option<Animation> {
        self.clock.active()
    }

    /// Last position set.
    pub fn position(&self) -> Pose {
        self.clock.position()
    }

    /// Whether `animation` was ever requested on this layer.
    pub fn saw(&self, animation: Animation) -> bool {
        self.started.iter().any(|(a, _)| *a == animation)
    }
}

impl AnimationPlayer for RecordingLayer {
    fn start_animation(&mut self, animation: Animation, options: AnimationOptions) {
        self.started.push((animation, options));
        self.clock.start_animation(animation, options);
    }

    fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        self.clock.update(dt)
    }

    fn set_position(&mut self, position: Pose) {
        self.clock.set_position(position);
    }

    fn set_angle(&mut self, degrees: f32) {
        self.clock.set_angle(degrees);
    }
}

/// Sound backend that refuses chosen paths and records what it did.
#[derive(Debug, Clone, Default)]
pub struct RecordingSounds {
    missing: Vec<String>,
    loaded: Vec<(String, f32)>,
    played: Vec<SoundHandle>,
}

impl RecordingSounds {
    /// Backend where every path containing one of `fragments` is missing.
    pub fn missing<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            missing: fragments.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Path the handle was loaded from.
    pub fn path_of(&self, handle: SoundHandle) -> Option<&str> {
        let index = usize::try_from(handle.0).ok()?;
        self.loaded.get(index).map(|(path, _)| path.as_str())
    }

    /// Volume last set for the sound loaded from `path`.
    pub fn volume_of(&self, path: &str) -> Option<f32> {
        self.loaded
            .iter()
            .find(|(loaded, _)| loaded == path)
            .map(|(_, volume)| *volume)
    }

    /// Paths of every sound played, in order.
    pub fn played_paths(&self) -> Vec<&str> {
        self.played
            .iter()
            .filter_map(|handle| self.path_of(*handle))
            .collect()
    }

    /// Forgets every play so far.
    pub fn clear_played(&mut self) {
        self.played.clear();
    }
}

impl SoundManager for RecordingSounds {
    fn load(&mut self, path: &str) -> Result<SoundHandle, AssetError> {
        if self.missing.iter().any(|fragment| path.contains(fragment.as_str())) {
            return Err(AssetError::Missing {
                path: path.to_owned(),
            });
        }
        let id = u32::try_from(self.loaded.len()).map_err(|_| AssetError::Unloadable {
            path: path.to_owned(),
            reason: "handle space exhausted".to_owned(),
        })?;
        self.loaded.push((path.to_owned(), 1.0));
        Ok(SoundHandle(id))
    }

    fn play(&mut self, sound: SoundHandle) {
        self.played.push(sound);
    }

    fn set_volume(&mut self, sound: SoundHandle, volume: f32) {
        let slot = usize::try_from(sound.0)
            .ok()
            .and_then(|index| self.loaded.get_mut(index));
        if let Some((_, level)) = slot {
            *level = volume;
        }
    }
}
