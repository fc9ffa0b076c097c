//! Session builders and a harness that closes the presentation loop.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rollbrawl::{
    AnimationEvent, InputFrame, Layers, Pose, Presenter, Session, TargetDummy, TickReport,
    Tuning,
};

use crate::doubles::{FixedCamera, RecordingLayer, RecordingSounds};

/// One tick at the nominal 60 Hz frame rate.
pub const DT: f32 = 1.0 / 60.0;

/// Default-tuned session with the player placed at `position`.
pub fn session_at(position: Pose, seed: u64) -> Session<TargetDummy> {
    let mut session = Session::new(Tuning::default(), seed);
    session.place_player(position);
    session
}

/// A session wired to recording collaborators.
///
/// [`Harness::step`] feeds animation completions from one tick into the
/// next, the way a real frame loop does.
pub struct Harness {
    /// Session under test.
    pub session: Session<TargetDummy>,
    /// Presenter replaying each tick's cues.
    pub presenter: Presenter<RecordingLayer, RecordingSounds>,
    /// Camera with no offset.
    pub camera: FixedCamera,
    events: Vec<AnimationEvent>,
    rng: StdRng,
}

impl Harness {
    /// Wraps `session` with fresh recording doubles.
    ///
    /// # Panics
    /// Panics if the recording sound backend rejects a sound, which it
    /// never does without configured missing paths.
    pub fn new(session: Session<TargetDummy>) -> Self {
        let layers = Layers {
            body: RecordingLayer::default(),
            hand: RecordingLayer::default(),
            stamina: RecordingLayer::default(),
            flame: RecordingLayer::default(),
        };
        let presenter = match Presenter::new(layers, RecordingSounds::default()) {
            Ok(presenter) => presenter,
            Err(error) => panic!("recording sounds should always load: {error}"),
        };
        Self {
            session,
            presenter,
            camera: FixedCamera::default(),
            events: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Runs one tick, presents its cues and collects finished animations.
    pub fn step(&mut self, input: &InputFrame) -> TickReport {
        let report = self
            .session
            .update(DT, input, &self.events, &mut self.camera);
        let cues: Vec<_> = self.session.effects_mut().drain_cues().collect();
        self.presenter.present(cues, &mut self.rng);
        self.presenter.sync(self.session.player());
        self.events = self.presenter.update(DT);
        report
    }

    /// Steps `ticks` times with the same input and returns every report.
    pub fn run(&mut self, input: &InputFrame, ticks: usize) -> Vec<TickReport> {
        (0..ticks).map(|_| self.step(input)).collect()
    }

    /// Steps until `done` holds or `limit` ticks have passed.
    pub fn run_until<F>(&mut self, input: &InputFrame, limit: usize, mut done: F) -> Option<TickReport>
    where
        F: FnMut(&Session<TargetDummy>, &TickReport) -> bool,
    {
        for _ in 0..limit {
            let report = self.step(input);
            if done(&self.session, &report) {
                return Some(report);
            }
        }
        None
    }

    /// Animation completions waiting for the next tick.
    pub fn pending_events(&self) -> &[AnimationEvent] {
        &self.events
    }
}
