//! Headless driver: plays a scripted brawl against training dummies and logs
//! a JSON summary of what happened.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use rollbrawl::constants::{FRAMERATE, WINDOW_HEIGHT, WINDOW_WIDTH};
use rollbrawl::presentation::AnimationClock;
use rollbrawl::{
    init_logging, AssetError, Camera, Enemy, InputFrame, Layers, Player, Pose, Presenter,
    Session, SimConfig, SoundHandle, SoundManager, TargetDummy, TickReport, Tuning,
};

/// Scripted, headless run of the brawler simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Number of fixed 60 Hz ticks to simulate
    #[arg(long, default_value_t = 1200)]
    ticks: u32,
    /// Seed for the session's random source
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// JSON file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// Training dummies placed in a ring around the player
    #[arg(long, default_value_t = 6)]
    dummies: u32,
}

/// Per-second velocity retention of a knocked-back dummy.
const DUMMY_DRAG_BASE: f32 = 0.05;
const DUMMY_RING_RADIUS: f32 = 450.0;
const DUMMY_HEALTH: f32 = 240.0;
/// Ticks between scripted roll presses.
const ROLL_EVERY: u32 = 150;
/// Ticks spent on each leg of the walking square.
const LEG_TICKS: u32 = 90;

/// Camera that snaps to its target, top-left anchored.
struct SnapCamera {
    origin: Pose,
}

impl SnapCamera {
    fn centred_on(target: Pose) -> Self {
        let mut camera = Self { origin: Pose::ZERO };
        camera.set_target(target);
        camera
    }

    fn world_to_screen(&self, point: Pose) -> (f32, f32) {
        (point - self.origin).position()
    }
}

impl Camera for SnapCamera {
    fn screen_to_world(&self, point: (f32, f32)) -> Pose {
        self.origin + Pose::from(point)
    }

    fn set_target(&mut self, target: Pose) {
        self.origin = target - Pose::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0);
    }
}

/// Sound backend without a device: accepts every path and counts plays.
#[derive(Default)]
struct SilentSounds {
    loaded: Vec<String>,
    played: u64,
}

impl SoundManager for SilentSounds {
    fn load(&mut self, path: &str) -> Result<SoundHandle, AssetError> {
        let id = u32::try_from(self.loaded.len()).map_err(|_| AssetError::Unloadable {
            path: path.to_owned(),
            reason: "too many sounds".to_owned(),
        })?;
        self.loaded.push(path.to_owned());
        Ok(SoundHandle(id))
    }

    fn play(&mut self, sound: SoundHandle) {
        self.played += 1;
        if let Some(path) = usize::try_from(sound.0).ok().and_then(|i| self.loaded.get(i)) {
            trace!("play {path}");
        }
    }

    fn set_volume(&mut self, _sound: SoundHandle, _volume: f32) {}
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    ticks: u32,
    shots: BTreeMap<&'static str, u32>,
    projectile_hits: usize,
    hurts: u32,
    deaths: u32,
    restarts: u32,
    dummies_destroyed: usize,
    particle_bursts: usize,
    shakes: usize,
    sounds_played: u64,
    last: Option<TickReport>,
}

impl Summary {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        if let Some(fired) = report.fired {
            *self.shots.entry(fired.weapon.name()).or_default() += 1;
        }
        self.projectile_hits += report.projectile_hits;
        self.hurts += u32::from(report.hurt);
        self.deaths += u32::from(report.died);
        self.dummies_destroyed += report.pruned_enemies;
        self.last = Some(*report);
    }
}

fn spawn_dummies(count: u32, centre: Pose) -> Vec<TargetDummy> {
    (0..count)
        .map(|i| {
            #[expect(clippy::cast_precision_loss, reason = "dummy counts are small")]
            let bearing = 360.0 * i as f32 / count as f32;
            TargetDummy::new(i + 1, centre + Pose::polar(DUMMY_RING_RADIUS, bearing))
                .with_health(DUMMY_HEALTH)
        })
        .collect()
}

/// Walks a square, rolls periodically and shoots at the nearest dummy.
fn scripted_input(tick: u32, player: &Player, dummies: &[TargetDummy], camera: &SnapCamera) -> InputFrame {
    let here = player.position();
    let target = dummies
        .iter()
        .filter(|dummy| !dummy.is_destroyed())
        .map(Enemy::position)
        .min_by(|a, b| here.distance_to(*a).total_cmp(&here.distance_to(*b)));
    let aim = target.unwrap_or_else(|| here + Pose::new(200.0, 0.0));
    let (sx, sy) = camera.world_to_screen(aim);

    let (dx, dy) = match (tick / LEG_TICKS) % 4 {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    };
    let mut input = InputFrame::at_cursor(sx, sy).moving(dx, dy);
    input.fire = target.is_some();
    input.roll = tick % ROLL_EVERY == ROLL_EVERY - 1;
    input.restart = player.is_dead();
    input
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match &args.config {
        Some(path) => SimConfig::load(path)
            .and_then(|config| config.tuning())
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Tuning::default(),
    };
    debug!("tuning: {}", serde_json::to_string(&tuning)?);

    let mut session: Session<TargetDummy> = Session::new(tuning, args.seed);
    let centre = session.player().position();
    session = session.with_enemies(spawn_dummies(args.dummies, centre));

    let layers = Layers {
        body: AnimationClock::default(),
        hand: AnimationClock::default(),
        stamina: AnimationClock::default(),
        flame: AnimationClock::default(),
    };
    let mut presenter =
        Presenter::new(layers, SilentSounds::default()).context("loading player sounds")?;
    let mut presentation_rng = StdRng::seed_from_u64(args.seed.wrapping_add(1));
    let mut camera = SnapCamera::centred_on(centre);
    let mut events = Vec::new();
    let mut summary = Summary::default();
    let dt = 1.0 / FRAMERATE;

    info!(
        "running {} ticks against {} dummies (seed {})",
        args.ticks, args.dummies, args.seed
    );
    for tick in 0..args.ticks {
        let input = scripted_input(tick, session.player(), session.enemies(), &camera);
        let report = session.update(dt, &input, &events, &mut camera);
        summary.record(&report);
        if report.died {
            info!("player died on tick {}", report.tick);
        }

        let effects = session.effects_mut();
        summary.particle_bursts += effects.drain_particles().count();
        summary.shakes += effects.drain_shakes().count();
        presenter.present(effects.drain_cues(), &mut presentation_rng);
        presenter.sync(session.player());
        events = presenter.update(dt);

        for dummy in session.enemies_mut() {
            dummy.drift(dt, DUMMY_DRAG_BASE);
        }
        if session.restart_requested() {
            summary.restarts += 1;
            session.restart();
        }
    }

    summary.sounds_played = presenter.sounds().played;
    info!("summary: {}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
