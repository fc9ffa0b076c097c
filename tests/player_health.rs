//! Behavioural tests for hurting, invulnerability and death.

use approx::assert_abs_diff_eq;
use rollbrawl::{Enemy, InputFrame, MovementState, Pose, Session, TargetDummy};
use rstest::rstest;
use test_utils::{assert_within, session_at, FixedCamera, DT};

const START: Pose = Pose::new(1000.0, 1000.0);

fn idle() -> InputFrame {
    InputFrame::at_cursor(1200.0, 1000.0)
}

/// Keeps the dummy glued to the player's right side.
fn pin_dummy(session: &mut Session<TargetDummy>) {
    let beside = session.player().position() + Pose::new(50.0, 0.0);
    if let Some(dummy) = session.enemies_mut().first_mut() {
        dummy.set_position(beside);
    }
}

fn session_with_grunt() -> Session<TargetDummy> {
    session_at(START, 3).with_enemies([TargetDummy::new(1, START + Pose::new(50.0, 0.0))])
}

#[rstest]
fn touching_an_enemy_hurts_and_pushes_away() {
    let mut session = session_with_grunt();
    let mut camera = FixedCamera::default();
    let report = session.update(DT, &idle(), &[], &mut camera);

    assert!(report.hurt);
    assert_abs_diff_eq!(session.player().health(), 60.0, epsilon = 1e-4);
    assert_eq!(session.player().state(), MovementState::TakingDamage);
    assert!(session.player().velocity().x < 0.0);
    assert_abs_diff_eq!(session.damage_flash_alpha(), 255.0);
}

#[rstest]
fn second_hit_inside_window_is_ignored() {
    let mut session = session_with_grunt();
    let mut camera = FixedCamera::default();
    let mut hurts = 0;
    for _ in 0..70 {
        pin_dummy(&mut session);
        let report = session.update(DT, &idle(), &[], &mut camera);
        hurts += usize::from(report.hurt);
    }
    assert_eq!(hurts, 1);
    assert!(session.player().health() > 60.0);
    assert!(session.player().health() < 62.5);
}

#[rstest]
fn hit_lands_again_once_window_expires() {
    let mut session = session_with_grunt();
    let mut camera = FixedCamera::default();
    let mut hurts = 0;
    for _ in 0..90 {
        pin_dummy(&mut session);
        hurts += usize::from(session.update(DT, &idle(), &[], &mut camera).hurt);
    }
    assert_eq!(hurts, 2);
}

#[rstest]
#[case::frozen(0.0)]
#[case::nominal(DT)]
#[case::stutter(0.5)]
#[case::stall(3.0)]
fn health_stays_in_range(#[case] dt: f32) {
    let mut session = session_with_grunt();
    let mut camera = FixedCamera::default();
    for _ in 0..200 {
        pin_dummy(&mut session);
        session.update(dt, &idle(), &[], &mut camera);
        assert_within(session.player().health(), 0.0, session.player().max_health());
        assert!(session.player().position().is_finite());
    }
}

#[rstest]
fn third_heavy_hit_kills_and_restart_is_requested() {
    let mut session = session_with_grunt();
    let mut camera = FixedCamera::default();
    let reports: Vec<_> = (0..3)
        .map(|_| {
            pin_dummy(&mut session);
            session.update(3.0, &idle(), &[], &mut camera)
        })
        .collect();

    assert!(reports.iter().all(|r| r.hurt));
    assert_eq!(reports.iter().filter(|r| r.died).count(), 1);
    assert!(reports.last().is_some_and(|r| r.died));
    assert!(session.player().is_dead());
    assert_abs_diff_eq!(session.player().health(), 0.0);

    pin_dummy(&mut session);
    let after = session.update(DT, &idle().firing().rolling(), &[], &mut camera);
    assert!(!after.hurt);
    assert!(after.fired.is_none());
    assert_eq!(after.state, MovementState::Dead);
    assert!(!session.restart_requested());

    session.update(DT, &idle().restarting(), &[], &mut camera);
    assert!(session.restart_requested());
    session.restart();
    assert_eq!(session.player().state(), MovementState::Idle);
    assert_abs_diff_eq!(session.player().health(), 100.0);
    assert_eq!(session.enemies().len(), 1);
    assert!(session.enemies().iter().all(|e| !e.is_destroyed()));
}

#[rstest]
fn regeneration_caps_at_max_health() {
    let mut session = session_at(START, 1);
    session.player_mut().set_health(99.0);
    let mut camera = FixedCamera::default();
    session.update(1.0, &idle(), &[], &mut camera);
    assert_abs_diff_eq!(session.player().health(), 100.0);
}
