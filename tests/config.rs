//! Loading tuning overrides from disk and feeding them to a session.

use std::fs;
use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use rollbrawl::error::ConfigError;
use rollbrawl::{InputFrame, Pose, Session, SimConfig, TargetDummy, WeaponKind};
use rstest::rstest;
use test_utils::{FixedCamera, DT};

/// Writes `body` to a per-test file in the system temp dir.
fn scratch_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rollbrawl-{}-{name}.json", std::process::id()));
    fs::write(&path, body).expect("temp dir should be writable");
    path
}

#[rstest]
fn overrides_on_disk_reach_the_simulation() {
    let path = scratch_config(
        "overrides",
        r#"{
            "starting_weapon": "knife",
            "health_loss": 10,
            "weapons": { "Knife": { "damage": 45, "cooldown": 0.2 } }
        }"#,
    );
    let tuning = SimConfig::load(&path).and_then(|c| c.tuning()).expect("valid config");
    fs::remove_file(&path).ok();

    let mut session: Session<TargetDummy> = Session::new(tuning, 1)
        .with_enemies([TargetDummy::new(1, Pose::new(1550.0, 1000.0))]);
    session.place_player(Pose::new(1400.0, 1000.0));
    assert_eq!(session.player().weapon(), WeaponKind::Knife);

    let mut camera = FixedCamera::default();
    session.update(DT, &InputFrame::at_cursor(1550.0, 1000.0).firing(), &[], &mut camera);
    let dummy = session.enemies().first().expect("dummy survives one stab");
    assert_abs_diff_eq!(dummy.damage_taken(), 45.0);

    session.player_mut().set_weapon(WeaponKind::Gun);
    session.restart();
    assert_eq!(session.player().weapon(), WeaponKind::Knife);
}

#[rstest]
fn missing_file_reports_its_path() {
    let path = std::env::temp_dir().join("rollbrawl-does-not-exist.json");
    match SimConfig::load(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[rstest]
#[case::negative_damage(r#"{ "weapons": { "gun": { "damage": -1 } } }"#, "weapons.gun.damage")]
#[case::zero_speed(r#"{ "max_run_speed": 0 }"#, "max_run_speed")]
#[case::zero_health(r#"{ "max_health": 0 }"#, "max_health")]
fn out_of_range_values_name_the_field(#[case] json: &str, #[case] field: &str) {
    let config = SimConfig::from_json(json).expect("well-formed json");
    match config.validate() {
        Err(ConfigError::InvalidValue { field: reported, .. }) => assert_eq!(reported, field),
        other => panic!("expected InvalidValue for {field}, got {other:?}"),
    }
}

#[rstest]
fn unknown_keys_and_weapons_are_rejected() {
    assert!(matches!(
        SimConfig::from_json(r#"{ "max_walk_speed": 3 }"#),
        Err(ConfigError::Parse(_))
    ));
    let laser = SimConfig::from_json(r#"{ "weapons": { "laser": {} } }"#).expect("well-formed json");
    assert!(matches!(laser.validate(), Err(ConfigError::UnknownWeapon(name)) if name == "laser"));
}
