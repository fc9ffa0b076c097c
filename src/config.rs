//! Startup configuration.
//!
//! [`Tuning`] is the resolved set of values the simulation reads each tick.
//! It defaults to [`crate::constants`]; a [`SimConfig`] loaded from JSON can
//! override a subset before the session starts.
//!
//! ```
//! use rollbrawl::config::SimConfig;
//! use rollbrawl::WeaponKind;
//!
//! let config = SimConfig::from_json(r#"{ "weapons": { "gun": { "damage": 75 } } }"#)?;
//! let tuning = config.tuning()?;
//! assert_eq!(tuning.weapons.damage(WeaponKind::Gun), 75.0);
//! # Ok::<(), rollbrawl::error::ConfigError>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{
    HEALTH_LOSS, MAX_GATLING_SPEED, MAX_HEALTH, MAX_RUN_SPEED, ROLL_MULT_FACTOR,
};
use crate::error::ConfigError;
use crate::weapon::{WeaponKind, WeaponStats, WeaponTable};

/// Resolved tunables shared by every phase of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tuning {
    /// Speed cap outside rolls and damage flashes.
    pub max_run_speed: f32,
    /// Speed cap while the Gatling is firing.
    pub max_gatling_speed: f32,
    /// Roll impulse per unit of input direction.
    pub roll_mult_factor: f32,
    /// Health ceiling and spawn health.
    pub max_health: f32,
    /// Health removed by one hurt.
    pub health_loss: f32,
    /// Weapon held at spawn and after a restart.
    pub starting_weapon: WeaponKind,
    /// Cooldown and damage per weapon.
    pub weapons: WeaponTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_run_speed: MAX_RUN_SPEED,
            max_gatling_speed: MAX_GATLING_SPEED,
            roll_mult_factor: ROLL_MULT_FACTOR,
            max_health: MAX_HEALTH,
            health_loss: HEALTH_LOSS,
            starting_weapon: WeaponKind::Gun,
            weapons: WeaponTable::default(),
        }
    }
}

/// Per-weapon override; absent fields keep the default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponOverride {
    /// Seconds between shots.
    pub cooldown: Option<f32>,
    /// Damage per hit.
    pub damage: Option<f32>,
}

/// JSON-loadable overrides of the fixed tuning.
///
/// Every field is optional; weapons are keyed by name, case-insensitively.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Overrides [`Tuning::max_run_speed`].
    pub max_run_speed: Option<f32>,
    /// Overrides [`Tuning::max_gatling_speed`].
    pub max_gatling_speed: Option<f32>,
    /// Overrides [`Tuning::roll_mult_factor`].
    pub roll_mult_factor: Option<f32>,
    /// Overrides [`Tuning::max_health`].
    pub max_health: Option<f32>,
    /// Overrides [`Tuning::health_loss`].
    pub health_loss: Option<f32>,
    /// Weapon name, e.g. `"knife"`.
    pub starting_weapon: Option<String>,
    /// Per-weapon overrides keyed by name.
    pub weapons: BTreeMap<String, WeaponOverride>,
}

/// Value must be finite and strictly positive.
fn positive(field: &str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            value,
            expected: "a finite number above zero",
        })
    }
}

/// Value must be finite and not negative.
fn non_negative(field: &str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            value,
            expected: "a finite number of zero or more",
        })
    }
}

fn weapon_named(name: &str) -> Result<WeaponKind, ConfigError> {
    WeaponKind::from_name(name).ok_or_else(|| ConfigError::UnknownWeapon(name.to_owned()))
}

impl SimConfig {
    /// Parses a config from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks every override without building a [`Tuning`].
    ///
    /// # Errors
    /// Returns the first invalid value or unknown weapon name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning().map(|_| ())
    }

    /// Applies the overrides on top of [`Tuning::default`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for non-finite, negative or
    /// zero values where a positive one is required, and
    /// [`ConfigError::UnknownWeapon`] for unrecognised weapon names.
    pub fn tuning(&self) -> Result<Tuning, ConfigError> {
        let mut tuning = Tuning::default();
        if let Some(value) = self.max_run_speed {
            tuning.max_run_speed = positive("max_run_speed", value)?;
        }
        if let Some(value) = self.max_gatling_speed {
            tuning.max_gatling_speed = positive("max_gatling_speed", value)?;
        }
        if let Some(value) = self.roll_mult_factor {
            tuning.roll_mult_factor = positive("roll_mult_factor", value)?;
        }
        if let Some(value) = self.max_health {
            tuning.max_health = positive("max_health", value)?;
        }
        if let Some(value) = self.health_loss {
            tuning.health_loss = non_negative("health_loss", value)?;
        }
        if let Some(name) = &self.starting_weapon {
            tuning.starting_weapon = weapon_named(name)?;
        }
        for (name, change) in &self.weapons {
            let kind = weapon_named(name)?;
            let current = tuning.weapons.get(kind);
            let stats = WeaponStats {
                cooldown: change
                    .cooldown
                    .map_or(Ok(current.cooldown), |v| {
                        non_negative(&format!("weapons.{name}.cooldown"), v)
                    })?,
                damage: change
                    .damage
                    .map_or(Ok(current.damage), |v| {
                        non_negative(&format!("weapons.{name}.damage"), v)
                    })?,
            };
            debug!("{} tuned to {stats:?}", kind.name());
            tuning.weapons.set(kind, stats);
        }
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    fn empty_config_keeps_defaults() {
        let tuning = SimConfig::from_json("{}").and_then(|c| c.tuning());
        assert!(matches!(tuning, Ok(t) if t == Tuning::default()));
    }

    #[rstest]
    fn overrides_apply_on_top_of_defaults() {
        let json = r#"{
            "max_run_speed": 600,
            "starting_weapon": "Knife",
            "weapons": { "GATLING": { "cooldown": 0.2 } }
        }"#;
        let Ok(tuning) = SimConfig::from_json(json).and_then(|c| c.tuning()) else {
            panic!("config should be accepted");
        };
        assert_abs_diff_eq!(tuning.max_run_speed, 600.0);
        assert_eq!(tuning.starting_weapon, WeaponKind::Knife);
        assert_abs_diff_eq!(tuning.weapons.cooldown(WeaponKind::Gatling), 0.2);
        assert_abs_diff_eq!(tuning.weapons.damage(WeaponKind::Gatling), 40.0);
    }

    #[rstest]
    #[case::zero_speed(r#"{ "max_run_speed": 0 }"#, "max_run_speed")]
    #[case::negative_health(r#"{ "max_health": -5 }"#, "max_health")]
    #[case::negative_damage(r#"{ "weapons": { "gun": { "damage": -1 } } }"#, "weapons.gun.damage")]
    fn invalid_values_are_rejected(#[case] json: &str, #[case] expected_field: &str) {
        let result = SimConfig::from_json(json).and_then(|c| c.validate());
        assert!(
            matches!(&result, Err(ConfigError::InvalidValue { field, .. }) if field == expected_field),
            "unexpected result {result:?}"
        );
    }

    #[rstest]
    fn unknown_weapon_is_named_in_the_error() {
        let result = SimConfig::from_json(r#"{ "weapons": { "laser": {} } }"#).and_then(|c| c.tuning());
        assert!(matches!(result, Err(ConfigError::UnknownWeapon(name)) if name == "laser"));
    }

    #[rstest]
    fn unknown_keys_fail_to_parse() {
        let result = SimConfig::from_json(r#"{ "gravity": 9.8 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[rstest]
    fn missing_file_reports_its_path() {
        let path = Path::new("definitely/not/here.json");
        let result = SimConfig::load(path);
        assert!(matches!(result, Err(ConfigError::Io { path: p, .. }) if p == path));
    }
}
