//! Error types surfaced at startup.
//!
//! Steady-state simulation never fails; only configuration and asset
//! loading can, and both happen before the first tick.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading or validating a [`crate::config::SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read config {}: {source}", path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the config schema.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A numeric override is out of range.
    #[error("{field} must be {expected}, got {value}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: String,
        /// Value as written in the config.
        value: f32,
        /// Human readable constraint.
        expected: &'static str,
    },
    /// A weapon name that matches no [`crate::WeaponKind`].
    #[error("unknown weapon `{0}`")]
    UnknownWeapon(String),
}

/// A sound or animation resource that could not be prepared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Nothing exists at the path.
    #[error("asset not found: {path}")]
    Missing {
        /// Path as requested.
        path: String,
    },
    /// The resource exists but the backend rejected it.
    #[error("asset {path} could not be loaded: {reason}")]
    Unloadable {
        /// Path as requested.
        path: String,
        /// Backend explanation.
        reason: String,
    },
}

impl AssetError {
    /// Path of the asset that failed.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Missing { path } | Self::Unloadable { path, .. } => path,
        }
    }
}
