//! Logger setup shared by the driver and the tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger from `RUST_LOG`.
///
/// Without `RUST_LOG` the filter defaults to `debug` when `verbose` is set
/// and `info` otherwise. Per-tick detail is logged at `trace`, so it only
/// shows up when asked for explicitly.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Only fails when a logger is already installed, which repeated test
    // setup does on purpose.
    if builder.try_init().is_err() {
        log::debug!("logger already installed; keeping it");
    }
}
