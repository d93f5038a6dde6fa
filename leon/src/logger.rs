//! Logging setup for the `leon` binary and its tests.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Crates whose level `--debug` raises.
const WORKSPACE_TARGETS: [&str; 2] = ["leon", "leon_core"];

/// Installs `env_logger` on stderr.
///
/// * `None` keeps `RUST_LOG` (default `warn`).
/// * `Some(LevelFilter::Off)` silences everything.
/// * Any other level applies to the workspace crates only.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    match level_override {
        Some(LevelFilter::Off) => {
            builder.filter_level(LevelFilter::Off);
        }
        Some(level) => {
            for target in WORKSPACE_TARGETS {
                builder.filter_module(target, level);
            }
        }
        None => {}
    }
    builder.target(Target::Stderr);
    let _ = builder.try_init();
}
