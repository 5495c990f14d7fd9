//! Browser console backend for the `log` facade.
//!
//! `cropframe-core` logs through `log` macros only. `console_log` routes those
//! records to `console.error`/`warn`/`info`/`debug` so they show up with the
//! right severity in devtools.

use log::{Level, LevelFilter};

/// Install the console logger at `level`.
///
/// A second call leaves the installed logger in place and only moves the
/// maximum level.
pub(crate) fn init(level: Level) {
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
        log::debug!("console logger already installed");
    }
}

/// Change the maximum level without reinstalling the logger.
pub(crate) fn set_level(filter: LevelFilter) {
    log::set_max_level(filter);
}

/// Parse a level name as accepted by `set_log_level`.
///
/// Accepts `off`, `error`, `warn`, `info`, `debug`, `trace` in any case.
pub(crate) fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}
