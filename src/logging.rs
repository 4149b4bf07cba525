#![cfg(feature = "std")]
//! Minimal stderr logger for the binaries. Stdout carries the board and the
//! simulator's JSON, so log lines never go there.

use std::env;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "SOLO_BATTLESHIP_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Level filter for an optional `SOLO_BATTLESHIP_LOG` value. Missing or
/// unrecognised values fall back to `warn`.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install the stderr logger at the level named by `SOLO_BATTLESHIP_LOG`
/// and return that level. A second call keeps the first logger.
pub fn init_logging() -> LevelFilter {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
    log::max_level()
}
