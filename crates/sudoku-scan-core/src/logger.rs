//! Minimal stderr logger behind the `log` facade.
//!
//! Good enough for a CLI run; applications embedding the pipeline are free
//! to install their own `log` backend instead.

use std::io::Write;
use std::sync::OnceLock;

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        let mut stderr = std::io::stderr();
        let _ = writeln!(stderr, "{:5} [{}] {}", tag, record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger at the given level. Calling this again after a
/// successful install is a no-op.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger { level });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install the stderr logger with the level taken from `SUDOKU_SCAN_LOG`
/// (`error`/`warn`/`info`/`debug`/`trace`, default `info`).
pub fn init_from_env() -> Result<(), log::SetLoggerError> {
    let level = std::env::var("SUDOKU_SCAN_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    init_with_level(level)
}
