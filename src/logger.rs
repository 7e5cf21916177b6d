use flexi_logger::{
    style, Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger,
    LoggerHandle, Naming, WriteMode,
};
use log::{debug, Level, Record};
use std::path::Path;

use crate::error::Result;

/// Start logging to a daily-rotated file under `dir`, echoing to stderr.
/// Keep the returned handle alive until exit, so buffered lines get flushed.
pub fn configure(level: &str, verbose: bool, dir: &Path) -> Result<LoggerHandle> {
    let days = 1;
    let dup = if verbose {
        Duplicate::All
    } else {
        Duplicate::Warn
    };
    let handle = Logger::try_with_str(level)?
        .log_to_file(FileSpec::default().directory(dir))
        .duplicate_to_stderr(dup)
        .write_mode(WriteMode::BufferAndFlush)
        .format(colour_format)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(days),
        )
        .start()?;
    debug!("Logging to directory: {}", dir.display());
    Ok(handle)
}

fn colour_format(
    out: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    rec: &Record,
) -> std::result::Result<(), std::io::Error> {
    let level = rec.level();
    write!(
        out,
        "[{}] {} {}:{}: {}",
        style(Level::Debug)
            .paint(now.format("%Y-%m-%d %H:%M:%S%.3f %:z").to_string()),
        style(level).paint(level.to_string()),
        rec.file().unwrap_or("<unknown>"),
        rec.line().unwrap_or(0),
        style(level).paint(rec.args().to_string())
    )
}
