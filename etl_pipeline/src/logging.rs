//! File logging for pipeline runs.
//!
//! Library code only talks to the `log` facade; binaries call
//! [`init_file_logger`] once to send records to a log file that is truncated
//! at start-up.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{Level, LevelFilter};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Format a log line as `YYYY-MM-DD HH:MM:SS,mmm - LEVEL - message`.
pub fn format_line(timestamp: DateTime<Local>, level: Level, message: &fmt::Arguments<'_>) -> String {
    format!(
        "{} - {} - {}",
        timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
        level,
        message
    )
}

/// Route `log` records at `level` and above to `path`, truncating the file.
///
/// `RUST_LOG` still takes precedence over `level` when set.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(buf, "{}", format_line(Local::now(), record.level(), record.args()))
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let line = format_line(timestamp, Level::Info, &format_args!("loaded {}", "out.csv"));
        assert_eq!(line, "2024-03-05 14:07:09,000 - INFO - loaded out.csv");
    }

    #[test]
    fn test_format_line_error_level() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let line = format_line(timestamp, Level::Error, &format_args!("boom"));
        assert!(line.ends_with(" - ERROR - boom"));
    }
}
