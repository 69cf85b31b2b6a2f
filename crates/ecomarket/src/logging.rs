//! env_logger setup driven by the `[logging]` settings table.

use ecomarket_config::LoggingSettings;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Initialize the global logger. `RUST_LOG` still overrides the level.
///
/// Safe to call more than once; later calls keep the first logger.
pub fn init(settings: &LoggingSettings) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(settings.log_level.as_filter())
        .parse_default_env()
        .format(|buf, record| {
            let timestamp = buf.timestamp_millis();
            write_line(buf, timestamp, record)
        });
    if let Some(path) = settings.log_file.as_deref() {
        builder.target(env_logger::Target::Pipe(Box::new(open_log_file(Path::new(path))?)));
    }
    let _ = builder.try_init();
    Ok(())
}

/// Write one `<timestamp> - <LEVEL> - <message>` line.
pub fn write_line(
    out: &mut impl Write,
    timestamp: impl fmt::Display,
    record: &log::Record<'_>,
) -> io::Result<()> {
    writeln!(out, "{} - {} - {}", timestamp, record.level(), record.args())
}

/// Open the log file for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
