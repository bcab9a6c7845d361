//! Minimal `log` backend: RFC 3339 timestamp, level, target and message on stderr.

use chrono::{DateTime, Utc};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Install a logger at `level` as the global `log` backend.
    pub fn install(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Level for a `-v` count: 0 = warn, 1 = info, 2 = debug, more = trace.
    pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn format(&self, now: DateTime<Utc>, record: &Record) -> String {
        format!(
            "[{}] {} {} - {}",
            now.to_rfc3339(),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.format(Utc::now(), record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use log::{Level, Log};

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(StderrLogger::level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(StderrLogger::level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(StderrLogger::level_for_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn filters_below_level() {
        let logger = StderrLogger::new(LevelFilter::Info);
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }

    #[test]
    fn line_has_timestamp_level_and_target() {
        let logger = StderrLogger::new(LevelFilter::Info);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let line = logger.format(
            now,
            &Record::builder()
                .level(Level::Warn)
                .target("linkplot::bridge")
                .args(format_args!("skipped"))
                .build(),
        );
        assert_eq!(line, "[2024-05-01T12:00:00+00:00] WARN linkplot::bridge - skipped");
    }
}
