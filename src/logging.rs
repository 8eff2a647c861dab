//! Run log handle.
//!
//! Stages never touch a global logger. The driver builds a [`RunLog`] (an
//! `env_logger::Logger` writing to the append-mode log file) and passes it to
//! each stage by reference; tests pass a capturing sink instead.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter, Log, Record};

const TARGET: &str = "population_cleaner";

/// Python-logging style level names.
fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

pub struct RunLog {
    sink: Box<dyn Log>,
}

impl RunLog {
    pub fn new(sink: impl Log + 'static) -> Self {
        RunLog {
            sink: Box::new(sink),
        }
    }

    /// Append `<timestamp> - <LEVEL> - <message>` lines to `path`, INFO and above.
    pub fn to_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let logger = Builder::new()
            .filter_level(LevelFilter::Info)
            .write_style(WriteStyle::Never)
            .target(Target::Pipe(Box::new(file)))
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} - {} - {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                    level_name(record.level()),
                    record.args()
                )
            })
            .build();
        Ok(Self::new(logger))
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    pub fn flush(&self) {
        self.sink.flush();
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        self.sink.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(TARGET)
                .build(),
        );
    }
}
