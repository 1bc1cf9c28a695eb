// Logging setup
//
// env_logger formatting and RUST_LOG filtering. With `log_to_stdout` set,
// lesson output and validation messages go to stdout while error records
// stay on stderr.

use env_logger::{Builder, Logger, Target};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::Config;

/// Two env_logger instances, one per stream, picked by record level.
pub struct SplitLogger {
    stdout: Logger,
    stderr: Logger,
}

impl SplitLogger {
    pub fn new(stdout: Logger, stderr: Logger) -> Self {
        Self { stdout, stderr }
    }

    pub fn filter(&self) -> LevelFilter {
        self.stdout.filter().max(self.stderr.filter())
    }

    fn logger_for(&self, level: Level) -> &Logger {
        if goes_to_stderr(level) {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

/// Setup failures and other errors are diagnostics, not lesson output.
pub fn goes_to_stderr(level: Level) -> bool {
    level == Level::Error
}

impl Log for SplitLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger_for(metadata.level()).enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.logger_for(record.level()).log(record);
    }

    fn flush(&self) {
        self.stdout.flush();
        self.stderr.flush();
    }
}

fn builder(level: LevelFilter, target: Target) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    builder.target(target);
    builder
}

/// Initialize logging; RUST_LOG overrides the configured level
pub fn init(config: &Config) {
    let level = config.log_level().unwrap_or(LevelFilter::Info);

    if config.debug.log_to_stdout {
        let logger = SplitLogger::new(
            builder(level, Target::Stdout).build(),
            builder(level, Target::Stderr).build(),
        );
        let max_level = logger.filter();
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(max_level);
        }
    } else {
        builder(level, Target::Stderr).init();
    }

    if config.log_level().is_err() {
        log::warn!(
            "Unknown log level '{}', defaulting to info",
            config.debug.log_level
        );
    }
}
