//! Logger setup for the walker executables
//!
//! Log records go to stdout and to the session's log file. Playback emits one
//! record per applied frame, so the frame scheduler target can be given its
//! own (usually quieter) level.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logging levels for one execution.
#[derive(Debug, Clone)]
pub struct LogLevels {
    /// Level applied to every target not listed in `overrides`.
    pub min_level: LevelFilter,

    /// Per-target levels, e.g. `("walk_lib::frame_sched", LevelFilter::Info)`.
    pub overrides: Vec<(String, LevelFilter)>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LogLevels {
    /// Levels with no per-target overrides.
    pub fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level,
            overrides: Vec::new(),
        }
    }

    /// Add a per-target override.
    pub fn with_target(mut self, target: &str, level: LevelFilter) -> Self {
        self.overrides.push((target.to_string(), level));
        self
    }

    /// Check the levels can be used for an execution log.
    ///
    /// The base level must let through at least `INFO` records, otherwise the
    /// session header would be lost.
    pub fn validate(&self) -> Result<(), LoggerInitError> {
        if self.min_level < log::Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(self.min_level));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(levels: &LogLevels, session: &session::Session) -> Result<(), LoggerInitError> {
    levels.validate()?;

    let log_file =
        fern::log_file(&session.log_file_path).map_err(LoggerInitError::LogFileInitError)?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            // Debug and trace include the target, info and above don't
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    message
                ))
            }
        })
        .level(levels.min_level);

    for (target, level) in &levels.overrides {
        dispatch = dispatch.level_for(target.clone(), *level);
    }

    dispatch
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", levels.min_level);
    for (target, level) in &levels.overrides {
        info!("    Log level for {}: {:?}", target, level);
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info => "INF".normal(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold(),
    }
}
