//! Centralized status/message logger
//!
//! The engine emits human-readable status lines here instead of printing
//! directly; the presentation layer decides whether they go to stdout,
//! into an in-memory buffer (tests, GUIs), or both.

use serde::{Deserialize, Serialize};

/// Verbosity level for game output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only round and match outcomes
    Minimal = 1,
    /// Normal - turns, battles, and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - all actions, menus, and per-exchange detail
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Verbosity level of this entry
    pub level: VerbosityLevel,
    /// The status message
    pub message: String,
}

/// Status message sink with verbosity filtering and optional capture
#[derive(Debug, Default)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    log_buffer: Vec<LogEntry>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        GameLogger::default()
    }

    /// Create a logger with the given verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..GameLogger::default()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Set output mode (Stdout, Memory, or Both)
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Log a message at the given level
    ///
    /// Messages above the configured verbosity are dropped for stdout but
    /// still captured when the output mode includes Memory, so a silent
    /// test can inspect everything that happened.
    pub fn log(&mut self, level: VerbosityLevel, message: impl Into<String>) {
        let message = message.into();

        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level <= self.verbosity
        {
            println!("{message}");
        }

        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.log_buffer.push(LogEntry { level, message });
        }
    }

    /// Log at Minimal level (round and match outcomes)
    pub fn minimal(&mut self, message: impl Into<String>) {
        self.log(VerbosityLevel::Minimal, message);
    }

    /// Log at Normal level (most game events)
    pub fn normal(&mut self, message: impl Into<String>) {
        self.log(VerbosityLevel::Normal, message);
    }

    /// Log at Verbose level (per-action and per-exchange detail)
    pub fn verbose(&mut self, message: impl Into<String>) {
        self.log(VerbosityLevel::Verbose, message);
    }

    /// Captured log entries (empty unless output mode includes Memory)
    pub fn logs(&self) -> &[LogEntry] {
        &self.log_buffer
    }

    /// Clear captured entries
    pub fn clear_logs(&mut self) {
        self.log_buffer.clear();
    }
}
