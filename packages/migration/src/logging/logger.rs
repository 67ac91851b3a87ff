// Logger Interface
//
// Logger trait definition.

use std::str::FromStr;
use std::sync::Mutex;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Logger trait.
pub trait Logger: Send + Sync {
    fn level(&self) -> LogLevel;
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

/// Null logger (logs nothing).
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }
    fn debug(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Logger that keeps every enabled line in memory.
pub struct MemoryLogger {
    level: LogLevel,
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    fn record(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, msg.to_string()));
        }
    }
}

impl Logger for MemoryLogger {
    fn level(&self) -> LogLevel {
        self.level
    }
    fn debug(&self, msg: &str) {
        self.record(LogLevel::Debug, msg)
    }
    fn info(&self, msg: &str) {
        self.record(LogLevel::Info, msg)
    }
    fn warn(&self, msg: &str) {
        self.record(LogLevel::Warn, msg)
    }
    fn error(&self, msg: &str) {
        self.record(LogLevel::Error, msg)
    }
}
