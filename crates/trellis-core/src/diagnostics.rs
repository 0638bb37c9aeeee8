//! Severity-tagged diagnostics collected during a compile pass.
//!
//! The channel is append-only while a pass runs and flushed once at
//! the end through the `log` facade. Nothing in a pass fails hard;
//! every rejected or degraded rule lands here instead.

use serde::{Deserialize, Serialize};

/// Severity of one diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Plain console output.
    Log,
    Error,
    Info,
    Warn,
}

impl Severity {
    fn level(self) -> log::Level {
        match self {
            Severity::Log => log::Level::Debug,
            Severity::Error => log::Level::Error,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
        }
    }
}

/// One collected message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Accumulate-then-flush message channel threaded through a compile
/// pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message with an explicit severity.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity,
            message: message.into(),
        });
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.push(Severity::Log, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warn, message);
    }

    /// Messages collected so far.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of messages with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }

    /// Emit every collected message through the `log` facade, clear
    /// the channel, and return the drained entries so callers can
    /// still inspect the sink.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        for entry in &self.entries {
            log::log!(target: "trellis", entry.severity.level(), "{}", entry.message);
        }
        std::mem::take(&mut self.entries)
    }
}
