//! Diagnostic sink for recoverable problems.
//!
//! Parsing and lookup errors never abort an operation; they are reported here
//! and the operation carries on with what it could read.

use std::sync::{Mutex, PoisonError};

use colored::Colorize;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// A single reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub text: String,
}

/// Receiver for diagnostics: unparseable catalog entries, missing settings,
/// failed compiles.
pub trait DiagnosticSink: Send + Sync {
    fn info(&self, text: &str);
    fn warn(&self, text: &str);
    fn error(&self, text: &str);
}

/// Prints diagnostics to stderr in cargo style.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink {
    pub verbose: bool,
}

impl StderrSink {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl DiagnosticSink for StderrSink {
    fn info(&self, text: &str) {
        if self.verbose {
            eprintln!("{} {}", "info:".bold().cyan(), text);
        }
    }

    fn warn(&self, text: &str) {
        eprintln!("{} {}", "warning:".bold().yellow(), text);
    }

    fn error(&self, text: &str) {
        eprintln!("{} {}", "error:".bold().red(), text);
    }
}

/// Buffers diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, text: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                level,
                text: text.to_string(),
            });
    }

    /// Snapshot of everything reported so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Texts reported at `level`.
    pub fn texts(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|d| d.level == level)
            .map(|d| d.text)
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn info(&self, text: &str) {
        self.push(Level::Info, text);
    }

    fn warn(&self, text: &str) {
        self.push(Level::Warning, text);
    }

    fn error(&self, text: &str) {
        self.push(Level::Error, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_keeps_order_and_levels() {
        let sink = CollectingSink::new();
        sink.info("scanning");
        sink.warn("catalog missing");
        sink.error("bad entry");

        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, Level::Info);
        assert_eq!(sink.texts(Level::Warning), vec!["catalog missing"]);
        assert_eq!(sink.texts(Level::Error), vec!["bad entry"]);
    }
}
