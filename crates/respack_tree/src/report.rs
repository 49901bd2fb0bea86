//! Diagnostics sink used while importing archives
//!
//! Problems found while building a tree never abort the caller with a panic. Fatal ones end the
//! build early and non-fatal ones are skipped, and in both cases a message is handed to the
//! [`Reporter`] passed into the build entry point. What happens to those messages is up to the
//! caller: log them with [`TracingReporter`], keep them with [`Collector`], or pass a closure.
//!
//! ```
//! use respack_tree::report::{Collector, Reporter, Severity};
//!
//! let mut collector = Collector::default();
//! collector.report(Severity::Warning, "something odd");
//! assert_eq!(collector.count(Severity::Warning), 1);
//! ```

use std::fmt::{self, Display};

use crate::error::Error;

/// How serious a reported message is
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Progress or informational output
    Information,
    /// Something unexpected that did not affect the result
    Warning,
    /// Something that made the result incomplete
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Information => write!(f, "information"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Receives messages produced while building a tree
pub trait Reporter {
    /// Handle a single message
    fn report(&mut self, severity: Severity, message: &str);

    /// Report an [`Error`] using its display text
    fn report_error(&mut self, error: &Error) {
        self.report(Severity::Error, &error.to_string());
    }
}

impl<F: FnMut(Severity, &str)> Reporter for F {
    fn report(&mut self, severity: Severity, message: &str) {
        self(severity, message)
    }
}

/// Forwards every message to a [`tracing`] event of the matching level
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Information => tracing::info!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

/// A single stored message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Severity it was reported with
    pub severity: Severity,
    /// Human readable text
    pub message: String,
}

/// Keeps every message in memory, in the order reported
#[derive(Debug, Default, Clone)]
pub struct Collector {
    reports: Vec<Report>,
}

impl Collector {
    /// All stored messages
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Number of messages with exactly this severity
    pub fn count(&self, severity: Severity) -> usize {
        self.reports
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    /// Whether any [`Severity::Error`] was reported
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Take the stored messages out, leaving the collector empty
    pub fn drain(&mut self) -> Vec<Report> {
        std::mem::take(&mut self.reports)
    }
}

impl Reporter for Collector {
    fn report(&mut self, severity: Severity, message: &str) {
        self.reports.push(Report {
            severity,
            message: message.to_owned(),
        });
    }
}
