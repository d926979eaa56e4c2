//! The report type aggregating diagnostics from a checking stage.
//!
//! A [`Report`] carries every finding of a stage, split by severity, so a
//! caller can render all of them in one pass and decide for itself whether
//! to proceed.

use std::fmt;

use crate::diag::{Diagnostic, Severity};

/// The accumulated findings of a checking stage.
///
/// A report is a value, not an `Err`: stages like structural validation
/// and rule evaluation are total and always produce one. The diagram (or
/// resource) is acceptable iff [`Report::is_valid`] holds.
#[derive(Debug, Clone, Default)]
pub struct Report {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, filing it under its severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Absorb every finding of another report.
    pub fn merge(&mut self, other: Report) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Get the blocking findings.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Get the advisory findings.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns `true` if the report carries no errors (warnings allowed).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if the report carries no findings at all.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Iterate over all findings, errors first.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} errors, {} warnings",
            self.errors.len(),
            self.warnings.len()
        )?;
        if let Some(first) = self.errors.first().or_else(|| self.warnings.first()) {
            write!(f, "; first: {}", first)?;
        }
        Ok(())
    }
}

impl FromIterator<Diagnostic> for Report {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        let mut report = Report::new();
        for diagnostic in iter {
            report.push(diagnostic);
        }
        report
    }
}
