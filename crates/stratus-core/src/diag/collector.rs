//! Collector for accumulating diagnostics during a checking stage.
//!
//! The [`DiagnosticCollector`] allows stages to report multiple errors
//! and warnings instead of failing on the first finding encountered.

use crate::diag::{Diagnostic, Report};

/// A collector for accumulating diagnostics during a checking stage.
///
/// # Example
///
/// ```
/// use stratus_core::diag::{Diagnostic, DiagnosticCollector, ErrorCode};
///
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::error("node `subnet-1` references missing parent `vpc-9`")
///         .with_code(ErrorCode::E201)
///         .with_subject("subnet-1"),
/// );
/// collector.emit(
///     Diagnostic::warning("unknown resource type `mainframe`")
///         .with_code(ErrorCode::E202)
///         .with_subject("node-7"),
/// );
///
/// let report = collector.finish();
/// assert!(!report.is_valid());
/// assert_eq!(report.warnings().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    report: Report,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.report.push(diagnostic);
    }

    /// Returns `true` if any emitted diagnostic was an error.
    pub fn has_errors(&self) -> bool {
        !self.report.is_valid()
    }

    /// Finish collection and return the accumulated report.
    ///
    /// Warnings are kept alongside errors; the caller decides how to
    /// surface each severity.
    pub fn finish(self) -> Report {
        self.report
    }
}
