//! The core diagnostic type for the Stratus error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, the id of the diagram node it concerns, and help text.

use std::fmt;

use crate::{
    diag::{Severity, error_code::ErrorCode},
    id::NodeId,
};

/// A diagnostic message about a diagram.
///
/// Diagnostics provide detailed information about errors and warnings,
/// including:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - The subject node the finding is about, when there is one
/// - Optional help text with suggestions
///
/// The subject takes the place a source span would have in a text
/// compiler: the input here is a canvas, so findings point at nodes, not
/// at byte offsets.
///
/// # Example
///
/// ```text
/// error[E200]: containment cycle involving `vpc-1 -> subnet-1 -> vpc-1`
///   node: vpc-1
///   = help: remove one of the containment edges
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    subject: Option<NodeId>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use stratus_core::diag::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("node `subnet-1` references missing parent `vpc-9`")
    ///     .with_code(ErrorCode::E201)
    ///     .with_subject("subnet-1")
    ///     .with_help("add a node with id `vpc-9` or clear the parent reference");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use stratus_core::diag::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::warning("unknown resource type `mainframe`")
    ///     .with_code(ErrorCode::E202)
    ///     .with_subject("node-7");
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the subject node id, if any.
    pub fn subject(&self) -> Option<&NodeId> {
        self.subject.as_ref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the subject node this finding is about.
    pub fn with_subject(mut self, subject: impl Into<NodeId>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            subject: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
