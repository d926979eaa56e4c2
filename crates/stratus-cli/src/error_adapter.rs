//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the compiler's standard error
//! types and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! Validation and rule errors carry reports with many findings; each
//! finding is rendered independently.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use stratus::{CompileError, diag::Diagnostic};

use crate::CliError;

/// Adapter for a single compiler diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for error variants without per-finding reports.
///
/// This adapter handles errors that carry a single failure: I/O errors,
/// configuration errors, parse errors, mapping errors, and scheduling
/// errors.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display> = match &self.0 {
            CliError::Compile(err) => match err {
                CompileError::Parse(err) => Box::new(err.code()),
                CompileError::Map(err) => Box::new(err.code()),
                CompileError::Schedule(err) => Box::new(err.code()),
                CompileError::Validation(_) | CompileError::Rules { .. } => return None,
            },
            CliError::Io(_) => Box::new("stratus::io"),
            CliError::Config(_) => Box::new("stratus::config"),
        };
        Some(code)
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single finding or a finding-less error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One finding out of a validation or rule report.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without per-finding structure.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// Validation errors return one [`Reportable`] per finding, warnings
/// included, so the full picture renders at once. Rule errors return one
/// per violation across every flagged resource. Other variants return a
/// single [`Reportable`].
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Compile(CompileError::Validation(report)) => report
            .iter()
            .map(|diag| Reportable::Diagnostic(DiagnosticAdapter::new(diag)))
            .collect(),
        CliError::Compile(CompileError::Rules { evaluations }) => evaluations
            .values()
            .flat_map(|report| report.iter())
            .map(|diag| Reportable::Diagnostic(DiagnosticAdapter::new(diag)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use stratus::{
        CloudProvider, CompileRequest, Compiler, NodeId,
        config::CompilerConfig,
        diag::{ErrorCode, Report},
    };

    use super::*;

    #[test]
    fn test_validation_findings_render_individually() {
        let mut report = Report::new();
        report.push(
            Diagnostic::error("node `subnet-1` references missing parent `vpc-9`")
                .with_code(ErrorCode::E201),
        );
        report.push(Diagnostic::warning("no region node in the diagram").with_code(ErrorCode::E203));
        let err = CliError::Compile(CompileError::Validation(report));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(
            reportables[0].to_string(),
            "node `subnet-1` references missing parent `vpc-9`"
        );
        assert_eq!(reportables[0].code().unwrap().to_string(), "E201");
    }

    #[test]
    fn test_rule_violations_flatten_across_resources() {
        let mut evaluations = BTreeMap::new();
        let mut first = Report::new();
        first.push(
            Diagnostic::error("resource `ec2-1` requires a containment parent")
                .with_code(ErrorCode::E400),
        );
        evaluations.insert(NodeId::new("ec2-1"), first);
        let mut second = Report::new();
        second.push(
            Diagnostic::error("resource `rds-1` is missing required config field `engine`")
                .with_code(ErrorCode::E402),
        );
        evaluations.insert(NodeId::new("rds-1"), second);
        let err = CliError::Compile(CompileError::Rules { evaluations });

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
    }

    #[test]
    fn test_io_error_is_a_single_reportable() {
        let err = CliError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "I/O error: gone");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
        assert_eq!(reportables[0].code().unwrap().to_string(), "stratus::io");
    }

    #[test]
    fn test_parse_error_carries_its_code() {
        let compiler = Compiler::new(&CompilerConfig::default());
        let request = CompileRequest::new(CloudProvider::Aws, "us-east-1");
        let err: CliError = compiler.compile(b"{not json", &request).unwrap_err().into();

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].code().unwrap().to_string(), "E001");
    }

    #[test]
    fn test_help_text_passes_through() {
        let mut report = Report::new();
        report.push(
            Diagnostic::error("node `subnet-1` references missing parent `vpc-9`")
                .with_code(ErrorCode::E201)
                .with_help("add a node with id `vpc-9` or clear the parent reference"),
        );
        let err = CliError::Compile(CompileError::Validation(report));

        let reportables = to_reportables(&err);

        assert_eq!(
            reportables[0].help().unwrap().to_string(),
            "add a node with id `vpc-9` or clear the parent reference"
        );
    }
}
