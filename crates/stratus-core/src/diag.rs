//! Diagnostic system for the Stratus pipeline.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Severity levels
//! - A diagnostic collector for accumulating multiple findings
//! - A report type splitting findings by severity
//!
//! # Overview
//!
//! The system is built around the [`Diagnostic`] type, which represents a
//! single error or warning with an optional error code, the id of the node
//! it concerns, and help text. Stages that check rather than transform
//! (structural validation, rule evaluation) accumulate diagnostics through
//! a [`DiagnosticCollector`] and hand back a [`Report`] so callers see
//! every finding in one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```
//! use stratus_core::diag::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::error("node `subnet-1` references missing parent `vpc-9`")
//!     .with_code(ErrorCode::E201)
//!     .with_subject("subnet-1")
//!     .with_help("add a node with id `vpc-9` or clear the parent reference");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod report;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use report::Report;
pub use severity::Severity;
