//! Error types for IR payload decoding.

use stratus_core::diag::ErrorCode;
use thiserror::Error;

/// A fatal failure to decode an IR payload.
///
/// Parsing either yields a complete document or one of these; there are no
/// partial results. Each variant carries the [`ErrorCode`] callers use to
/// key user-facing diagnostics.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not valid JSON at all.
    #[error("malformed JSON payload: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The payload is a JSON string whose content is not valid JSON.
    #[error("malformed nested payload: {0}")]
    NestedSyntax(#[source] serde_json::Error),

    /// The payload's root is not a supported document shape.
    #[error("unsupported payload shape: expected object, string, or array, found {found}")]
    UnsupportedShape {
        /// JSON kind of the offending root value.
        found: &'static str,
    },

    /// The payload has a supported shape but a field inside it has the
    /// wrong type.
    #[error("invalid document structure: {0}")]
    Document(#[source] serde_json::Error),
}

impl ParseError {
    /// The diagnostic code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Syntax(_) => ErrorCode::E001,
            ParseError::NestedSyntax(_) => ErrorCode::E002,
            ParseError::UnsupportedShape { .. } => ErrorCode::E003,
            ParseError::Document(_) => ErrorCode::E004,
        }
    }
}
