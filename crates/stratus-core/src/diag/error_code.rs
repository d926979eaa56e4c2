//! Error codes for the Stratus diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Parse errors
//! - `E2xx` - Structural validation errors
//! - `E3xx` - Mapping errors
//! - `E4xx` - Rule violations
//! - `E5xx` - Scheduling errors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ErrorCode {
    // =========================================================================
    // Parse Errors (E0xx)
    // =========================================================================
    /// Malformed JSON payload.
    ///
    /// The payload could not be decoded as JSON at all.
    E001,

    /// Malformed nested payload.
    ///
    /// The payload was a JSON string (a double-encoded document), but the
    /// string's content is not valid JSON.
    E002,

    /// Unsupported payload shape.
    ///
    /// The payload decoded as JSON, but its root is neither a document
    /// object, a double-encoded document string, nor a node array.
    E003,

    /// Invalid document structure.
    ///
    /// The payload has a supported shape but a field inside it has the
    /// wrong type (for example `nodes` holding a number).
    E004,

    // =========================================================================
    // Structural Validation Errors (E2xx)
    // =========================================================================
    /// Containment cycle.
    ///
    /// A chain of containment edges leads back to its starting node, so no
    /// creation order exists for its members.
    E200,

    /// Dangling parent reference.
    ///
    /// A node's parent refers to an id that is not present in the diagram.
    E201,

    /// Unknown resource type.
    ///
    /// A node declares a resource type that the target provider's catalog
    /// does not list.
    E202,

    /// Missing region.
    ///
    /// The diagram has no region node to anchor the architecture to.
    E203,

    /// Conflicting containment parents.
    ///
    /// A node is claimed as a child by more than one parent, so containment
    /// does not form a forest.
    E204,

    // =========================================================================
    // Mapping Errors (E3xx)
    // =========================================================================
    /// No generator registered for the requested provider.
    E300,

    // =========================================================================
    // Rule Violations (E4xx)
    // =========================================================================
    /// Missing required parent.
    ///
    /// The resource must be contained in a parent but has none.
    E400,

    /// Parent type not allowed.
    ///
    /// The resource has a containment parent, but the parent's type is not
    /// one the rule permits.
    E401,

    /// Missing required configuration field.
    E402,

    /// Configuration value not allowed.
    ///
    /// A configuration field is present but its value is outside the rule's
    /// allowed set.
    E403,

    // =========================================================================
    // Scheduling Errors (E5xx)
    // =========================================================================
    /// Dependency cycle.
    ///
    /// The combined containment and dependency relation admits no
    /// topological order. Validated architectures are acyclic by
    /// construction, so this code marks an internal invariant failure.
    E500,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Parse errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            // Structural validation errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            // Mapping errors
            ErrorCode::E300 => "E300",
            // Rule violations
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
            ErrorCode::E402 => "E402",
            ErrorCode::E403 => "E403",
            // Scheduling errors
            ErrorCode::E500 => "E500",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Parse errors
            ErrorCode::E001 => "malformed JSON payload",
            ErrorCode::E002 => "malformed nested payload",
            ErrorCode::E003 => "unsupported payload shape",
            ErrorCode::E004 => "invalid document structure",
            // Structural validation errors
            ErrorCode::E200 => "containment cycle",
            ErrorCode::E201 => "dangling parent reference",
            ErrorCode::E202 => "unknown resource type",
            ErrorCode::E203 => "missing region",
            ErrorCode::E204 => "conflicting containment parents",
            // Mapping errors
            ErrorCode::E300 => "no generator for provider",
            // Rule violations
            ErrorCode::E400 => "missing required parent",
            ErrorCode::E401 => "parent type not allowed",
            ErrorCode::E402 => "missing required configuration field",
            ErrorCode::E403 => "configuration value not allowed",
            // Scheduling errors
            ErrorCode::E500 => "dependency cycle",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::E400.to_string(), "E400");
        assert_eq!(ErrorCode::E500.to_string(), "E500");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E003.as_str(), "E003");
        assert_eq!(ErrorCode::E204.as_str(), "E204");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "malformed JSON payload");
        assert_eq!(ErrorCode::E200.description(), "containment cycle");
        assert_eq!(ErrorCode::E300.description(), "no generator for provider");
    }
}
