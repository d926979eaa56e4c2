//! # Stratus IR
//!
//! Front end of the Stratus architecture compiler. This crate decodes the
//! canvas's wire-format IR payload into a structured document and resolves
//! symbolic `var.<name>` references against the document's variable table.
//!
//! ## Usage
//!
//! ```
//! # use stratus_ir::{ParseError, VariableTable};
//!
//! fn main() -> Result<(), ParseError> {
//!     let payload = br#"{
//!         "nodes": [
//!             {"id": "vpc-1", "kind": "resourceNode",
//!              "data": {"label": "Main VPC", "resourceType": "vpc"}}
//!         ],
//!         "edges": [],
//!         "variables": []
//!     }"#;
//!
//!     let document = stratus_ir::parse(payload)?;
//!     let table = VariableTable::from_variables(&document.variables);
//!     let resolved = stratus_ir::resolve(document, &table);
//!     assert_eq!(resolved.nodes.len(), 1);
//!     Ok(())
//! }
//! ```

mod decode;
mod document;
mod error;
mod variables;

pub use document::{IrDocument, IrEdge, IrNode, IrNodeData, IrPosition, IrVariable, VariableKind};
pub use error::ParseError;
pub use variables::{VariableTable, VariableValue, resolve};

/// Parse a raw IR payload into a structured document.
///
/// This is the main entry point for decoding canvas payloads. Three wire
/// shapes are accepted transparently:
///
/// 1. **Object** - a direct JSON document with `nodes`/`edges`/`variables`
/// 2. **String** - the same document double-encoded as a JSON string
/// 3. **Array** - a bare node array, with the remaining document fields
///    recovered from a secondary decode of the raw payload
///
/// Missing optional fields default rather than error; unknown fields are
/// ignored. Malformed JSON in any shape is a fatal [`ParseError`].
///
/// # Example
///
/// ```
/// # use stratus_ir::ParseError;
///
/// fn main() -> Result<(), ParseError> {
///     let document = stratus_ir::parse(br#"{"nodes": [], "edges": []}"#)?;
///     assert!(document.nodes.is_empty());
///     Ok(())
/// }
/// ```
pub fn parse(payload: &[u8]) -> Result<IrDocument, ParseError> {
    decode::decode_payload(payload)
}
