//! Payload decoding across the three accepted wire shapes.
//!
//! The canvas has shipped three encodings of the same document over time:
//! a plain JSON object, that object double-encoded as a JSON string, and a
//! bare node array. Decoding is an explicit match over the root value, one
//! arm per shape, so a payload either takes exactly one path or fails with
//! a shape error — there is no fallthrough between arms.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    document::{IrDocument, IrEdge, IrNode, IrVariable},
    error::ParseError,
};

/// Document fields recovered by the secondary decode when the payload
/// root is a bare node array.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct IrSidecar {
    edges: Vec<IrEdge>,
    variables: Vec<IrVariable>,
    timestamp: Option<Value>,
}

pub(crate) fn decode_payload(payload: &[u8]) -> Result<IrDocument, ParseError> {
    let root: Value = serde_json::from_slice(payload).map_err(ParseError::Syntax)?;

    match root {
        Value::Object(_) => {
            let document = decode_document(root)?;
            debug!(shape = "object", nodes = document.nodes.len(); "Decoded IR payload");
            Ok(document)
        }
        Value::String(inner) => {
            // Double-encoded: the document object arrives as a JSON string.
            let inner_root: Value =
                serde_json::from_str(&inner).map_err(ParseError::NestedSyntax)?;
            if !inner_root.is_object() {
                return Err(ParseError::UnsupportedShape {
                    found: json_kind(&inner_root),
                });
            }
            let document = decode_document(inner_root)?;
            debug!(shape = "string", nodes = document.nodes.len(); "Decoded IR payload");
            Ok(document)
        }
        Value::Array(_) => {
            let nodes: Vec<IrNode> =
                serde_json::from_value(root).map_err(ParseError::Document)?;
            // A bare array carries only nodes. The remaining document
            // fields are recovered from a secondary decode of the raw
            // payload, which for a true bare array yields the defaults.
            let sidecar: IrSidecar = serde_json::from_slice(payload).unwrap_or_default();
            debug!(
                shape = "array",
                nodes = nodes.len(),
                edges = sidecar.edges.len();
                "Decoded IR payload"
            );
            Ok(IrDocument {
                nodes,
                edges: sidecar.edges,
                variables: sidecar.variables,
                timestamp: sidecar.timestamp,
            })
        }
        other => Err(ParseError::UnsupportedShape {
            found: json_kind(&other),
        }),
    }
}

fn decode_document(root: Value) -> Result<IrDocument, ParseError> {
    serde_json::from_value(root).map_err(ParseError::Document)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJECT_PAYLOAD: &str = r#"{
        "nodes": [
            {"id": "vpc-1", "kind": "resourceNode",
             "data": {"label": "Main VPC", "resourceType": "vpc"}},
            {"id": "subnet-1", "kind": "resourceNode", "parentId": "vpc-1",
             "data": {"label": "Private A", "resourceType": "subnet"}}
        ],
        "edges": [
            {"source": "vpc-1", "target": "subnet-1", "kind": "containment"}
        ],
        "variables": [
            {"name": "enable_dns", "type": "bool", "default": true}
        ]
    }"#;

    #[test]
    fn test_object_shape() {
        let document = decode_payload(OBJECT_PAYLOAD.as_bytes()).unwrap();

        assert_eq!(document.nodes.len(), 2);
        assert_eq!(document.edges.len(), 1);
        assert_eq!(document.variables.len(), 1);
        assert_eq!(document.nodes[1].parent_id.as_deref(), Some("vpc-1"));
    }

    #[test]
    fn test_double_encoded_string_shape() {
        // The whole document object, encoded once more as a JSON string.
        let payload = serde_json::to_vec(&Value::String(OBJECT_PAYLOAD.to_string())).unwrap();

        let document = decode_payload(&payload).unwrap();
        assert_eq!(document.nodes.len(), 2);
        assert_eq!(document.edges.len(), 1);
    }

    #[test]
    fn test_bare_array_shape() {
        let payload = br#"[
            {"id": "vpc-1", "data": {"resourceType": "vpc"}},
            {"id": "subnet-1", "parentId": "vpc-1", "data": {"resourceType": "subnet"}}
        ]"#;

        let document = decode_payload(payload).unwrap();
        assert_eq!(document.nodes.len(), 2);
        assert!(document.edges.is_empty());
        assert!(document.variables.is_empty());
        assert!(document.timestamp.is_none());
    }

    #[test]
    fn test_malformed_json_is_syntax_error() {
        let err = decode_payload(b"{not json").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    #[test]
    fn test_malformed_nested_json_is_nested_syntax_error() {
        // A valid JSON string whose content is not valid JSON.
        let payload = serde_json::to_vec(&Value::String("{broken".to_string())).unwrap();

        let err = decode_payload(&payload).unwrap_err();
        assert!(matches!(err, ParseError::NestedSyntax(_)));
    }

    #[test]
    fn test_unsupported_root_shapes() {
        for (payload, found) in [
            (&b"42"[..], "number"),
            (&b"null"[..], "null"),
            (&b"true"[..], "boolean"),
        ] {
            let err = decode_payload(payload).unwrap_err();
            match err {
                ParseError::UnsupportedShape { found: f } => assert_eq!(f, found),
                other => panic!("expected shape error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_nested_non_object_is_unsupported() {
        // A string-encoded array is not the double-encoded document shape.
        let payload = serde_json::to_vec(&Value::String("[1, 2]".to_string())).unwrap();

        let err = decode_payload(&payload).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnsupportedShape { found: "array" }
        ));
    }

    #[test]
    fn test_wrongly_typed_field_is_document_error() {
        let err = decode_payload(br#"{"nodes": 5}"#).unwrap_err();
        assert!(matches!(err, ParseError::Document(_)));
    }

    #[test]
    fn test_array_of_non_nodes_is_document_error() {
        let err = decode_payload(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ParseError::Document(_)));
    }
}
