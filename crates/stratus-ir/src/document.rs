//! Wire-format IR document types.
//!
//! This module defines the data structures the canvas sends over the wire.
//! They are deliberately tolerant: field names are camelCase, every
//! optional field defaults, and unknown fields are ignored. Semantic
//! tightening (canonical node types, edge kinds as enums) happens later,
//! during normalization — these types preserve what the canvas said.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete IR document: the canvas graph plus its variable table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IrDocument {
    pub nodes: Vec<IrNode>,
    pub edges: Vec<IrEdge>,
    pub variables: Vec<IrVariable>,
    /// Opaque submission timestamp; carried through, never interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
}

/// A canvas node as sent over the wire.
///
/// The `id` may itself be a symbolic `var.<name>` reference prior to
/// variable resolution.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IrNode {
    pub id: String,
    /// The canvas widget kind (how the node is drawn).
    pub kind: String,
    pub position: IrPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub data: IrNodeData,
}

/// Canvas position of a node. Defaults to the origin when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IrPosition {
    pub x: f64,
    pub y: f64,
}

/// The semantic payload of a canvas node.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IrNodeData {
    pub label: String,
    /// What the node means to a provider (`vpc`, `subnet`, ...).
    pub resource_type: String,
    /// Free-form resource configuration; values may hold `var.<name>`
    /// references anywhere a string appears.
    pub config: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub is_visual_only: bool,
}

/// A canvas edge as sent over the wire.
///
/// Older canvas versions send the edge kind as `type`, newer ones as
/// `kind`; both decode into [`IrEdge::kind`]. An absent kind means
/// dependency.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IrEdge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A variable declaration: a name, a declared kind, and a default value.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrVariable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: VariableKind,
    #[serde(default)]
    pub default: Value,
}

/// The declared kind of a variable.
///
/// The declared kind wins over the JSON shape of the default when the two
/// disagree and the default can be cleanly coerced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    String,
    #[serde(alias = "boolean")]
    Bool,
    Number,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_decodes_camel_case() {
        let document: IrDocument = serde_json::from_str(
            r#"{
                "nodes": [
                    {
                        "id": "subnet-1",
                        "kind": "resourceNode",
                        "position": {"x": 10.5, "y": -3.0},
                        "parentId": "vpc-1",
                        "data": {
                            "label": "Private A",
                            "resourceType": "subnet",
                            "config": {"cidr": "10.0.1.0/24"},
                            "isVisualOnly": false
                        }
                    }
                ],
                "edges": [],
                "variables": [],
                "timestamp": 1724000000
            }"#,
        )
        .unwrap();

        let node = &document.nodes[0];
        assert_eq!(node.id, "subnet-1");
        assert_eq!(node.parent_id.as_deref(), Some("vpc-1"));
        assert_eq!(node.position, IrPosition { x: 10.5, y: -3.0 });
        assert_eq!(node.data.resource_type, "subnet");
        assert_eq!(node.data.config["cidr"], "10.0.1.0/24");
        assert!(document.timestamp.is_some());
    }

    #[test]
    fn test_node_optionals_default() {
        let node: IrNode = serde_json::from_str(r#"{"id": "n1"}"#).unwrap();

        assert_eq!(node.id, "n1");
        assert_eq!(node.kind, "");
        assert_eq!(node.position, IrPosition::default());
        assert!(node.parent_id.is_none());
        assert_eq!(node.data.label, "");
        assert!(!node.data.is_visual_only);
        assert!(node.data.config.is_empty());
    }

    #[test]
    fn test_edge_kind_accepts_type_alias() {
        let old: IrEdge =
            serde_json::from_str(r#"{"source": "a", "target": "b", "type": "containment"}"#)
                .unwrap();
        let new: IrEdge =
            serde_json::from_str(r#"{"source": "a", "target": "b", "kind": "containment"}"#)
                .unwrap();
        let bare: IrEdge = serde_json::from_str(r#"{"source": "a", "target": "b"}"#).unwrap();

        assert_eq!(old.kind.as_deref(), Some("containment"));
        assert_eq!(new.kind.as_deref(), Some("containment"));
        assert!(bare.kind.is_none());
    }

    #[test]
    fn test_variable_kind_wire_names() {
        let v: IrVariable =
            serde_json::from_str(r#"{"name": "enable_dns", "type": "bool", "default": true}"#)
                .unwrap();
        assert_eq!(v.kind, VariableKind::Bool);

        // Some canvas versions spell it out.
        let v: IrVariable =
            serde_json::from_str(r#"{"name": "enable_dns", "type": "boolean", "default": true}"#)
                .unwrap();
        assert_eq!(v.kind, VariableKind::Bool);

        let v: IrVariable = serde_json::from_str(r#"{"name": "region_name"}"#).unwrap();
        assert_eq!(v.kind, VariableKind::String);
        assert_eq!(v.default, Value::Null);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let document: IrDocument = serde_json::from_str(
            r#"{"nodes": [], "edges": [], "viewport": {"zoom": 1.5}, "selection": ["n1"]}"#,
        )
        .unwrap();
        assert!(document.nodes.is_empty());
    }
}
