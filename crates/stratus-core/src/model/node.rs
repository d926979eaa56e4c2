//! Canonical diagram node and edge vocabulary.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::NodeId;

/// The semantic kind of a diagram edge.
///
/// The names match external wire strings (snake_case). Anything the wire
/// sends that is not a recognized kind is read as a dependency, the same
/// reading an absent kind gets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Parent-to-child containment (a subnet inside a VPC).
    Containment,
    /// Deployment-order dependency; the edge source depends on the target.
    #[default]
    Dependency,
    /// Visual cross-reference with no deployment semantics.
    Reference,
}

impl EdgeKind {
    /// Reads an edge kind from its wire string, tolerantly.
    ///
    /// Unrecognized kinds collapse to [`EdgeKind::Dependency`].
    pub fn from_wire(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "containment" => Self::Containment,
            "dependency" => Self::Dependency,
            "reference" => Self::Reference,
            _ => Self::Dependency,
        }
    }
}

impl From<EdgeKind> for &'static str {
    fn from(val: EdgeKind) -> Self {
        match val {
            EdgeKind::Containment => "containment",
            EdgeKind::Dependency => "dependency",
            EdgeKind::Reference => "reference",
        }
    }
}

impl Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A fully resolved diagram node.
///
/// This is the canonical form a wire node takes after variable resolution
/// and normalization: identifiers are literal, defaults are filled in, and
/// the node is ready for validation and mapping.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    ui_kind: String,
    resource_type: String,
    label: String,
    config: Map<String, Value>,
    x: f64,
    y: f64,
    parent_id: Option<NodeId>,
    status: Option<String>,
    visual_only: bool,
}

impl Node {
    /// Create a new node with the required identity fields.
    ///
    /// Position defaults to the origin; everything else defaults to empty.
    pub fn new(
        id: NodeId,
        ui_kind: impl Into<String>,
        resource_type: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            ui_kind: ui_kind.into(),
            resource_type: resource_type.into(),
            label: label.into(),
            config: Map::new(),
            x: 0.0,
            y: 0.0,
            parent_id: None,
            status: None,
            visual_only: false,
        }
    }

    /// Set the canvas position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the containing parent node.
    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the resource configuration map.
    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }

    /// Set the UI status string.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Mark the node as visual-only (annotation, sticky note, frame).
    pub fn with_visual_only(mut self, visual_only: bool) -> Self {
        self.visual_only = visual_only;
        self
    }

    /// Get the node identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Get the UI widget kind (how the canvas draws this node).
    pub fn ui_kind(&self) -> &str {
        &self.ui_kind
    }

    /// Get the declared resource type (what the node means to a provider).
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Get the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Borrow the resource configuration map.
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Get the canvas x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the canvas y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the containing parent node id, if any.
    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    /// Get the UI status string, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns `true` if this node is a visual annotation rather than a
    /// deployable resource.
    pub fn is_visual_only(&self) -> bool {
        self.visual_only
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
