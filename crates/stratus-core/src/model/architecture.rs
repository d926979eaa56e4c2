//! Mapped architecture types.
//!
//! An [`Architecture`] is the provider-specific output of the mapping
//! stage: concrete resources keyed by their originating node ids, plus the
//! containment and dependency relations between them. These types
//! serialize with serde so downstream consumers (plan output, persistence
//! layers) can take them as-is.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{id::NodeId, provider::CloudProvider};

/// Canvas-facing metadata carried along with a mapped resource.
///
/// Nothing in here affects deployment semantics; it exists so a plan can be
/// round-tripped back onto the canvas that produced it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    ui_kind: String,
    x: f64,
    y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    config: Map<String, Value>,
}

impl ResourceMetadata {
    /// Create metadata from the originating node's canvas attributes.
    pub fn new(
        ui_kind: impl Into<String>,
        x: f64,
        y: f64,
        status: Option<String>,
        config: Map<String, Value>,
    ) -> Self {
        Self {
            ui_kind: ui_kind.into(),
            x,
            y,
            status,
            config,
        }
    }

    /// Get the UI widget kind of the originating node.
    pub fn ui_kind(&self) -> &str {
        &self.ui_kind
    }

    /// Get the canvas x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the canvas y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the UI status string, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Borrow the resource configuration map.
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }
}

/// A concrete cloud resource mapped from a diagram node.
///
/// The resource keeps its node's id unchanged, so relations expressed over
/// node ids remain valid over resources.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    id: NodeId,
    name: String,
    resource_type: String,
    metadata: ResourceMetadata,
}

impl Resource {
    /// Create a new resource.
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        resource_type: impl Into<String>,
        metadata: ResourceMetadata,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            resource_type: resource_type.into(),
            metadata,
        }
    }

    /// Get the resource identifier (equal to the originating node id).
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the provider-specific concrete resource type name.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Borrow the canvas metadata.
    pub fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A complete mapped architecture for one provider and region.
///
/// Resources preserve diagram insertion order ([`IndexMap`]); the relation
/// maps are ordered ([`BTreeMap`]) so serialized plans are byte-stable for
/// the same input. Every id appearing in a relation refers to an entry in
/// `resources`; visual-only nodes never become resources and are listed in
/// `annotations` instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Architecture {
    provider: CloudProvider,
    region: String,
    resources: IndexMap<NodeId, Resource>,
    containments: BTreeMap<NodeId, Vec<NodeId>>,
    dependencies: BTreeMap<NodeId, Vec<NodeId>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<NodeId>,
}

impl Architecture {
    /// Create a new architecture from its complete parts.
    pub fn new(
        provider: CloudProvider,
        region: impl Into<String>,
        resources: IndexMap<NodeId, Resource>,
        containments: BTreeMap<NodeId, Vec<NodeId>>,
        dependencies: BTreeMap<NodeId, Vec<NodeId>>,
        annotations: Vec<NodeId>,
    ) -> Self {
        Self {
            provider,
            region: region.into(),
            resources,
            containments,
            dependencies,
            annotations,
        }
    }

    /// Get the target provider.
    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    /// Get the target region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Borrow the mapped resources, keyed by node id in diagram order.
    pub fn resources(&self) -> &IndexMap<NodeId, Resource> {
        &self.resources
    }

    /// Look up a resource by id.
    pub fn resource(&self, id: &NodeId) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Borrow the containment relation (parent id → child ids).
    pub fn containments(&self) -> &BTreeMap<NodeId, Vec<NodeId>> {
        &self.containments
    }

    /// Borrow the dependency relation (dependent id → prerequisite ids).
    pub fn dependencies(&self) -> &BTreeMap<NodeId, Vec<NodeId>> {
        &self.dependencies
    }

    /// Get the ids of visual-only nodes excluded from mapping.
    pub fn annotations(&self) -> &[NodeId] {
        &self.annotations
    }
}
