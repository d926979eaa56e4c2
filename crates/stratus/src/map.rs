//! Architecture mapping: turning the diagram graph into provider resources.
//!
//! A [`GeneratorRegistry`] holds one [`ResourceGenerator`] per supported
//! provider. Mapping walks every deployable (non-visual-only) node, asks the
//! requested provider's generator for a concrete resource, and collects the
//! containment and dependency relations from the graph's edges. Visual-only
//! nodes never become resources; their ids are kept as annotations so a plan
//! can still be traced back to the full canvas.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use log::debug;
use stratus_core::{
    Architecture, CloudProvider, EdgeKind, Node, NodeId, Resource, ResourceMetadata,
    diag::ErrorCode,
};
use thiserror::Error;

use crate::{CompileRequest, graph::DiagramGraph};

mod aws;
mod azure;
mod gcp;

pub use aws::AwsGenerator;
pub use azure::AzureGenerator;
pub use gcp::GcpGenerator;

/// Errors that can occur while mapping a diagram to an architecture.
#[derive(Debug, Error)]
pub enum MapError {
    /// The registry has no generator for the requested provider.
    ///
    /// This is a deployment configuration problem, not a diagram problem.
    #[error("no resource generator registered for provider `{provider}`")]
    NoGenerator { provider: CloudProvider },
}

impl MapError {
    /// Returns the diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MapError::NoGenerator { .. } => ErrorCode::E300,
        }
    }
}

/// Strategy trait resolving provider-specific resources from diagram nodes.
///
/// Implementations supply their provider and acronym table; the provided
/// methods cover naming and resource construction, so a provider generator
/// only overrides them for genuinely provider-specific behavior.
pub trait ResourceGenerator: Send + Sync {
    /// The provider this generator produces resources for.
    fn provider(&self) -> CloudProvider;

    /// Tokens the provider spells in branded casing (`nat` → `NAT`).
    fn acronyms(&self) -> &'static [(&'static str, &'static str)];

    /// Resolve the concrete resource type name for a declared diagram type.
    ///
    /// The declared type is lowercased and split on `_`; each token takes
    /// its branded casing from [`acronyms`](Self::acronyms) when listed and
    /// is capitalized otherwise, then the tokens are joined.
    fn resource_type_name(&self, resource_type: &str) -> String {
        let lowered = resource_type.to_ascii_lowercase();
        lowered
            .split('_')
            .filter(|token| !token.is_empty())
            .map(|token| {
                self.acronyms()
                    .iter()
                    .find(|(plain, _)| *plain == token)
                    .map(|(_, branded)| (*branded).to_string())
                    .unwrap_or_else(|| capitalize(token))
            })
            .collect()
    }

    /// Produce the resource for one deployable node.
    ///
    /// The resource id equals the node id; the name is the node's label,
    /// falling back to the id when the label is empty.
    fn generate(&self, node: &Node) -> Resource {
        let name = if node.label().is_empty() {
            node.id().to_string()
        } else {
            node.label().to_string()
        };
        let metadata = ResourceMetadata::new(
            node.ui_kind(),
            node.x(),
            node.y(),
            node.status().map(str::to_string),
            node.config().clone(),
        );
        Resource::new(
            node.id().clone(),
            name,
            self.resource_type_name(node.resource_type()),
            metadata,
        )
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Provider-keyed registry of resource generators.
///
/// Built once at startup and read-only afterwards; a provider missing from
/// the registry fails mapping with [`MapError::NoGenerator`].
pub struct GeneratorRegistry {
    generators: HashMap<CloudProvider, Box<dyn ResourceGenerator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Create a registry with the builtin AWS, Azure, and GCP generators.
    pub fn with_defaults() -> Self {
        Self::new()
            .register(Box::new(AwsGenerator))
            .register(Box::new(AzureGenerator))
            .register(Box::new(GcpGenerator))
    }

    /// Register a generator under its provider, replacing any previous one.
    ///
    /// Returns `self` for method chaining.
    pub fn register(mut self, generator: Box<dyn ResourceGenerator>) -> Self {
        debug!(provider:% = generator.provider(); "Registered resource generator");
        self.generators.insert(generator.provider(), generator);
        self
    }

    /// Look up the generator for a provider.
    pub fn get(&self, provider: CloudProvider) -> Option<&dyn ResourceGenerator> {
        self.generators.get(&provider).map(Box::as_ref)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Map the diagram graph to an architecture for the requested provider.
///
/// The architecture's region comes from the region node's label when the
/// diagram has one; otherwise the request's region is used.
pub fn map_architecture(
    graph: &DiagramGraph,
    request: &CompileRequest,
    registry: &GeneratorRegistry,
) -> Result<Architecture, MapError> {
    let generator = registry.get(request.provider()).ok_or(MapError::NoGenerator {
        provider: request.provider(),
    })?;

    let mut resources: IndexMap<NodeId, Resource> = IndexMap::new();
    let mut annotations: Vec<NodeId> = Vec::new();
    for (_, node) in graph.nodes_with_indices() {
        if node.is_visual_only() {
            annotations.push(node.id().clone());
            continue;
        }
        let resource = generator.generate(node);
        resources.insert(resource.id().clone(), resource);
    }

    let mut containments: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    let mut dependencies: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for (source_idx, target_idx, edge) in graph.edges() {
        let source = graph.node_from_idx(source_idx);
        let target = graph.node_from_idx(target_idx);
        // A visual-only node cannot take part in a real resource relation.
        if source.is_visual_only() || target.is_visual_only() {
            continue;
        }
        match edge.kind() {
            EdgeKind::Containment => containments
                .entry(source.id().clone())
                .or_default()
                .push(target.id().clone()),
            EdgeKind::Dependency => dependencies
                .entry(source.id().clone())
                .or_default()
                .push(target.id().clone()),
            // Reference edges are drawing aids with no relation semantics.
            EdgeKind::Reference => {}
        }
    }

    let region = graph
        .region_root()
        .map(|idx| graph.node_from_idx(idx).label())
        .filter(|label| !label.is_empty())
        .unwrap_or(request.region())
        .to_string();

    debug!(
        provider:% = request.provider(),
        region = region.as_str(),
        resources = resources.len(),
        annotations = annotations.len();
        "Mapped architecture"
    );
    Ok(Architecture::new(
        request.provider(),
        region,
        resources,
        containments,
        dependencies,
        annotations,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(payload: &str) -> DiagramGraph {
        let doc = serde_json::from_str(payload).unwrap();
        DiagramGraph::from_document(&doc)
    }

    fn aws_request() -> CompileRequest {
        CompileRequest::new(CloudProvider::Aws, "eu-west-1")
    }

    #[test]
    fn test_missing_generator_is_fatal() {
        let graph = graph(r#"{"nodes": []}"#);
        let registry = GeneratorRegistry::new();

        let err = map_architecture(&graph, &aws_request(), &registry).unwrap_err();

        assert!(matches!(err, MapError::NoGenerator { .. }));
        assert_eq!(err.code(), ErrorCode::E300);
    }

    #[test]
    fn test_visual_only_nodes_become_annotations() {
        let graph = graph(
            r#"{"nodes": [
                {"id": "vpc-1", "data": {"resourceType": "vpc", "label": "Main VPC"}},
                {"id": "note-1", "data": {"resourceType": "note", "isVisualOnly": true}}
            ]}"#,
        );

        let arch =
            map_architecture(&graph, &aws_request(), &GeneratorRegistry::with_defaults()).unwrap();

        assert_eq!(arch.resources().len(), 1);
        assert_eq!(arch.annotations(), &[NodeId::new("note-1")]);
        let vpc = arch.resource(&NodeId::new("vpc-1")).unwrap();
        assert_eq!(vpc.name(), "Main VPC");
        assert_eq!(vpc.resource_type(), "VPC");
    }

    #[test]
    fn test_relations_from_edges() {
        let graph = graph(
            r#"{"nodes": [
                {"id": "vpc-1", "data": {"resourceType": "vpc"}},
                {"id": "subnet-1", "parentId": "vpc-1", "data": {"resourceType": "subnet"}},
                {"id": "lambda-1", "data": {"resourceType": "lambda"}}
            ],
            "edges": [{"source": "lambda-1", "target": "subnet-1", "kind": "dependency"}]}"#,
        );

        let arch =
            map_architecture(&graph, &aws_request(), &GeneratorRegistry::with_defaults()).unwrap();

        assert_eq!(
            arch.containments()[&NodeId::new("vpc-1")],
            vec![NodeId::new("subnet-1")]
        );
        // The drawn source depends on the drawn target.
        assert_eq!(
            arch.dependencies()[&NodeId::new("lambda-1")],
            vec![NodeId::new("subnet-1")]
        );
    }

    #[test]
    fn test_reference_edges_carry_no_relations() {
        let graph = graph(
            r#"{"nodes": [
                {"id": "a", "data": {"resourceType": "ec2"}},
                {"id": "b", "data": {"resourceType": "rds"}}
            ],
            "edges": [{"source": "a", "target": "b", "kind": "reference"}]}"#,
        );

        let arch =
            map_architecture(&graph, &aws_request(), &GeneratorRegistry::with_defaults()).unwrap();

        assert!(arch.containments().is_empty());
        assert!(arch.dependencies().is_empty());
    }

    #[test]
    fn test_edges_touching_visual_nodes_are_skipped() {
        let graph = graph(
            r#"{"nodes": [
                {"id": "group-1", "data": {"resourceType": "group", "isVisualOnly": true}},
                {"id": "ec2-1", "parentId": "group-1", "data": {"resourceType": "ec2"}}
            ]}"#,
        );

        let arch =
            map_architecture(&graph, &aws_request(), &GeneratorRegistry::with_defaults()).unwrap();

        assert!(arch.containments().is_empty());
        assert_eq!(arch.resources().len(), 1);
    }

    #[test]
    fn test_region_comes_from_region_node_label() {
        let graph = graph(
            r#"{"nodes": [
                {"id": "region-1", "data": {"resourceType": "region", "label": "us-west-2"}}
            ]}"#,
        );

        let arch =
            map_architecture(&graph, &aws_request(), &GeneratorRegistry::with_defaults()).unwrap();

        assert_eq!(arch.region(), "us-west-2");
    }

    #[test]
    fn test_region_falls_back_to_request() {
        let graph = graph(
            r#"{"nodes": [
                {"id": "region-1", "data": {"resourceType": "region"}},
                {"id": "vpc-1", "data": {"resourceType": "vpc"}}
            ]}"#,
        );

        let arch =
            map_architecture(&graph, &aws_request(), &GeneratorRegistry::with_defaults()).unwrap();

        // The region node's label is empty, so the requested region wins.
        assert_eq!(arch.region(), "eu-west-1");
    }

    #[test]
    fn test_resource_name_falls_back_to_id() {
        let graph = graph(r#"{"nodes": [{"id": "s3-1", "data": {"resourceType": "s3"}}]}"#);

        let arch =
            map_architecture(&graph, &aws_request(), &GeneratorRegistry::with_defaults()).unwrap();

        assert_eq!(arch.resource(&NodeId::new("s3-1")).unwrap().name(), "s3-1");
    }

    #[test]
    fn test_registry_override_replaces_builtin() {
        struct FlatNames;
        impl ResourceGenerator for FlatNames {
            fn provider(&self) -> CloudProvider {
                CloudProvider::Aws
            }
            fn acronyms(&self) -> &'static [(&'static str, &'static str)] {
                &[]
            }
            fn resource_type_name(&self, resource_type: &str) -> String {
                resource_type.to_string()
            }
        }

        let registry = GeneratorRegistry::with_defaults().register(Box::new(FlatNames));
        let graph = graph(r#"{"nodes": [{"id": "vpc-1", "data": {"resourceType": "vpc"}}]}"#);

        let arch = map_architecture(&graph, &aws_request(), &registry).unwrap();

        assert_eq!(arch.resource(&NodeId::new("vpc-1")).unwrap().resource_type(), "vpc");
    }
}
