//! Graph normalization: lowering the IR document into the canonical graph.
//!
//! Normalization is total — it never fails, and it never raises findings.
//! A malformed relationship is either dropped here (an explicit edge whose
//! endpoint does not exist) or carried through for the validator to report
//! (a dangling parent reference stays on the node). Three passes:
//!
//! 1. **Nodes** — one graph node per IR node, visual-only nodes retained;
//!    the first node whose resource type is `region` (case-insensitive)
//!    becomes the region root hint.
//! 2. **Explicit edges** — wire edges whose endpoints both exist; duplicate
//!    containment triples collapse to one.
//! 3. **Implicit containment** — a parent → child edge derived from each
//!    node's parent reference, skipping absent parents, de-duplicated
//!    against edges already present.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use stratus_core::{EdgeKind, Node, NodeId};
use stratus_ir::{IrDocument, IrNode};

/// A normalized diagram edge.
#[derive(Debug, Clone)]
pub struct Edge {
    id: Option<String>,
    kind: EdgeKind,
}

impl Edge {
    fn new(id: Option<String>, kind: EdgeKind) -> Self {
        Self { id, kind }
    }

    /// Get the wire edge id, if the canvas assigned one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Get the semantic kind of this edge.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// The canonical diagram graph produced by normalization.
///
/// Wraps a directed graph of canonical nodes and edges together with an
/// identity map from node id to graph index. Containment edges run parent
/// to child. The region root hint points at the first region-typed node,
/// when the diagram has one.
#[derive(Debug, Default)]
pub struct DiagramGraph {
    graph: DiGraph<Node, Edge>,
    node_id_map: HashMap<NodeId, NodeIndex>,
    region_root: Option<NodeIndex>,
}

impl DiagramGraph {
    /// Lower a resolved IR document into the canonical graph.
    pub fn from_document(document: &IrDocument) -> Self {
        let mut graph = Self::default();

        // First pass: nodes. A duplicate id keeps its first node so the
        // identity map stays one-to-one.
        for ir_node in &document.nodes {
            let id = NodeId::new(&ir_node.id);
            if graph.node_id_map.contains_key(&id) {
                debug!(node = ir_node.id; "Skipping node with duplicate id");
                continue;
            }
            let is_region = ir_node.data.resource_type.eq_ignore_ascii_case("region");
            let idx = graph.graph.add_node(canonical_node(ir_node, id.clone()));
            graph.node_id_map.insert(id, idx);
            if is_region && graph.region_root.is_none() {
                graph.region_root = Some(idx);
            }
        }

        // Second pass: explicit edges. An edge naming an absent endpoint
        // is dropped; the validator surfaces dangling parent references,
        // not dangling edges.
        for ir_edge in &document.edges {
            let (Some(&source), Some(&target)) = (
                graph.node_id_map.get(ir_edge.source.as_str()),
                graph.node_id_map.get(ir_edge.target.as_str()),
            ) else {
                debug!(
                    source = ir_edge.source,
                    target = ir_edge.target;
                    "Dropping edge with missing endpoint"
                );
                continue;
            };
            let kind = ir_edge
                .kind
                .as_deref()
                .map(EdgeKind::from_wire)
                .unwrap_or_default();
            if kind == EdgeKind::Containment && graph.has_containment_edge(source, target) {
                continue;
            }
            graph
                .graph
                .add_edge(source, target, Edge::new(ir_edge.id.clone(), kind));
        }

        // Third pass: implicit containment edges from parent references.
        for ir_node in &document.nodes {
            let Some(parent_id) = &ir_node.parent_id else {
                continue;
            };
            let Some(&parent) = graph.node_id_map.get(parent_id.as_str()) else {
                trace!(
                    node = ir_node.id,
                    parent = parent_id.as_str();
                    "Skipping containment edge for absent parent"
                );
                continue;
            };
            let Some(&child) = graph.node_id_map.get(ir_node.id.as_str()) else {
                continue;
            };
            if graph.has_containment_edge(parent, child) {
                continue;
            }
            graph
                .graph
                .add_edge(parent, child, Edge::new(None, EdgeKind::Containment));
        }

        trace!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Normalized diagram graph"
        );
        graph
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The identity map from node id to graph index.
    pub fn node_id_map(&self) -> &HashMap<NodeId, NodeIndex> {
        &self.node_id_map
    }

    /// Look up a node's graph index by id.
    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_id_map.get(id).copied()
    }

    /// Returns `true` if a node with this id exists.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node_id_map.contains_key(id)
    }

    /// The region root hint, when the diagram has a region node.
    pub fn region_root(&self) -> Option<NodeIndex> {
        self.region_root
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub fn nodes_with_indices(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.graph.node_indices().map(|idx| {
            (
                idx,
                self.graph.node_weight(idx).expect("Node idx should exist"),
            )
        })
    }

    pub fn node_from_idx(&self, node_index: NodeIndex) -> &Node {
        self.graph
            .node_weight(node_index)
            .expect("Node index should exist")
    }

    /// Returns an iterator over all edges as (source, target, edge) triples.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Edge)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    /// Returns an iterator over the containment children of a node.
    pub fn containment_children(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter(|edge| edge.weight().kind() == EdgeKind::Containment)
            .map(|edge| edge.target())
    }

    /// Returns an iterator over the containment parents of a node.
    ///
    /// A well-formed diagram yields at most one; the validator reports
    /// nodes where it finds more.
    pub fn containment_parents(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter(|edge| edge.weight().kind() == EdgeKind::Containment)
            .map(|edge| edge.source())
    }

    fn has_containment_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.graph
            .edges_connecting(source, target)
            .any(|edge| edge.weight().kind() == EdgeKind::Containment)
    }
}

/// Build the canonical node for one resolved IR node.
fn canonical_node(ir_node: &IrNode, id: NodeId) -> Node {
    let mut node = Node::new(
        id,
        &ir_node.kind,
        &ir_node.data.resource_type,
        &ir_node.data.label,
    )
    .with_position(ir_node.position.x, ir_node.position.y)
    .with_config(ir_node.data.config.clone())
    .with_visual_only(ir_node.data.is_visual_only);

    // The parent reference is carried even when the parent is absent from
    // the graph; the validator reports it from here.
    if let Some(parent_id) = &ir_node.parent_id {
        node = node.with_parent(NodeId::new(parent_id));
    }
    if let Some(status) = &ir_node.data.status {
        node = node.with_status(status);
    }
    node
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use stratus_ir::{IrEdge, IrNodeData};

    use super::*;

    // ===================
    // Strategies
    // ===================

    // Small pools so duplicate ids, self-parents, and references to
    // undeclared nodes all come up often.
    const ID_POOL: &[&str] = &["n-0", "n-1", "n-2", "n-3", "n-4", "ghost-1", "ghost-2"];
    const KIND_POOL: &[&str] = &["containment", "dependency", "reference", "smoothstep"];

    fn id_strategy() -> impl Strategy<Value = String> {
        proptest::sample::select(ID_POOL).prop_map(str::to_string)
    }

    fn node_strategy() -> impl Strategy<Value = IrNode> {
        (
            id_strategy(),
            proptest::option::of(id_strategy()),
            any::<u8>(),
            any::<bool>(),
        )
            .prop_map(|(id, parent_id, tag, is_visual_only)| IrNode {
                id,
                parent_id,
                data: IrNodeData {
                    label: format!("label-{tag}"),
                    resource_type: "ec2".to_string(),
                    is_visual_only,
                    ..IrNodeData::default()
                },
                ..IrNode::default()
            })
    }

    fn edge_strategy() -> impl Strategy<Value = IrEdge> {
        (
            id_strategy(),
            id_strategy(),
            proptest::option::of(proptest::sample::select(KIND_POOL)),
        )
            .prop_map(|(source, target, kind)| IrEdge {
                source,
                target,
                kind: kind.map(str::to_string),
                ..IrEdge::default()
            })
    }

    fn document_strategy() -> impl Strategy<Value = IrDocument> {
        (
            proptest::collection::vec(node_strategy(), 0..8),
            proptest::collection::vec(edge_strategy(), 0..10),
        )
            .prop_map(|(nodes, edges)| IrDocument {
                nodes,
                edges,
                ..IrDocument::default()
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// No ordered node pair carries more than one containment edge.
    fn check_containment_edges_unique(document: IrDocument) -> Result<(), TestCaseError> {
        let graph = DiagramGraph::from_document(&document);

        let mut seen = HashSet::new();
        for (source, target, edge) in graph.edges() {
            if edge.kind() == EdgeKind::Containment {
                prop_assert!(seen.insert((source, target)));
            }
        }
        Ok(())
    }

    /// One graph node per distinct id, keeping the first occurrence.
    fn check_first_node_wins(document: IrDocument) -> Result<(), TestCaseError> {
        let graph = DiagramGraph::from_document(&document);

        let mut firsts: HashMap<&str, &IrNode> = HashMap::new();
        for node in &document.nodes {
            firsts.entry(node.id.as_str()).or_insert(node);
        }

        prop_assert_eq!(graph.node_count(), firsts.len());
        for (id, ir_node) in &firsts {
            let idx = graph.node_index(&NodeId::new(*id)).unwrap();
            prop_assert_eq!(graph.node_from_idx(idx).label(), ir_node.data.label.as_str());
        }
        Ok(())
    }

    /// Every parent reference naming a declared node materializes as a
    /// containment edge; dangling references stay edge-less.
    fn check_declared_parents_become_edges(document: IrDocument) -> Result<(), TestCaseError> {
        let graph = DiagramGraph::from_document(&document);

        for (idx, node) in graph.nodes_with_indices() {
            let Some(parent_id) = node.parent_id() else {
                continue;
            };
            let Some(parent_idx) = graph.node_index(parent_id) else {
                continue;
            };
            prop_assert!(graph.containment_parents(idx).any(|p| p == parent_idx));
        }
        Ok(())
    }

    /// Normalizing the same document twice yields the same graph, node for
    /// node and edge for edge.
    fn check_normalization_is_deterministic(document: IrDocument) -> Result<(), TestCaseError> {
        let first = DiagramGraph::from_document(&document);
        let second = DiagramGraph::from_document(&document);

        prop_assert_eq!(first.node_count(), second.node_count());
        for ((idx_a, node_a), (idx_b, node_b)) in
            first.nodes_with_indices().zip(second.nodes_with_indices())
        {
            prop_assert_eq!(idx_a, idx_b);
            prop_assert_eq!(node_a.id(), node_b.id());
        }

        let edges = |graph: &DiagramGraph| -> Vec<(NodeIndex, NodeIndex, EdgeKind)> {
            graph
                .edges()
                .map(|(source, target, edge)| (source, target, edge.kind()))
                .collect()
        };
        prop_assert_eq!(edges(&first), edges(&second));
        prop_assert_eq!(first.region_root(), second.region_root());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn containment_edges_unique(document in document_strategy()) {
            check_containment_edges_unique(document)?;
        }

        #[test]
        fn first_node_wins(document in document_strategy()) {
            check_first_node_wins(document)?;
        }

        #[test]
        fn declared_parents_become_edges(document in document_strategy()) {
            check_declared_parents_become_edges(document)?;
        }

        #[test]
        fn normalization_is_deterministic(document in document_strategy()) {
            check_normalization_is_deterministic(document)?;
        }
    }
}
