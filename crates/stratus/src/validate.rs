//! Structural validation of the normalized diagram graph.
//!
//! Validation is total: every check runs over the whole graph and all
//! findings land in a single [`Report`], so one broken relationship never
//! hides another. Checks performed:
//!
//! - **Containment cycles** (E200): containment edges must form a forest;
//!   any cycle is an error naming its members.
//! - **Dangling parents** (E201): a node referencing a parent that is not
//!   in the diagram is an error.
//! - **Conflicting parents** (E204): a node contained by two different
//!   parents is an error.
//! - **Resource types** (E202): a deployable node whose resource type the
//!   provider catalog does not know is a warning.
//! - **Region presence** (E203): a diagram without a region node is a
//!   warning; the mapper falls back to the requested default region.

use std::collections::{HashMap, HashSet};

use log::debug;
use petgraph::graph::NodeIndex;
use stratus_core::{
    CloudProvider, TypeCatalog,
    diag::{Diagnostic, DiagnosticCollector, ErrorCode, Report},
};

use crate::graph::DiagramGraph;

/// Options controlling structural validation.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    provider: CloudProvider,
    valid_resource_types: HashSet<String>,
}

impl ValidateOptions {
    /// Build validation options for a provider from a type catalog.
    pub fn new(provider: CloudProvider, catalog: &dyn TypeCatalog) -> Self {
        Self {
            provider,
            valid_resource_types: catalog.valid_types(provider),
        }
    }

    /// Get the target provider.
    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    /// Returns `true` if the catalog knows this resource type.
    pub fn is_known_type(&self, resource_type: &str) -> bool {
        self.valid_resource_types
            .contains(&resource_type.to_ascii_lowercase())
    }
}

/// Run all structural checks over the graph.
///
/// Never short-circuits: the returned report carries every finding from
/// every check.
pub fn validate(graph: &DiagramGraph, options: &ValidateOptions) -> Report {
    let mut collector = DiagnosticCollector::new();

    check_containment_cycles(graph, &mut collector);
    check_dangling_parents(graph, &mut collector);
    check_conflicting_parents(graph, &mut collector);
    check_resource_types(graph, options, &mut collector);
    check_region_presence(graph, &mut collector);

    let report = collector.finish();
    debug!(
        errors = report.errors().len(),
        warnings = report.warnings().len();
        "Validated diagram graph"
    );
    report
}

/// Detect cycles among containment edges.
///
/// A depth-first sweep tracks the active path; an edge back into the path
/// closes a cycle, reported once with its members in id order.
fn check_containment_cycles(graph: &DiagramGraph, collector: &mut DiagnosticCollector) {
    let mut finder = CycleFinder {
        graph,
        marks: HashMap::new(),
        path: Vec::new(),
        cycles: Vec::new(),
    };
    for idx in graph.node_indices() {
        if !finder.marks.contains_key(&idx) {
            finder.visit(idx);
        }
    }

    for cycle in finder.cycles {
        let mut members: Vec<String> = cycle
            .iter()
            .map(|&idx| format!("`{}`", graph.node_from_idx(idx).id()))
            .collect();
        members.sort();
        let subject = graph.node_from_idx(cycle[0]).id().clone();
        collector.emit(
            Diagnostic::error(format!(
                "containment cycle between nodes {}",
                members.join(", ")
            ))
            .with_code(ErrorCode::E200)
            .with_subject(subject)
            .with_help("remove one of the containment edges"),
        );
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    InProgress,
    Done,
}

struct CycleFinder<'a> {
    graph: &'a DiagramGraph,
    marks: HashMap<NodeIndex, Mark>,
    path: Vec<NodeIndex>,
    cycles: Vec<Vec<NodeIndex>>,
}

impl CycleFinder<'_> {
    fn visit(&mut self, idx: NodeIndex) {
        self.marks.insert(idx, Mark::InProgress);
        self.path.push(idx);

        let children: Vec<NodeIndex> = self.graph.containment_children(idx).collect();
        for child in children {
            match self.marks.get(&child) {
                None => self.visit(child),
                Some(Mark::InProgress) => {
                    let start = self
                        .path
                        .iter()
                        .position(|&n| n == child)
                        .expect("in-progress node should be on the path");
                    self.cycles.push(self.path[start..].to_vec());
                }
                Some(Mark::Done) => {}
            }
        }

        self.path.pop();
        self.marks.insert(idx, Mark::Done);
    }
}

/// Report nodes whose parent reference names a node absent from the diagram.
fn check_dangling_parents(graph: &DiagramGraph, collector: &mut DiagnosticCollector) {
    for (_, node) in graph.nodes_with_indices() {
        if let Some(parent_id) = node.parent_id()
            && !graph.contains_node(parent_id)
        {
            collector.emit(
                Diagnostic::error(format!(
                    "node `{}` references missing parent `{parent_id}`",
                    node.id()
                ))
                .with_code(ErrorCode::E201)
                .with_subject(node.id().clone())
                .with_help(format!(
                    "add a node with id `{parent_id}` or clear the parent reference"
                )),
            );
        }
    }
}

/// Report nodes contained by more than one parent.
fn check_conflicting_parents(graph: &DiagramGraph, collector: &mut DiagnosticCollector) {
    for (idx, node) in graph.nodes_with_indices() {
        let parents: Vec<NodeIndex> = graph.containment_parents(idx).collect();
        if parents.len() > 1 {
            let mut names: Vec<String> = parents
                .iter()
                .map(|&parent| format!("`{}`", graph.node_from_idx(parent).id()))
                .collect();
            names.sort();
            collector.emit(
                Diagnostic::error(format!(
                    "node `{}` is contained by multiple parents: {}",
                    node.id(),
                    names.join(", ")
                ))
                .with_code(ErrorCode::E204)
                .with_subject(node.id().clone())
                .with_help("a node can live inside at most one container"),
            );
        }
    }
}

/// Warn about deployable nodes whose resource type the catalog does not know.
fn check_resource_types(
    graph: &DiagramGraph,
    options: &ValidateOptions,
    collector: &mut DiagnosticCollector,
) {
    for (_, node) in graph.nodes_with_indices() {
        if node.is_visual_only() {
            continue;
        }
        if !options.is_known_type(node.resource_type()) {
            collector.emit(
                Diagnostic::warning(format!(
                    "unknown resource type `{}` for provider {}",
                    node.resource_type(),
                    options.provider()
                ))
                .with_code(ErrorCode::E202)
                .with_subject(node.id().clone())
                .with_help("check the provider's type catalog"),
            );
        }
    }
}

/// Warn when the diagram has no region node.
fn check_region_presence(graph: &DiagramGraph, collector: &mut DiagnosticCollector) {
    if graph.region_root().is_none() {
        collector.emit(
            Diagnostic::warning("no region node in the diagram")
                .with_code(ErrorCode::E203)
                .with_help("the requested default region will be used"),
        );
    }
}
