//! Dependency scheduling: a deterministic creation order for resources.
//!
//! The scheduler merges the containment relation (a parent is realized
//! before its children) and the dependency relation (a prerequisite is
//! realized before its dependents) into one directed graph and runs Kahn's
//! algorithm over it. Ties among simultaneously-ready resources break by
//! ascending lexicographic id, so the same architecture always schedules
//! to the same order.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BinaryHeap, HashMap},
};

use log::debug;
use stratus_core::{Architecture, NodeId, diag::ErrorCode};
use thiserror::Error;

/// Errors that can occur while scheduling an architecture.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The merged relation graph contains a cycle.
    ///
    /// Validated architectures are acyclic by construction, so hitting this
    /// on pipeline output means an earlier stage let an inconsistency
    /// through.
    #[error("dependency cycle among resources: {}", joined(.remaining))]
    Cycle { remaining: Vec<NodeId> },
}

impl ScheduleError {
    /// Returns the diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::Cycle { .. } => ErrorCode::E500,
        }
    }
}

fn joined(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compute the creation order for an architecture's resources.
///
/// On success the order contains every resource id exactly once, with every
/// containment parent before its children and every prerequisite before its
/// dependents. On a cycle, the error names the residual ids in sorted order.
pub fn schedule(architecture: &Architecture) -> Result<Vec<NodeId>, ScheduleError> {
    let resources = architecture.resources();

    let mut successors: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
    let mut in_degree: BTreeMap<&NodeId, usize> = resources.keys().map(|id| (id, 0)).collect();

    // Containment: parent before child.
    for (parent, children) in architecture.containments() {
        for child in children {
            push_edge(&mut successors, &mut in_degree, parent, child);
        }
    }
    // Dependencies are stored dependent → prerequisites; the schedule edge
    // runs the other way.
    for (dependent, prerequisites) in architecture.dependencies() {
        for prerequisite in prerequisites {
            push_edge(&mut successors, &mut in_degree, prerequisite, dependent);
        }
    }

    let mut ready: BinaryHeap<Reverse<&NodeId>> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| Reverse(*id))
        .collect();

    let mut order: Vec<NodeId> = Vec::with_capacity(resources.len());
    while let Some(Reverse(id)) = ready.pop() {
        order.push(id.clone());
        let Some(next) = successors.get(id) else {
            continue;
        };
        for &successor in next {
            let degree = in_degree
                .get_mut(successor)
                .expect("edge endpoints are resource ids");
            *degree -= 1;
            if *degree == 0 {
                ready.push(Reverse(successor));
            }
        }
    }

    if order.len() != resources.len() {
        let remaining: Vec<NodeId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(id, _)| (*id).clone())
            .collect();
        return Err(ScheduleError::Cycle { remaining });
    }

    debug!(resources = order.len(); "Scheduled resource order");
    Ok(order)
}

/// Record one schedule edge, counting the target's in-degree.
///
/// Relation entries naming an id with no resource are skipped; the mapper
/// never produces them, but `schedule` stays total over hand-built input.
fn push_edge<'a>(
    successors: &mut HashMap<&'a NodeId, Vec<&'a NodeId>>,
    in_degree: &mut BTreeMap<&'a NodeId, usize>,
    from: &'a NodeId,
    to: &'a NodeId,
) {
    if !in_degree.contains_key(from) || !in_degree.contains_key(to) {
        return;
    }
    successors.entry(from).or_default().push(to);
    *in_degree.get_mut(to).expect("endpoint checked above") += 1;
}
