//! Error types for diagram compilation.
//!
//! This module provides the main error type [`CompileError`] which wraps
//! the failure modes of the compilation pipeline.

use std::collections::BTreeMap;

use thiserror::Error;

use stratus_core::{NodeId, diag::Report};
use stratus_ir::ParseError;

use crate::{map::MapError, schedule::ScheduleError};

/// The main error type for diagram compilation.
///
/// Fatal stage failures wrap their stage's typed error. Blocking findings
/// from the accumulating stages carry their complete reports, so a caller
/// can render every finding in one pass instead of failing one at a time.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The payload could not be decoded into an IR document.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Structural validation found blocking errors.
    #[error("Validation error: {0}")]
    Validation(Report),

    /// The diagram could not be mapped to an architecture.
    #[error("Mapping error: {0}")]
    Map(#[from] MapError),

    /// At least one resource violates its type's constraints.
    ///
    /// Carries the full evaluation result, including the resources that
    /// passed.
    #[error("Rule error: {} resources violate their constraints", flagged(.evaluations))]
    Rules {
        evaluations: BTreeMap<NodeId, Report>,
    },

    /// The architecture admits no creation order.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

fn flagged(evaluations: &BTreeMap<NodeId, Report>) -> usize {
    evaluations
        .values()
        .filter(|report| !report.is_valid())
        .count()
}
