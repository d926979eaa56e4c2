//! Canonical model types for diagrams and architectures.
//!
//! This module contains the resolved vocabulary shared by every compiler
//! stage: the canonical diagram node and edge kinds produced by
//! normalization, and the architecture types produced by mapping.
//!
//! # Pipeline Position
//!
//! ```text
//! IR JSON payload
//!     ↓ decode (three wire shapes)
//! IR Document - wire-shaped, tolerant
//!     ↓ variable resolution
//! Resolved IR Document
//!     ↓ normalization
//! Diagram Graph over [`Node`] / [`EdgeKind`] (these types)
//!     ↓ validation + mapping
//! [`Architecture`] over [`Resource`] (these types)
//!     ↓ rules + scheduling
//! Deployment order
//! ```
//!
//! # Organization
//!
//! - [`node`] - Canonical diagram node: [`Node`], [`EdgeKind`]
//! - [`architecture`] - Mapped output: [`Architecture`], [`Resource`],
//!   [`ResourceMetadata`]

pub mod architecture;
pub mod node;

pub use architecture::*;
pub use node::*;
