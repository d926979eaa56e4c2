//! Stratus Core Types and Definitions
//!
//! This crate provides the foundational types for the Stratus architecture
//! compiler. It includes:
//!
//! - **Identifiers**: Canvas node identifiers ([`id::NodeId`])
//! - **Providers**: The supported cloud providers ([`provider::CloudProvider`])
//! - **Model**: The canonical node and architecture types ([`model`] module)
//! - **Catalog**: Resource type catalogs per provider ([`catalog`] module)
//! - **Diagnostics**: Coded, accumulating diagnostics ([`diag`] module)

pub mod catalog;
pub mod diag;
pub mod id;
pub mod model;
pub mod provider;

pub use catalog::{BuiltinCatalog, TypeCatalog};
pub use id::NodeId;
pub use model::{Architecture, EdgeKind, Node, Resource, ResourceMetadata};
pub use provider::CloudProvider;
