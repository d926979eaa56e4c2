//! Resource type catalogs.
//!
//! This module provides:
//! - The [`TypeCatalog`] trait, the seam through which the validator learns
//!   which resource types a provider understands
//! - [`BuiltinCatalog`], the default implementation with the builtin
//!   per-provider type sets and support for user extensions
//!
//! Catalog entries are lowercase; callers lowercase before lookup. An
//! unknown type is advisory (the validator warns, nothing halts), so the
//! builtin sets aim for the common palette rather than exhaustiveness.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::provider::CloudProvider;

/// Builtin resource types understood by the AWS generator.
const AWS_TYPES: &[&str] = &[
    "region",
    "vpc",
    "subnet",
    "ec2",
    "rds",
    "lambda",
    "s3",
    "dynamodb",
    "security_group",
    "internet_gateway",
    "nat_gateway",
    "load_balancer",
    "api_gateway",
    "sqs",
    "sns",
    "ecs",
    "eks",
    "elasticache",
    "cloudfront",
    "route53",
];

/// Builtin resource types understood by the Azure generator.
const AZURE_TYPES: &[&str] = &[
    "region",
    "vnet",
    "subnet",
    "virtual_machine",
    "sql_database",
    "function_app",
    "storage_account",
    "cosmos_db",
    "network_security_group",
    "application_gateway",
    "load_balancer",
    "aks",
    "service_bus",
    "key_vault",
];

/// Builtin resource types understood by the GCP generator.
const GCP_TYPES: &[&str] = &[
    "region",
    "network",
    "subnet",
    "compute_instance",
    "cloud_sql",
    "cloud_function",
    "cloud_storage",
    "firestore",
    "firewall",
    "load_balancer",
    "gke",
    "pubsub",
    "cloud_run",
    "bigquery",
];

/// Source of the resource types a provider considers valid.
///
/// The validator consults a catalog to decide whether a node's declared
/// resource type warrants an unknown-type warning.
pub trait TypeCatalog: Send + Sync {
    /// Returns the set of valid (lowercase) resource types for a provider.
    fn valid_types(&self, provider: CloudProvider) -> HashSet<String>;
}

/// The builtin catalog, optionally extended with user-defined types.
///
/// # Example
///
/// ```
/// use stratus_core::{BuiltinCatalog, CloudProvider, TypeCatalog};
///
/// let catalog = BuiltinCatalog::new()
///     .extend(CloudProvider::Aws, ["step_functions".to_string()]);
///
/// let types = catalog.valid_types(CloudProvider::Aws);
/// assert!(types.contains("vpc"));
/// assert!(types.contains("step_functions"));
/// ```
#[derive(Debug, Default)]
pub struct BuiltinCatalog {
    extensions: HashMap<CloudProvider, HashSet<String>>,
}

impl BuiltinCatalog {
    /// Create a catalog with the builtin type sets and no extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add user-defined types for a provider.
    ///
    /// Entries are lowercased on the way in. Returns `self` for method
    /// chaining.
    pub fn extend(
        mut self,
        provider: CloudProvider,
        types: impl IntoIterator<Item = String>,
    ) -> Self {
        let entry = self.extensions.entry(provider).or_default();
        for t in types {
            entry.insert(t.to_ascii_lowercase());
        }
        debug!(provider:% = provider, total = entry.len(); "Extended builtin catalog");
        self
    }

    /// The builtin (unextended) type slice for a provider.
    fn builtins(provider: CloudProvider) -> &'static [&'static str] {
        match provider {
            CloudProvider::Aws => AWS_TYPES,
            CloudProvider::Azure => AZURE_TYPES,
            CloudProvider::Gcp => GCP_TYPES,
        }
    }
}

impl TypeCatalog for BuiltinCatalog {
    fn valid_types(&self, provider: CloudProvider) -> HashSet<String> {
        let mut types: HashSet<String> = Self::builtins(provider)
            .iter()
            .map(|t| (*t).to_string())
            .collect();
        if let Some(extra) = self.extensions.get(&provider) {
            types.extend(extra.iter().cloned());
        }
        types
    }
}
