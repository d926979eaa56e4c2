//! The GCP resource generator.

use stratus_core::CloudProvider;

use super::ResourceGenerator;

/// Tokens GCP spells in branded casing.
const ACRONYMS: &[(&str, &str)] = &[
    ("gke", "GKE"),
    ("sql", "SQL"),
    ("pubsub", "PubSub"),
    ("bigquery", "BigQuery"),
];

/// Generator producing GCP-flavored resources.
#[derive(Debug, Default)]
pub struct GcpGenerator;

impl ResourceGenerator for GcpGenerator {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Gcp
    }

    fn acronyms(&self) -> &'static [(&'static str, &'static str)] {
        ACRONYMS
    }
}
