//! The Azure resource generator.

use stratus_core::CloudProvider;

use super::ResourceGenerator;

/// Tokens Azure spells in branded casing.
const ACRONYMS: &[(&str, &str)] = &[
    ("vnet", "VNet"),
    ("sql", "SQL"),
    ("aks", "AKS"),
    ("db", "DB"),
];

/// Generator producing Azure-flavored resources.
#[derive(Debug, Default)]
pub struct AzureGenerator;

impl ResourceGenerator for AzureGenerator {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Azure
    }

    fn acronyms(&self) -> &'static [(&'static str, &'static str)] {
        ACRONYMS
    }
}
