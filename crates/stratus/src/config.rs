//! Configuration types for the Stratus compiler.
//!
//! [`CompilerConfig`] feeds [`Compiler::new`](crate::Compiler::new): rule
//! overrides merged over the builtin per-provider rule sets, and extra
//! resource types added to the builtin catalog. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources (the
//! CLI loads them from a TOML file).
//!
//! # Example
//!
//! ```
//! # use stratus::config::CompilerConfig;
//! // Use default configuration
//! let config = CompilerConfig::default();
//! assert!(config.rules().is_empty());
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use stratus_core::CloudProvider;

use crate::rules::RuleSet;

/// Top-level compiler configuration.
///
/// Groups the rule overrides and catalog extensions into a single
/// configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilerConfig {
    /// Rule overrides, merged over the builtin rules of every provider.
    #[serde(default)]
    rules: RuleSet,

    /// Extra valid resource types, keyed by provider.
    #[serde(default)]
    catalog: HashMap<CloudProvider, Vec<String>>,
}

impl CompilerConfig {
    /// Creates a new [`CompilerConfig`] with the specified overrides.
    ///
    /// # Arguments
    ///
    /// * `rules` - Constraint lists replacing the builtin list per type key.
    /// * `catalog` - Extra valid resource types per provider.
    pub fn new(rules: RuleSet, catalog: HashMap<CloudProvider, Vec<String>>) -> Self {
        Self { rules, catalog }
    }

    /// Returns the rule overrides.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the catalog extensions.
    pub fn catalog(&self) -> &HashMap<CloudProvider, Vec<String>> {
        &self.catalog
    }
}
