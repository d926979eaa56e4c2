//! Stratus - a compiler from visual canvas diagrams to cloud architectures.
//!
//! Normalization, validation, provider mapping, rule evaluation, and
//! deterministic scheduling for diagram IR payloads. The wire decoding and
//! variable resolution stages live in `stratus_ir`; the shared vocabulary
//! (providers, diagnostics, the architecture model) lives in `stratus_core`.

pub mod config;
pub mod graph;
pub mod map;
pub mod rules;
pub mod schedule;
pub mod validate;

mod error;

pub use stratus_core::{Architecture, BuiltinCatalog, CloudProvider, NodeId, TypeCatalog, diag};

pub use error::CompileError;

use std::{collections::BTreeMap, sync::Arc};

use log::{debug, error, info, trace};

use stratus_core::diag::Report;
use stratus_ir::VariableTable;

use config::CompilerConfig;
use graph::DiagramGraph;
use map::GeneratorRegistry;
use rules::RuleSet;
use validate::ValidateOptions;

/// One compilation request: the target provider and default region.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    provider: CloudProvider,
    region: String,
}

impl CompileRequest {
    /// Create a request targeting a provider and default region.
    pub fn new(provider: CloudProvider, region: impl Into<String>) -> Self {
        Self {
            provider,
            region: region.into(),
        }
    }

    /// Get the target provider.
    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    /// Get the default region, used when the diagram names none.
    pub fn region(&self) -> &str {
        &self.region
    }
}

/// The successful output of a full compilation.
#[derive(Debug)]
pub struct Compilation {
    architecture: Architecture,
    order: Vec<NodeId>,
    validation: Report,
    evaluations: BTreeMap<NodeId, Report>,
}

impl Compilation {
    /// Get the mapped architecture.
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// Get the deterministic resource creation order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Get the structural validation report (warnings only on success).
    pub fn validation(&self) -> &Report {
        &self.validation
    }

    /// Get the per-resource rule evaluation reports (all passing on
    /// success).
    pub fn evaluations(&self) -> &BTreeMap<NodeId, Report> {
        &self.evaluations
    }
}

/// The diagram compiler: one immutable pipeline driving all stages.
///
/// A compiler assembles its generator registry, per-provider rule sets, and
/// type catalog once in [`Compiler::new`] and never mutates them, so one
/// instance (or cheap clones of it) can serve many concurrent requests
/// without locking.
///
/// # Examples
///
/// ```
/// use stratus::{CloudProvider, CompileRequest, Compiler, config::CompilerConfig};
///
/// let payload = br#"{"nodes": [
///     {"id": "region-1", "data": {"resourceType": "region", "label": "us-east-1"}},
///     {"id": "vpc-1", "parentId": "region-1", "data": {"resourceType": "vpc"}}
/// ]}"#;
///
/// let compiler = Compiler::new(&CompilerConfig::default());
/// let request = CompileRequest::new(CloudProvider::Aws, "us-east-1");
/// let compilation = compiler.compile(payload, &request).expect("diagram compiles");
///
/// assert_eq!(compilation.order().len(), 2);
/// assert_eq!(compilation.architecture().region(), "us-east-1");
/// ```
#[derive(Clone)]
pub struct Compiler {
    registry: Arc<GeneratorRegistry>,
    rules: Arc<std::collections::HashMap<CloudProvider, RuleSet>>,
    catalog: Arc<BuiltinCatalog>,
}

impl Compiler {
    /// Create a compiler from a configuration.
    ///
    /// The builtin generator registry, rule sets, and type catalog are
    /// assembled here; the configuration's rule overrides merge over every
    /// provider's builtin rules, and its catalog entries extend the builtin
    /// type sets.
    pub fn new(config: &CompilerConfig) -> Self {
        let mut catalog = BuiltinCatalog::new();
        for (provider, types) in config.catalog() {
            catalog = catalog.extend(*provider, types.iter().cloned());
        }

        let rules = CloudProvider::ALL
            .iter()
            .map(|&provider| {
                (
                    provider,
                    RuleSet::builtin(provider).merge(config.rules().clone()),
                )
            })
            .collect();

        Self {
            registry: Arc::new(GeneratorRegistry::with_defaults()),
            rules: Arc::new(rules),
            catalog: Arc::new(catalog),
        }
    }

    /// Compile a diagram IR payload into a scheduled architecture.
    ///
    /// Runs every stage in order: parse, resolve variables, normalize,
    /// validate, map, evaluate rules, schedule. Structural errors and rule
    /// violations block compilation; their reports come back inside the
    /// error so the caller can render all findings at once.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] for malformed payloads, blocking validation
    /// findings, a missing provider generator, rule violations, or a
    /// relation cycle that survived validation.
    pub fn compile(
        &self,
        payload: &[u8],
        request: &CompileRequest,
    ) -> Result<Compilation, CompileError> {
        info!(provider:% = request.provider(), region = request.region(); "Compiling diagram");

        let document = stratus_ir::parse(payload)?;
        let table = VariableTable::from_variables(&document.variables);
        let document = stratus_ir::resolve(document, &table);
        trace!(document:?; "Resolved IR document");

        let graph = DiagramGraph::from_document(&document);
        debug!(nodes = graph.node_count(), edges = graph.edge_count(); "Normalized diagram");

        let options = ValidateOptions::new(request.provider(), self.catalog.as_ref());
        let validation = validate::validate(&graph, &options);
        if !validation.is_valid() {
            debug!(errors = validation.errors().len(); "Validation blocked compilation");
            return Err(CompileError::Validation(validation));
        }

        let architecture = map::map_architecture(&graph, request, &self.registry)?;

        let rules = self
            .rules
            .get(&request.provider())
            .expect("rule sets cover every provider");
        let evaluations = rules.evaluate(&architecture);
        if evaluations.values().any(|report| !report.is_valid()) {
            return Err(CompileError::Rules { evaluations });
        }

        let order = match schedule::schedule(&architecture) {
            Ok(order) => order,
            Err(err) => {
                // A validated architecture is acyclic; reaching this means
                // an earlier stage let an inconsistency through.
                error!(err:err; "Scheduling failed on a validated architecture");
                return Err(CompileError::Schedule(err));
            }
        };

        info!(
            resources = architecture.resources().len(),
            warnings = validation.warnings().len();
            "Compiled diagram"
        );
        Ok(Compilation {
            architecture,
            order,
            validation,
            evaluations,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(&CompilerConfig::default())
    }
}
