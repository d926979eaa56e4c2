//! Rule engine: per-resource-type constraints evaluated over an architecture.
//!
//! A [`RuleSet`] maps resource types to constraint lists. Evaluation is
//! total: every resource of the architecture gets a [`Report`] entry, and a
//! resource accumulates all of its violations rather than stopping at the
//! first. Rules run after (and independently of) structural validation:
//! structural validity does not imply rule validity.
//!
//! Type keys are matched case- and underscore-insensitively, so a rule
//! keyed `nat_gateway` applies to the mapped `NATGateway` resource type.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use stratus_core::{
    Architecture, CloudProvider, NodeId, Resource,
    diag::{Diagnostic, ErrorCode, Report},
};

/// A single constraint on resources of one type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// The resource must have a containment parent of one of these types.
    RequireParent { parents: Vec<String> },
    /// The named config field must be present and non-null.
    RequireConfig { field: String },
    /// When present, the named config field must hold one of these values.
    ConfigOneOf { field: String, values: Vec<String> },
}

impl Constraint {
    fn check(
        &self,
        resource: &Resource,
        parent: Option<&NodeId>,
        architecture: &Architecture,
        report: &mut Report,
    ) {
        match self {
            Constraint::RequireParent { parents } => match parent {
                None => report.push(
                    Diagnostic::error(format!(
                        "resource `{}` of type `{}` requires a containment parent, one of: {}",
                        resource.id(),
                        resource.resource_type(),
                        backticked(parents)
                    ))
                    .with_code(ErrorCode::E400)
                    .with_subject(resource.id().clone()),
                ),
                Some(parent_id) => {
                    let parent_type = architecture
                        .resource(parent_id)
                        .map(|parent| parent.resource_type().to_string())
                        .unwrap_or_default();
                    let allowed = parents
                        .iter()
                        .any(|wanted| type_key(wanted) == type_key(&parent_type));
                    if !allowed {
                        report.push(
                            Diagnostic::error(format!(
                                "resource `{}` has parent of type `{parent_type}`, expected one of: {}",
                                resource.id(),
                                backticked(parents)
                            ))
                            .with_code(ErrorCode::E401)
                            .with_subject(resource.id().clone()),
                        );
                    }
                }
            },
            Constraint::RequireConfig { field } => {
                let value = resource.metadata().config().get(field);
                if value.is_none_or(Value::is_null) {
                    report.push(
                        Diagnostic::error(format!(
                            "resource `{}` is missing required config field `{field}`",
                            resource.id()
                        ))
                        .with_code(ErrorCode::E402)
                        .with_subject(resource.id().clone()),
                    );
                }
            }
            Constraint::ConfigOneOf { field, values } => {
                // Presence is RequireConfig's concern; absent or null passes.
                let Some(value) = resource.metadata().config().get(field) else {
                    return;
                };
                if value.is_null() {
                    return;
                }
                let text = canonical_text(value);
                if !values.contains(&text) {
                    report.push(
                        Diagnostic::error(format!(
                            "config field `{field}` of resource `{}` has value `{text}`, allowed values: {}",
                            resource.id(),
                            backticked(values)
                        ))
                        .with_code(ErrorCode::E403)
                        .with_subject(resource.id().clone()),
                    );
                }
            }
        }
    }
}

/// Per-resource-type constraint lists.
///
/// Deserializes from a plain map, so a TOML table of constraint arrays (or
/// the equivalent JSON) loads directly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    constraints: BTreeMap<String, Vec<Constraint>>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin constraints for a provider.
    pub fn builtin(provider: CloudProvider) -> Self {
        let rules = Self::new();
        match provider {
            CloudProvider::Aws => rules
                .with_constraints("subnet", vec![require_parent(&["vpc"])])
                .with_constraints("ec2", vec![require_parent(&["subnet"])])
                .with_constraints(
                    "rds",
                    vec![
                        require_parent(&["subnet", "vpc"]),
                        Constraint::ConfigOneOf {
                            field: "engine".to_string(),
                            values: vec![
                                "postgres".to_string(),
                                "mysql".to_string(),
                                "mariadb".to_string(),
                                "aurora".to_string(),
                            ],
                        },
                    ],
                )
                .with_constraints("security_group", vec![require_parent(&["vpc"])])
                .with_constraints("internet_gateway", vec![require_parent(&["vpc"])])
                .with_constraints("nat_gateway", vec![require_parent(&["subnet"])]),
            CloudProvider::Azure => rules
                .with_constraints("subnet", vec![require_parent(&["vnet"])])
                .with_constraints("virtual_machine", vec![require_parent(&["subnet"])])
                .with_constraints("network_security_group", vec![require_parent(&["vnet"])])
                .with_constraints("application_gateway", vec![require_parent(&["subnet"])]),
            CloudProvider::Gcp => rules
                .with_constraints("subnet", vec![require_parent(&["network"])])
                .with_constraints("compute_instance", vec![require_parent(&["subnet"])])
                .with_constraints("firewall", vec![require_parent(&["network"])]),
        }
    }

    /// Set the constraint list for a resource type, replacing any existing
    /// list. Returns `self` for method chaining.
    pub fn with_constraints(mut self, resource_type: &str, constraints: Vec<Constraint>) -> Self {
        self.constraints.insert(type_key(resource_type), constraints);
        self
    }

    /// Overlay another rule set; its list replaces this set's list for every
    /// type key it names.
    pub fn merge(mut self, overrides: RuleSet) -> Self {
        for (key, constraints) in overrides.constraints {
            self.constraints.insert(type_key(&key), constraints);
        }
        self
    }

    /// Number of resource types with constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if no type has constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Evaluate every resource of the architecture against its type's
    /// constraints.
    ///
    /// Total: the result has an entry for every resource, empty when the
    /// resource's type has no constraints or all of them hold.
    pub fn evaluate(&self, architecture: &Architecture) -> BTreeMap<NodeId, Report> {
        let lookup: HashMap<String, &[Constraint]> = self
            .constraints
            .iter()
            .map(|(key, list)| (type_key(key), list.as_slice()))
            .collect();

        let mut parent_of: HashMap<&NodeId, &NodeId> = HashMap::new();
        for (parent, children) in architecture.containments() {
            for child in children {
                parent_of.insert(child, parent);
            }
        }

        let mut results = BTreeMap::new();
        for (id, resource) in architecture.resources() {
            let mut report = Report::new();
            if let Some(constraints) = lookup.get(&type_key(resource.resource_type())) {
                for constraint in *constraints {
                    constraint.check(resource, parent_of.get(id).copied(), architecture, &mut report);
                }
            }
            results.insert(id.clone(), report);
        }

        let flagged = results.values().filter(|report| !report.is_valid()).count();
        debug!(resources = results.len(), flagged = flagged; "Evaluated rule set");
        results
    }
}

fn require_parent(types: &[&str]) -> Constraint {
    Constraint::RequireParent {
        parents: types.iter().map(|t| (*t).to_string()).collect(),
    }
}

/// Normalized type key: lowercase with underscores dropped, so the diagram
/// vocabulary (`nat_gateway`) and mapped names (`NATGateway`) coincide.
fn type_key(resource_type: &str) -> String {
    resource_type
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn backticked(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("`{value}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use stratus_core::CloudProvider;

    use super::*;
    use crate::{
        CompileRequest,
        graph::DiagramGraph,
        map::{GeneratorRegistry, map_architecture},
    };

    fn aws_architecture(payload: &str) -> Architecture {
        let doc = serde_json::from_str(payload).unwrap();
        let graph = DiagramGraph::from_document(&doc);
        let request = CompileRequest::new(CloudProvider::Aws, "us-east-1");
        map_architecture(&graph, &request, &GeneratorRegistry::with_defaults()).unwrap()
    }

    fn codes(report: &Report) -> Vec<ErrorCode> {
        report.errors().iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_well_formed_architecture_passes_builtins() {
        let arch = aws_architecture(
            r#"{"nodes": [
                {"id": "vpc-1", "data": {"resourceType": "vpc"}},
                {"id": "subnet-1", "parentId": "vpc-1", "data": {"resourceType": "subnet"}},
                {"id": "ec2-1", "parentId": "subnet-1", "data": {"resourceType": "ec2"}}
            ]}"#,
        );

        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        assert_eq!(results.len(), 3);
        assert!(results.values().all(Report::is_valid));
    }

    #[test]
    fn test_missing_parent_violation() {
        let arch = aws_architecture(
            r#"{"nodes": [{"id": "subnet-1", "data": {"resourceType": "subnet"}}]}"#,
        );

        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        let report = &results[&NodeId::new("subnet-1")];
        assert_eq!(codes(report), vec![ErrorCode::E400]);
        assert!(report.errors()[0].message().contains("`vpc`"));
    }

    #[test]
    fn test_wrong_parent_type_violation() {
        let arch = aws_architecture(
            r#"{"nodes": [
                {"id": "vpc-1", "data": {"resourceType": "vpc"}},
                {"id": "ec2-1", "parentId": "vpc-1", "data": {"resourceType": "ec2"}}
            ]}"#,
        );

        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        let report = &results[&NodeId::new("ec2-1")];
        assert_eq!(codes(report), vec![ErrorCode::E401]);
        assert!(report.errors()[0].message().contains("`VPC`"));
    }

    #[test]
    fn test_missing_config_field_violation() {
        let arch = aws_architecture(
            r#"{"nodes": [{"id": "lambda-1", "data": {"resourceType": "lambda"}}]}"#,
        );
        let rules = RuleSet::new().with_constraints(
            "lambda",
            vec![Constraint::RequireConfig {
                field: "runtime".to_string(),
            }],
        );

        let results = rules.evaluate(&arch);

        assert_eq!(codes(&results[&NodeId::new("lambda-1")]), vec![ErrorCode::E402]);
    }

    #[test]
    fn test_null_config_field_counts_as_missing() {
        let arch = aws_architecture(
            r#"{"nodes": [{"id": "lambda-1",
                            "data": {"resourceType": "lambda", "config": {"runtime": null}}}]}"#,
        );
        let rules = RuleSet::new().with_constraints(
            "lambda",
            vec![Constraint::RequireConfig {
                field: "runtime".to_string(),
            }],
        );

        let results = rules.evaluate(&arch);

        assert_eq!(codes(&results[&NodeId::new("lambda-1")]), vec![ErrorCode::E402]);
    }

    #[test]
    fn test_config_one_of_violation() {
        let arch = aws_architecture(
            r#"{"nodes": [
                {"id": "vpc-1", "data": {"resourceType": "vpc"}},
                {"id": "rds-1", "parentId": "vpc-1",
                 "data": {"resourceType": "rds", "config": {"engine": "oracle"}}}
            ]}"#,
        );

        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        let report = &results[&NodeId::new("rds-1")];
        assert_eq!(codes(report), vec![ErrorCode::E403]);
        assert!(report.errors()[0].message().contains("`oracle`"));
    }

    #[test]
    fn test_config_one_of_accepts_allowed_and_absent() {
        let arch = aws_architecture(
            r#"{"nodes": [
                {"id": "vpc-1", "data": {"resourceType": "vpc"}},
                {"id": "rds-1", "parentId": "vpc-1",
                 "data": {"resourceType": "rds", "config": {"engine": "postgres"}}},
                {"id": "rds-2", "parentId": "vpc-1", "data": {"resourceType": "rds"}}
            ]}"#,
        );

        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        assert!(results[&NodeId::new("rds-1")].is_valid());
        assert!(results[&NodeId::new("rds-2")].is_valid());
    }

    #[test]
    fn test_violations_accumulate_per_resource() {
        let arch = aws_architecture(
            r#"{"nodes": [{"id": "rds-1",
                            "data": {"resourceType": "rds", "config": {"engine": "oracle"}}}]}"#,
        );

        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        // Missing parent and disallowed engine, reported together.
        assert_eq!(
            codes(&results[&NodeId::new("rds-1")]),
            vec![ErrorCode::E400, ErrorCode::E403]
        );
    }

    #[test]
    fn test_type_key_matching_is_underscore_insensitive() {
        let arch = aws_architecture(
            r#"{"nodes": [{"id": "nat-1", "data": {"resourceType": "nat_gateway"}}]}"#,
        );

        // The mapped type is `NATGateway`; the rule key is the diagram
        // spelling.
        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        assert_eq!(codes(&results[&NodeId::new("nat-1")]), vec![ErrorCode::E400]);
    }

    #[test]
    fn test_merge_replaces_per_type_key() {
        let overrides: RuleSet = serde_json::from_value(serde_json::json!({
            "subnet": [{"kind": "require_parent", "parents": ["network"]}]
        }))
        .unwrap();
        let rules = RuleSet::builtin(CloudProvider::Aws).merge(overrides);

        let arch = aws_architecture(
            r#"{"nodes": [
                {"id": "vpc-1", "data": {"resourceType": "vpc"}},
                {"id": "subnet-1", "parentId": "vpc-1", "data": {"resourceType": "subnet"}}
            ]}"#,
        );

        let results = rules.evaluate(&arch);

        // The override demands a `network` parent, so the vpc parent now
        // violates E401.
        assert_eq!(codes(&results[&NodeId::new("subnet-1")]), vec![ErrorCode::E401]);
    }

    #[test]
    fn test_unruled_resources_get_empty_reports() {
        let arch = aws_architecture(
            r#"{"nodes": [{"id": "s3-1", "data": {"resourceType": "s3"}}]}"#,
        );

        let results = RuleSet::builtin(CloudProvider::Aws).evaluate(&arch);

        assert_eq!(results.len(), 1);
        assert!(results[&NodeId::new("s3-1")].is_empty());
    }

    #[test]
    fn test_rule_set_deserializes_from_map() {
        let rules: RuleSet = serde_json::from_value(serde_json::json!({
            "ec2": [
                {"kind": "require_parent", "parents": ["subnet"]},
                {"kind": "require_config", "field": "instance_type"},
                {"kind": "config_one_of", "field": "tenancy",
                 "values": ["default", "dedicated"]}
            ]
        }))
        .unwrap();

        assert_eq!(rules.len(), 1);
        assert!(!rules.is_empty());
    }
}
