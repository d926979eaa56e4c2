//! Variable resolution over IR documents.
//!
//! A document may reference declared variables anywhere a string appears
//! in a node id, a parent reference, or a config value, using the
//! full-string form `"var.<name>"`. Resolution builds a typed table from
//! the document's declarations, then walks the document once, replacing
//! each reference with the table entry's value.
//!
//! Two behaviors are deliberate:
//!
//! - Only full-string matches resolve. `"var.cidr/24"` or `"prefix
//!   var.name"` are interpolations, which this system does not support,
//!   and pass through unchanged.
//! - A reference to an undefined name passes through unchanged, no error.
//!   Partially specified templates are valid input; later stages see the
//!   unresolved text as an ordinary literal.

use indexmap::IndexMap;
use log::trace;
use serde_json::{Number, Value};

use crate::document::{IrDocument, IrVariable, VariableKind};

/// A resolved variable value, typed by the variable's declared kind.
///
/// Substitution into config fields uses the native JSON form (a bool stays
/// a bool); substitution into id fields uses the canonical text rendering,
/// since ids are strings.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    String(String),
    Bool(bool),
    Number(Number),
}

impl VariableValue {
    /// The native JSON value of this entry.
    pub fn to_json(&self) -> Value {
        match self {
            VariableValue::String(s) => Value::String(s.clone()),
            VariableValue::Bool(b) => Value::Bool(*b),
            VariableValue::Number(n) => Value::Number(n.clone()),
        }
    }

    /// The canonical text rendering of this entry.
    pub fn render_text(&self) -> String {
        match self {
            VariableValue::String(s) => s.clone(),
            VariableValue::Bool(b) => b.to_string(),
            VariableValue::Number(n) => n.to_string(),
        }
    }
}

/// The resolved variable table of a document.
///
/// Entries keep declaration order; a name declared twice keeps its last
/// declaration.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    entries: IndexMap<String, VariableValue>,
}

impl VariableTable {
    /// Build a table from wire variable declarations.
    ///
    /// Each default is coerced to its declared kind where that is clean
    /// (`"true"` to a bool, `"5"` to a number, a number to text for a
    /// string kind). An uncoercible default keeps its literal text form.
    pub fn from_variables(variables: &[IrVariable]) -> Self {
        let mut entries = IndexMap::new();
        for variable in variables {
            let value = coerce(variable.kind, &variable.default);
            entries.insert(variable.name.clone(), value);
        }
        trace!(count = entries.len(); "Built variable table");
        Self { entries }
    }

    /// Look up an entry by variable name.
    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.entries.get(name)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry a full-string `var.<name>` reference points at.
    ///
    /// Returns `None` for non-references, empty names, and undefined
    /// names alike; callers treat all three as passthrough.
    fn lookup_symbol(&self, text: &str) -> Option<&VariableValue> {
        let name = text.strip_prefix("var.")?;
        if name.is_empty() {
            return None;
        }
        self.entries.get(name)
    }
}

/// Substitute `var.<name>` references in a document from a table.
///
/// Runs after decoding and before normalization. Node ids and parent
/// references substitute the entry's text rendering; config values
/// substitute the entry's native JSON value, recursively through nested
/// arrays and objects. Everything else passes through unchanged.
pub fn resolve(mut document: IrDocument, table: &VariableTable) -> IrDocument {
    if table.is_empty() {
        return document;
    }

    for node in &mut document.nodes {
        if let Some(entry) = table.lookup_symbol(&node.id) {
            let resolved = entry.render_text();
            trace!(reference = node.id, resolved = resolved; "Resolved node id");
            node.id = resolved;
        }
        if let Some(parent_id) = &node.parent_id
            && let Some(entry) = table.lookup_symbol(parent_id)
        {
            node.parent_id = Some(entry.render_text());
        }
        for value in node.data.config.values_mut() {
            resolve_value(value, table);
        }
    }
    document
}

/// Substitute references in one config value, recursively.
fn resolve_value(value: &mut Value, table: &VariableTable) {
    match value {
        Value::String(s) => {
            if let Some(entry) = table.lookup_symbol(s) {
                *value = entry.to_json();
            }
        }
        Value::Array(items) => {
            for item in items {
                resolve_value(item, table);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                resolve_value(item, table);
            }
        }
        _ => {}
    }
}

/// Coerce a JSON default to the variable's declared kind.
fn coerce(kind: VariableKind, default: &Value) -> VariableValue {
    match kind {
        VariableKind::String => match default {
            Value::String(s) => VariableValue::String(s.clone()),
            Value::Bool(b) => VariableValue::String(b.to_string()),
            Value::Number(n) => VariableValue::String(n.to_string()),
            other => VariableValue::String(other.to_string()),
        },
        VariableKind::Bool => match default {
            Value::Bool(b) => VariableValue::Bool(*b),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" => VariableValue::Bool(true),
                "false" => VariableValue::Bool(false),
                _ => VariableValue::String(s.clone()),
            },
            other => VariableValue::String(literal_text(other)),
        },
        VariableKind::Number => match default {
            Value::Number(n) => VariableValue::Number(n.clone()),
            Value::String(s) => parse_number(s)
                .map(VariableValue::Number)
                .unwrap_or_else(|| VariableValue::String(s.clone())),
            other => VariableValue::String(literal_text(other)),
        },
    }
}

/// Parse a string to a JSON number, preserving integer form when possible.
fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Literal text of an uncoercible default.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
