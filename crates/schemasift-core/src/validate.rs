//! Schema acceptance checks.
//!
//! The facade folds a fixed list of independent checks into one error
//! list and never fails itself: every problem, structural or domain, comes
//! back as a message. An empty result means the document is accepted.

use std::collections::BTreeSet;

use jsonschema::Validator;
use lazy_static::lazy_static;
use serde_json::Value;

use crate::simplify::simplify;

/// The `$schema` URI this system accepts.
pub const DRAFT4_URI: &str = "http://json-schema.org/draft-04/schema#";

/// Draft-4 meta-schema, embedded so structural validation needs no network
/// access.
const DRAFT4_META_SCHEMA: &str = include_str!("draft04_schema.json");

lazy_static! {
    /// One-time compiled validator for the Draft-4 meta-schema.
    static ref META_VALIDATOR: Validator = {
        let meta: Value = serde_json::from_str(DRAFT4_META_SCHEMA)
            .expect("embedded meta-schema should be valid JSON");

        jsonschema::options()
            .with_draft(jsonschema::Draft::Draft4)
            .build(&meta)
            .expect("embedded meta-schema should compile")
    };
}

/// Collect every known validation problem with `schema`.
///
/// The checks run independently and never short-circuit: a failure in one
/// never hides what the others would have reported.
pub fn validation_errors(schema: &Value) -> Vec<String> {
    let checks: [fn(&Value) -> Vec<String>; 4] = [
        check_document_shape,
        check_schema_version,
        check_draft4_structure,
        check_simplifies,
    ];

    checks.iter().flat_map(|check| check(schema)).collect()
}

/// The document root must be a JSON mapping.
fn check_document_shape(schema: &Value) -> Vec<String> {
    if schema.is_object() {
        Vec::new()
    } else {
        vec![format!(
            "Parameter `schema` is not a mapping, instead found: {}",
            json_type_name(schema)
        )]
    }
}

/// `$schema`, when present, must name Draft 4.
fn check_schema_version(schema: &Value) -> Vec<String> {
    match schema.get("$schema") {
        None => Vec::new(),
        Some(Value::String(uri)) if uri == DRAFT4_URI => Vec::new(),
        Some(found) => vec![format!("Schema version must be Draft 4. Found: {found}")],
    }
}

/// Structural validation against the Draft-4 meta-schema.
fn check_draft4_structure(schema: &Value) -> Vec<String> {
    let messages: BTreeSet<String> = META_VALIDATOR
        .iter_errors(schema)
        .map(|error| format!("{}: {}", error.instance_path(), error))
        .collect();
    messages.into_iter().collect()
}

/// A dry-run of simplification; resolution and classification errors
/// surface here.
fn check_simplifies(schema: &Value) -> Vec<String> {
    match simplify(schema) {
        Ok(_) => Vec::new(),
        Err(error) => vec![error.to_string()],
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
