//! Node classification over raw JSON Schema documents.
//!
//! All functions here read `serde_json::Value` trees as produced by the
//! upstream record source. A node that is not a mapping carries no
//! information, which classification reads as "assume object"; the
//! validator facade is where non-mapping roots get reported.

use serde_json::Value;

use crate::error::SchemaError;
use crate::types::{TypeSet, TypeTag};

/// Extract the normalized type set of a schema node.
///
/// Absent, `null`, empty-string and empty-list `type` payloads all imply
/// `object`. A single name is wrapped into a one-element list. Never
/// returns an empty set.
pub fn get_type(node: &Value) -> Result<TypeSet, SchemaError> {
    match node.as_object().and_then(|map| map.get("type")) {
        None | Some(Value::Null) => Ok(TypeSet::single(TypeTag::Object)),
        Some(Value::String(name)) if name.is_empty() => Ok(TypeSet::single(TypeTag::Object)),
        Some(Value::String(name)) => Ok(TypeSet::single(name.parse()?)),
        Some(Value::Array(entries)) if entries.is_empty() => Ok(TypeSet::single(TypeTag::Object)),
        Some(Value::Array(entries)) => {
            let mut tags = Vec::with_capacity(entries.len());
            for entry in entries {
                let name = entry
                    .as_str()
                    .ok_or_else(|| SchemaError::InvalidTypeField(entry.to_string()))?;
                tags.push(name.parse()?);
            }
            Ok(TypeSet::from_tags(tags))
        }
        Some(other) => Err(SchemaError::InvalidTypeField(other.to_string())),
    }
}

/// True when the node implements `$ref`.
///
/// `$ref` overrides all sibling keys: whenever this holds, every other
/// classifier answers false and the simplifier ignores the rest of the
/// node's structural keys.
pub fn is_ref(node: &Value) -> bool {
    node.as_object()
        .map_or(false, |map| map.contains_key("$ref"))
}

/// True when the node's type allows being an object.
///
/// A structurally empty node also counts: no information is read as
/// "assume object".
pub fn is_object(node: &Value) -> Result<bool, SchemaError> {
    if is_ref(node) {
        return Ok(false);
    }

    let by_type = get_type(node)?.contains(TypeTag::Object);
    Ok(by_type
        || node
            .as_object()
            .map_or(true, |map| map.contains_key("properties") || map.is_empty()))
}

/// True when the node's type allows iteration (`array` with `items`).
///
/// A node typed `array` but missing `items` is NOT iterable: with the item
/// schema unknown there is nothing meaningful to recurse into, and callers
/// treat the node as a plain leaf instead.
pub fn is_iterable(node: &Value) -> Result<bool, SchemaError> {
    if is_ref(node) {
        return Ok(false);
    }

    Ok(get_type(node)?.contains(TypeTag::Array)
        && node
            .as_object()
            .map_or(false, |map| map.contains_key("items")))
}

/// True when the node's type allows being `null`.
pub fn is_nullable(node: &Value) -> Result<bool, SchemaError> {
    Ok(get_type(node)?.is_nullable())
}

/// True when the node's type intersects the literal types
/// (`string`, `integer`, `number`, `boolean`).
pub fn is_literal(node: &Value) -> Result<bool, SchemaError> {
    Ok(get_type(node)?.is_literal())
}

/// Copy of the node with `null` appended to its explicit type list.
///
/// The input is never touched. Applying the function twice yields the same
/// node as applying it once; [`is_nullable`] holds on the output.
pub fn make_nullable(node: &Value) -> Result<Value, SchemaError> {
    let types = get_type(node)?;
    if types.is_nullable() {
        return Ok(node.clone());
    }

    let mut out = node.as_object().cloned().unwrap_or_default();
    out.insert("type".to_string(), types.with_null().to_value());
    Ok(Value::Object(out))
}
