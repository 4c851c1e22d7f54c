//! Same-document `$ref` resolution.
//!
//! Only the absolute `#/a/b/c` pointer form is accepted. Unlike full JSON
//! Pointer there is no `~0`/`~1` escape handling; segments are matched
//! literally. Resolution is a pure lookup that re-walks the document on
//! every call.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::SchemaError;

lazy_static! {
    /// Absolute, internally-defined `$ref` syntax.
    static ref REF_SYNTAX: Regex = Regex::new(r"^#/(.*)$").expect("ref pattern compiles");
}

/// Resolve `ref_path` against the root document.
///
/// Fails on malformed syntax, and on the first path segment missing from
/// the node currently being walked.
pub fn get_ref<'a>(root: &'a Value, ref_path: &str) -> Result<&'a Value, SchemaError> {
    let captures = REF_SYNTAX
        .captures(ref_path)
        .ok_or_else(|| SchemaError::InvalidRef(ref_path.to_string()))?;

    let mut node = root;
    for segment in captures[1].split('/') {
        node = node
            .as_object()
            .and_then(|map| map.get(segment))
            .ok_or_else(|| SchemaError::RefNotFound(segment.to_string()))?;
    }
    Ok(node)
}
