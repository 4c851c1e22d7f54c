//! Recursive schema canonicalization.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::classify::{get_type, is_iterable, is_object};
use crate::error::SchemaError;
use crate::resolve::get_ref;
use crate::types::{CanonicalSchema, Shape};

/// Rewrite `schema` into canonical form.
///
/// - expands same-document `$ref`s to their target;
/// - normalizes `type` into an explicit list;
/// - strips every key except `type`, `properties`, `items`, `format` and
///   `default`.
///
/// The input is never mutated; the result is a fresh tree.
pub fn simplify(schema: &Value) -> Result<CanonicalSchema, SchemaError> {
    simplify_node(schema, schema, &mut Vec::new())
}

fn simplify_node(
    root: &Value,
    node: &Value,
    ref_stack: &mut Vec<String>,
) -> Result<CanonicalSchema, SchemaError> {
    let mut canonical = if let Some(raw_ref) = node.get("$ref") {
        let pointer = raw_ref
            .as_str()
            .ok_or_else(|| SchemaError::InvalidRef(raw_ref.to_string()))?;

        // A pointer already on the resolution stack means the chain loops.
        if ref_stack.iter().any(|seen| seen.as_str() == pointer) {
            let mut path = ref_stack.clone();
            path.push(pointer.to_string());
            return Err(SchemaError::CyclicRef(path.join(" -> ")));
        }

        ref_stack.push(pointer.to_string());
        let target = get_ref(root, pointer)?;
        let resolved = simplify_node(root, target, ref_stack)?;
        ref_stack.pop();
        resolved
    } else if is_object(node)? {
        let mut properties = BTreeMap::new();
        if let Some(fields) = node.get("properties").and_then(Value::as_object) {
            for (field, field_schema) in fields {
                properties.insert(field.clone(), simplify_node(root, field_schema, ref_stack)?);
            }
        }

        CanonicalSchema {
            types: get_type(node)?,
            shape: Shape::Object(properties),
            format: None,
            default: None,
        }
    } else if is_iterable(node)? {
        let empty = Value::Object(Map::new());
        let items = node.get("items").unwrap_or(&empty);

        CanonicalSchema {
            types: get_type(node)?,
            shape: Shape::Array(Box::new(simplify_node(root, items, ref_stack)?)),
            format: None,
            default: None,
        }
    } else {
        CanonicalSchema::scalar(get_type(node)?)
    };

    // `format` and `default` survive from the node being looked at, even
    // when that node is a `$ref`: the referencing node's annotations win
    // over whatever the resolved target contributed.
    if let Some(map) = node.as_object() {
        if let Some(format) = map.get("format").and_then(Value::as_str) {
            canonical.format = Some(format.to_string());
        }
        if let Some(default) = map.get("default") {
            canonical.default = Some(default.clone());
        }
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeSet, TypeTag};
    use serde_json::json;

    #[test]
    fn literal_nodes_keep_only_their_type() {
        let canonical = simplify(&json!({"type": "string", "maxLength": 32})).unwrap();
        assert_eq!(canonical.to_value(), json!({"type": ["string"]}));
    }

    #[test]
    fn empty_schema_is_a_trivial_object() {
        let canonical = simplify(&json!({})).unwrap();
        assert_eq!(
            canonical.to_value(),
            json!({"type": ["object"], "properties": {}})
        );
    }

    #[test]
    fn object_properties_are_recursed() {
        let schema = json!({
            "type": "object",
            "properties": {
                "a": {"type": "integer"},
                "b": {"type": ["string", "null"]}
            }
        });

        let canonical = simplify(&schema).unwrap();
        assert_eq!(
            canonical.to_value(),
            json!({
                "type": ["object"],
                "properties": {
                    "a": {"type": ["integer"]},
                    "b": {"type": ["string", "null"]}
                }
            })
        );
    }

    #[test]
    fn arrays_recurse_into_items() {
        let schema = json!({"type": "array", "items": {"type": "number"}});
        let canonical = simplify(&schema).unwrap();
        assert_eq!(
            canonical.to_value(),
            json!({"type": ["array"], "items": {"type": ["number"]}})
        );
    }

    #[test]
    fn array_without_items_stays_a_leaf() {
        let canonical = simplify(&json!({"type": "array"})).unwrap();
        assert_eq!(canonical.to_value(), json!({"type": ["array"]}));
        assert!(canonical.items().is_none());
    }

    #[test]
    fn ref_expands_to_its_target() {
        let schema = json!({
            "type": "object",
            "properties": {"b": {"$ref": "#/definitions/x"}},
            "definitions": {"x": {"type": "string"}}
        });

        let canonical = simplify(&schema).unwrap();
        let field = &canonical.properties().unwrap()["b"];
        assert_eq!(field.types, TypeSet::single(TypeTag::String));
    }

    #[test]
    fn ref_result_matches_inline_simplification() {
        let via_ref = simplify(&json!({
            "properties": {"v": {"$ref": "#/definitions/x"}},
            "definitions": {"x": {"type": "string"}}
        }))
        .unwrap();
        let inline = simplify(&json!({
            "properties": {"v": {"type": "string"}},
            "definitions": {"x": {"type": "string"}}
        }))
        .unwrap();

        assert_eq!(
            via_ref.properties().unwrap()["v"],
            inline.properties().unwrap()["v"]
        );
    }

    #[test]
    fn referencing_node_annotations_win() {
        let schema = json!({
            "properties": {
                "when": {"$ref": "#/definitions/stamp", "format": "date"}
            },
            "definitions": {"stamp": {"type": "string", "format": "date-time"}}
        });

        let canonical = simplify(&schema).unwrap();
        let field = &canonical.properties().unwrap()["when"];
        assert_eq!(field.format.as_deref(), Some("date"));
    }

    #[test]
    fn target_annotations_survive_when_referencer_has_none() {
        let schema = json!({
            "properties": {"when": {"$ref": "#/definitions/stamp"}},
            "definitions": {"stamp": {"type": "string", "format": "date-time"}}
        });

        let canonical = simplify(&schema).unwrap();
        let field = &canonical.properties().unwrap()["when"];
        assert_eq!(field.format.as_deref(), Some("date-time"));
    }

    #[test]
    fn default_is_copied_verbatim() {
        let canonical = simplify(&json!({"type": "integer", "default": 7})).unwrap();
        assert_eq!(canonical.default, Some(json!(7)));
    }

    #[test]
    fn self_referential_ref_fails() {
        let schema = json!({
            "properties": {"a": {"$ref": "#/definitions/a"}},
            "definitions": {"a": {"$ref": "#/definitions/a"}}
        });

        assert!(matches!(
            simplify(&schema).unwrap_err(),
            SchemaError::CyclicRef(_)
        ));
    }

    #[test]
    fn indirect_cycles_are_reported_with_their_path() {
        let schema = json!({
            "properties": {"a": {"$ref": "#/definitions/a"}},
            "definitions": {
                "a": {"$ref": "#/definitions/b"},
                "b": {"$ref": "#/definitions/a"}
            }
        });

        let err = simplify(&schema).unwrap_err();
        match err {
            SchemaError::CyclicRef(path) => {
                assert_eq!(
                    path,
                    "#/definitions/a -> #/definitions/b -> #/definitions/a"
                );
            }
            other => panic!("expected CyclicRef, got {other:?}"),
        }
    }

    #[test]
    fn repeated_refs_on_sibling_fields_are_fine() {
        let schema = json!({
            "properties": {
                "x": {"$ref": "#/definitions/id"},
                "y": {"$ref": "#/definitions/id"}
            },
            "definitions": {"id": {"type": "integer"}}
        });

        let canonical = simplify(&schema).unwrap();
        let properties = canonical.properties().unwrap();
        assert_eq!(properties["x"], properties["y"]);
    }

    #[test]
    fn unresolvable_ref_propagates() {
        let schema = json!({"properties": {"a": {"$ref": "#/definitions/a"}}});
        assert_eq!(
            simplify(&schema).unwrap_err(),
            SchemaError::RefNotFound("definitions".to_string())
        );
    }
}
