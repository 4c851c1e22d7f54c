//! Integration tests for schema canonicalization

use pretty_assertions::assert_eq;
use schemasift_core::{simplify, validation_errors};
use serde_json::json;

#[test]
fn record_schema_with_refs_canonicalizes_end_to_end() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": {"type": "integer"},
            "b": {"$ref": "#/x"}
        },
        "x": {"type": ["string", "null"]}
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
fn nested_structures_canonicalize_recursively() {
    let schema = json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "type": "object",
        "properties": {
            "id": {"type": "integer"},
            "tags": {
                "type": "array",
                "items": {"$ref": "#/definitions/tag"}
            },
            "address": {
                "type": ["object", "null"],
                "properties": {
                    "street": {"type": "string"},
                    "zip": {"type": ["string", "null"]}
                }
            }
        },
        "definitions": {
            "tag": {"type": "string"}
        }
    });

    assert_eq!(validation_errors(&schema), Vec::<String>::new());

    let canonical = simplify(&schema).unwrap();
    assert_eq!(
        canonical.to_value(),
        json!({
            "type": ["object"],
            "properties": {
                "id": {"type": ["integer"]},
                "tags": {"type": ["array"], "items": {"type": ["string"]}},
                "address": {
                    "type": ["object", "null"],
                    "properties": {
                        "street": {"type": ["string"]},
                        "zip": {"type": ["string", "null"]}
                    }
                }
            }
        })
    );
}

#[test]
fn validation_collects_every_problem_at_once() {
    // wrong version AND a dangling ref, reported together
    let schema = json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "properties": {"a": {"$ref": "#/definitions/missing"}}
    });

    let errors = validation_errors(&schema);
    assert!(errors.iter().any(|e| e.contains("must be Draft 4")));
    assert!(errors.iter().any(|e| e.contains("not found")));
}
