//! Canonical schema trees and the normalized type representation.
//!
//! Raw documents carry `type` as a bare string, a list, or nothing at all.
//! Everything downstream of the classifier only ever sees the normalized
//! form defined here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// JSON Schema primitive type names, Draft 4 vocabulary.
///
/// Variants are declared in the lexical order of the JSON names, so the
/// derived `Ord` sorts tags exactly like sorting the names themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl TypeTag {
    /// The JSON name of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Null => "null",
            Self::Number => "number",
            Self::Object => "object",
            Self::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" => Ok(Self::Array),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "null" => Ok(Self::Null),
            "number" => Ok(Self::Number),
            "object" => Ok(Self::Object),
            "string" => Ok(Self::String),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }
}

/// The ordered list of type tags attached to a schema node.
///
/// The classifier never produces an empty set. Insertion order is preserved
/// and duplicates are kept; only the shorthand encoder sorts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeSet(Vec<TypeTag>);

impl TypeSet {
    /// A one-element set.
    pub fn single(tag: TypeTag) -> Self {
        Self(vec![tag])
    }

    /// Build a set from tags, keeping their order.
    pub fn from_tags(tags: Vec<TypeTag>) -> Self {
        Self(tags)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: TypeTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn as_slice(&self) -> &[TypeTag] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.0.iter().copied()
    }

    /// True when `null` is one of the members.
    pub fn is_nullable(&self) -> bool {
        self.contains(TypeTag::Null)
    }

    /// True when the set intersects the literal types
    /// (`string`, `integer`, `number`, `boolean`).
    pub fn is_literal(&self) -> bool {
        self.0.iter().any(|tag| {
            matches!(
                tag,
                TypeTag::String | TypeTag::Integer | TypeTag::Number | TypeTag::Boolean
            )
        })
    }

    /// A copy with `null` appended when absent. Idempotent; the receiver is
    /// never modified.
    pub fn with_null(&self) -> Self {
        if self.is_nullable() {
            return self.clone();
        }
        let mut tags = self.0.clone();
        tags.push(TypeTag::Null);
        Self(tags)
    }

    /// The JSON list-of-names form, e.g. `["string", "null"]`.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|tag| Value::String(tag.as_str().to_string()))
                .collect(),
        )
    }
}

/// Structural payload of a canonical node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// No nested structure: literals, bare `array`-typed leaves, and so on.
    Scalar,

    /// Named fields, each canonicalized. Field order is irrelevant.
    Object(BTreeMap<String, CanonicalSchema>),

    /// A single item schema shared by every element.
    Array(Box<CanonicalSchema>),
}

/// Output of simplification.
///
/// Only `type`, structure, `format` and `default` survive; a canonical node
/// never contains a `$ref`.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSchema {
    /// Always an explicit, non-empty list.
    pub types: TypeSet,

    /// Nested structure, when the node describes one.
    pub shape: Shape,

    /// `format` copied verbatim from the source node.
    pub format: Option<String>,

    /// `default` copied verbatim from the source node.
    pub default: Option<Value>,
}

impl CanonicalSchema {
    /// A structureless node carrying only its type set.
    pub fn scalar(types: TypeSet) -> Self {
        Self {
            types,
            shape: Shape::Scalar,
            format: None,
            default: None,
        }
    }

    /// Set the `format` annotation.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the `default` annotation.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.types.is_nullable()
    }

    /// The field map, when this node describes an object.
    pub fn properties(&self) -> Option<&BTreeMap<String, CanonicalSchema>> {
        match &self.shape {
            Shape::Object(properties) => Some(properties),
            _ => None,
        }
    }

    /// The item schema, when this node describes an array.
    pub fn items(&self) -> Option<&CanonicalSchema> {
        match &self.shape {
            Shape::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Nullability widening: a fresh node whose type list includes `null`.
    /// Applying this twice yields the same node as applying it once.
    pub fn make_nullable(&self) -> Self {
        Self {
            types: self.types.with_null(),
            ..self.clone()
        }
    }

    /// Lower to the flat JSON form
    /// `{type, properties?/items?, format?, default?}`.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), self.types.to_value());

        match &self.shape {
            Shape::Scalar => {}
            Shape::Object(properties) => {
                let mut fields = Map::new();
                for (name, field) in properties {
                    fields.insert(name.clone(), field.to_value());
                }
                out.insert("properties".to_string(), Value::Object(fields));
            }
            Shape::Array(items) => {
                out.insert("items".to_string(), items.to_value());
            }
        }

        if let Some(format) = &self.format {
            out.insert("format".to_string(), Value::String(format.clone()));
        }
        if let Some(default) = &self.default {
            out.insert("default".to_string(), default.clone());
        }

        Value::Object(out)
    }
}
