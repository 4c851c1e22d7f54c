//! Domain errors for schema normalization and SQL type mapping.

use thiserror::Error;

/// Errors raised while classifying, simplifying, or mapping JSON Schemas.
///
/// Every variant is a deterministic function of the input document. Nothing
/// here is retried or recovered internally; errors propagate to the caller
/// as the sole signal of domain-level invalidity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// `$ref` value does not use the `#/a/b/c` same-document syntax.
    #[error("Invalid format for `$ref`: \"{0}\"")]
    InvalidRef(String),

    /// A `$ref` path segment is absent from the document.
    #[error("`$ref` segment \"{0}\" not found in provided JSON Schema")]
    RefNotFound(String),

    /// A `$ref` chain loops back onto itself, directly or indirectly.
    #[error("`$ref` path is cyclical: {0}")]
    CyclicRef(String),

    /// A `type` entry names something outside the Draft-4 vocabulary.
    #[error("Unknown JSON Schema type: \"{0}\"")]
    UnknownType(String),

    /// The `type` key holds a payload that is neither a string nor a list
    /// of strings.
    #[error("Malformed `type` value: {0}")]
    InvalidTypeField(String),

    /// More than one non-null type on a single column.
    #[error("Multiple types per column not supported: [{0}]")]
    MultipleTypes(String),

    /// A column type outside the supported SQL vocabulary.
    #[error("Unsupported type `{0}` in existing target table")]
    UnsupportedSqlType(String),

    /// A type with no shorthand code.
    #[error("Shorthand not available for type `{0}`. Expected one of: {1}")]
    ShorthandUnavailable(String, String),
}
