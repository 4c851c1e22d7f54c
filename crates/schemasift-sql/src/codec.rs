//! Two-way codec between canonical schema nodes and column types.

use schemasift_core::{CanonicalSchema, SchemaError, TypeSet, TypeTag};

use crate::column::{ColumnType, SqlType};

/// Types with a shorthand code, for error messages.
const SHORTHAND_TYPES: &str = "null, string, number, integer, boolean";

/// Derive the column type for a canonical node.
///
/// Arity rules over the node's type set:
/// - one member: that member is the working type, column is NOT NULL;
/// - two members, one of them `null`: the other is the working type,
///   column is nullable;
/// - two members, neither `null`: no working type, falls through to
///   `text NOT NULL` (long-standing behavior existing tables depend on);
/// - more than two members: unsupported.
pub fn to_sql(schema: &CanonicalSchema) -> Result<ColumnType, SchemaError> {
    let tags = schema.types.as_slice();

    let (working, not_null) = match tags {
        [only] => (Some(*only), true),
        [TypeTag::Null, other] => (Some(*other), false),
        [other, TypeTag::Null] => (Some(*other), false),
        [_, _] | [] => (None, true),
        _ => {
            return Err(SchemaError::MultipleTypes(render_tags(tags)));
        }
    };

    let sql_type = match working {
        Some(TypeTag::String) if schema.format.as_deref() == Some("date-time") => {
            SqlType::TimestampTz
        }
        Some(TypeTag::Boolean) => SqlType::Boolean,
        Some(TypeTag::Integer) => SqlType::Bigint,
        Some(TypeTag::Number) => SqlType::DoublePrecision,
        _ => SqlType::Text,
    };

    Ok(ColumnType::new(sql_type, not_null))
}

/// Rebuild the canonical fragment for a column of an existing table.
///
/// Inverse of [`to_sql`] over the closed vocabulary; `nullable` is taken
/// from the table catalog and appends `null` to the type list.
pub fn from_sql(sql_type: &str, nullable: bool) -> Result<CanonicalSchema, SchemaError> {
    let sql_type: SqlType = sql_type.parse()?;

    let (tag, format) = match sql_type {
        SqlType::TimestampTz => (TypeTag::String, Some("date-time")),
        SqlType::Bigint => (TypeTag::Integer, None),
        SqlType::DoublePrecision => (TypeTag::Number, None),
        SqlType::Boolean => (TypeTag::Boolean, None),
        SqlType::Text => (TypeTag::String, None),
    };

    let types = TypeSet::single(tag);
    let types = if nullable { types.with_null() } else { types };

    let canonical = CanonicalSchema::scalar(types);
    Ok(match format {
        Some(format) => canonical.with_format(format),
        None => canonical,
    })
}

/// Compact discriminator code for a canonical node's type set.
///
/// One character per member, concatenated in sorted type-name order;
/// `null` contributes the empty string.
pub fn sql_shorthand(schema: &CanonicalSchema) -> Result<String, SchemaError> {
    let mut tags = schema.types.as_slice().to_vec();
    tags.sort();

    let mut shorthand = String::new();
    for tag in tags {
        shorthand.push_str(tag_code(tag)?);
    }
    Ok(shorthand)
}

fn tag_code(tag: TypeTag) -> Result<&'static str, SchemaError> {
    match tag {
        TypeTag::Null => Ok(""),
        TypeTag::String => Ok("s"),
        TypeTag::Number => Ok("f"),
        TypeTag::Integer => Ok("i"),
        TypeTag::Boolean => Ok("b"),
        other => Err(SchemaError::ShorthandUnavailable(
            other.to_string(),
            SHORTHAND_TYPES.to_string(),
        )),
    }
}

fn render_tags(tags: &[TypeTag]) -> String {
    tags.iter()
        .map(TypeTag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
