//! SQL column type vocabulary.

use std::fmt;
use std::str::FromStr;

use schemasift_core::SchemaError;

/// The closed set of column types the relational sink understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bigint,
    Boolean,
    DoublePrecision,
    Text,
    TimestampTz,
}

impl SqlType {
    /// The catalog spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bigint => "bigint",
            Self::Boolean => "boolean",
            Self::DoublePrecision => "double precision",
            Self::Text => "text",
            Self::TimestampTz => "timestamp with time zone",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SqlType {
    type Err = SchemaError;

    /// Exact names as reported by the sink's information schema. Anything
    /// else is outside the supported vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bigint" => Ok(Self::Bigint),
            "boolean" => Ok(Self::Boolean),
            "double precision" => Ok(Self::DoublePrecision),
            "text" => Ok(Self::Text),
            "timestamp with time zone" => Ok(Self::TimestampTz),
            other => Err(SchemaError::UnsupportedSqlType(other.to_string())),
        }
    }
}

/// A column type plus its nullability constraint.
///
/// Nullability travels separately from the type name, the way the sink's
/// information schema reports it; `Display` renders the combined DDL form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnType {
    pub sql_type: SqlType,
    pub not_null: bool,
}

impl ColumnType {
    pub fn new(sql_type: SqlType, not_null: bool) -> Self {
        Self { sql_type, not_null }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not_null {
            write!(f, "{} NOT NULL", self.sql_type)
        } else {
            write!(f, "{}", self.sql_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_catalog_spellings() {
        assert_eq!(SqlType::Bigint.to_string(), "bigint");
        assert_eq!(SqlType::DoublePrecision.to_string(), "double precision");
        assert_eq!(SqlType::TimestampTz.to_string(), "timestamp with time zone");
    }

    #[test]
    fn parse_round_trip() {
        for name in [
            "bigint",
            "boolean",
            "double precision",
            "text",
            "timestamp with time zone",
        ] {
            let parsed: SqlType = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
    }

    #[test]
    fn parse_rejects_unknown_types() {
        assert_eq!(
            "varchar(255)".parse::<SqlType>().unwrap_err(),
            SchemaError::UnsupportedSqlType("varchar(255)".to_string())
        );
    }

    #[test]
    fn column_type_renders_not_null_suffix() {
        assert_eq!(
            ColumnType::new(SqlType::Bigint, true).to_string(),
            "bigint NOT NULL"
        );
        assert_eq!(ColumnType::new(SqlType::Text, false).to_string(), "text");
    }
}
