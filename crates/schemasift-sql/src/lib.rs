//! SchemaSift SQL
//!
//! Lossy, bidirectional mapping between canonical schema nodes and the
//! closed column-type vocabulary of the relational sink. Ingestion flows
//! canonical node -> column type; reconciliation with an existing table
//! flows the other way.

pub mod codec;
pub mod column;

pub use codec::{from_sql, sql_shorthand, to_sql};
pub use column::{ColumnType, SqlType};
