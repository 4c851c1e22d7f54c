//! SchemaSift Core
//!
//! Schema normalization for relational data loading. Upstream producers
//! emit arbitrarily complex JSON Schema (Draft 4) documents describing
//! record shapes; a relational sink only understands a small, closed set of
//! column types. This crate turns the former into a restricted canonical
//! form: `$ref`s expanded, `type` always an explicit list, and everything
//! except `type` / `properties` / `items` / `format` / `default` stripped.

pub mod classify;
pub mod error;
pub mod resolve;
pub mod simplify;
pub mod types;
pub mod validate;

pub use classify::{
    get_type, is_iterable, is_literal, is_nullable, is_object, is_ref, make_nullable,
};
pub use error::SchemaError;
pub use resolve::get_ref;
pub use simplify::simplify;
pub use types::{CanonicalSchema, Shape, TypeSet, TypeTag};
pub use validate::{validation_errors, DRAFT4_URI};
