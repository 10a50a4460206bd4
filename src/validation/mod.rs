//! Validation functionality
//!
//! Provides validation logic for:
//! - Data types (keyword catalog and type families)
//! - Columns and tables (names, record counts, primary keys, foreign-key shape)
//! - Relationships (dangling references, referenced columns, cycles)
//! - Generation order (permutation of the table names)
//! - Schema-level orchestration in fail-fast or collect-all mode

pub mod catalog;
mod columns;
pub mod error;
mod order;
mod relationships;
mod report;
pub mod schema;
mod tables;

pub use catalog::{TypeCatalog, TypeEntry, TypeFamily, validate_type};
pub use error::{EntityKind, ErrorKind, Location, SchemaError, Segment, ValidationReport, Violation};
pub use schema::{SchemaValidator, validate_schema};
