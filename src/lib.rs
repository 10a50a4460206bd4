//! Datagen Schema - declarative schema loading for synthetic data generation
//!
//! Provides unified interfaces for:
//! - Document decoding (YAML, or JSON when the document starts with `{`)
//! - Validation of tables, columns, foreign keys and generation order
//! - Located, fail-fast errors (or every defect, in collect-all mode)
//! - The data-type catalog shared with the generation engine
//!
//! A validated [`Schema`] is immutable and satisfies every structural rule;
//! the generation engine consumes it without re-checking.
//!
//! ```
//! let schema = datagen_schema::load_schema_from_str(include_str!(
//!     "../tests/fixtures/loan_portfolio.yaml"
//! ))
//! .unwrap();
//! let order: Vec<&str> = schema.tables_in_generation_order().map(|t| t.name()).collect();
//! assert_eq!(order, ["borrowers", "loans"]);
//! ```

pub mod config;
pub mod import;
pub mod model;
pub mod models;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{DEFAULT_MAX_DOCUMENT_BYTES, ValidationConfig, ValidationConfigBuilder};
#[cfg(feature = "config-file")]
pub use config::ConfigError;
pub use import::{DocumentFormat, SchemaData, SchemaImporter};
pub use model::{SchemaLoader, load_schema_from_path, load_schema_from_reader, load_schema_from_str};
pub use validation::{
    EntityKind, ErrorKind, Location, SchemaError, SchemaValidator, TypeCatalog, TypeFamily,
    ValidationReport, Violation, validate_schema, validate_type,
};

// Re-export models
pub use models::{
    Column, EnforcementLevel, ForeignKey, Index, Metadata, ReferentialAction, Relationship,
    Schema, Table, ValidationRule,
};
