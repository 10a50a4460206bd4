//! Model loading functionality
//!
//! Provides high-level operations for loading validated schemas from files,
//! readers and in-memory documents.

pub mod loader;

pub use loader::{
    SchemaLoader, load_schema_from_path, load_schema_from_reader, load_schema_from_str,
};
