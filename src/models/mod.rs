//! Models module
//!
//! Validated, immutable schema entities. Values of these types are produced only
//! by the validator; ownership is a strict tree (schema → tables → columns →
//! foreign key) with no back-references.

pub mod column;
pub mod enums;
pub mod relationship;
pub mod schema;
pub mod table;

pub use column::{Column, ForeignKey};
pub use enums::*;
pub use relationship::Relationship;
pub use schema::{Metadata, Schema, ValidationRule};
pub use table::{Index, Table};
