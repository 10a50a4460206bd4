//! Relationship annotation model
//!
//! Relationships document how tables relate for readers of the schema. They
//! are not used for validation; foreign keys on columns are authoritative.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Relationship {
    pub(crate) from_table: String,
    pub(crate) from_column: String,
    pub(crate) to_table: String,
    pub(crate) to_column: String,
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
}

impl Relationship {
    pub fn from_table(&self) -> &str {
        &self.from_table
    }

    pub fn from_column(&self) -> &str {
        &self.from_column
    }

    pub fn to_table(&self) -> &str {
        &self.to_table
    }

    pub fn to_column(&self) -> &str {
        &self.to_column
    }

    /// Relationship kind tag, e.g. `many_to_one`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
