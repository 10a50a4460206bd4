//! Table model

use super::column::Column;
use serde::Serialize;

/// Index descriptor; carried for the generation engine
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Index {
    pub(crate) name: String,
    pub(crate) columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unique: Option<bool>,
}

impl Index {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_unique(&self) -> bool {
        self.unique.unwrap_or(false)
    }
}

/// A validated table: a named, non-empty list of columns with exactly one
/// primary key and a positive target record count
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Table {
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) record_count: u64,
    pub(crate) columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) indexes: Vec<Index>,
}

impl Table {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of rows the generation engine should produce
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The single primary-key column
    pub fn primary_key(&self) -> &Column {
        // validation guarantees exactly one
        self.columns
            .iter()
            .find(|c| c.is_primary_key())
            .unwrap_or(&self.columns[0])
    }

    /// Columns carrying a foreign key, in declaration order
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.foreign_key.is_some())
    }
}
