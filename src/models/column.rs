//! Column model

use serde::Serialize;
use std::collections::HashMap;

use super::enums::ReferentialAction;
use crate::validation::catalog::TypeFamily;

/// Reference from a column to another table's column
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForeignKey {
    pub(crate) table: String,
    pub(crate) column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) on_delete: Option<ReferentialAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) on_update: Option<ReferentialAction>,
}

impl ForeignKey {
    /// Referenced table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Referenced column name
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn on_delete(&self) -> Option<ReferentialAction> {
        self.on_delete
    }

    pub fn on_update(&self) -> Option<ReferentialAction> {
        self.on_update
    }
}

/// A validated column
///
/// Flags keep the distinction between "not set" and "set to false"; the
/// `is_*` helpers resolve an absent flag to its default.
///
/// # Example
///
/// ```rust
/// use datagen_schema::load_schema_from_str;
///
/// # let yaml = include_str!("../../tests/fixtures/loan_portfolio.yaml");
/// let schema = load_schema_from_str(yaml).unwrap();
/// let id = schema.table("borrowers").unwrap().column("id").unwrap();
/// assert!(id.is_primary_key());
/// assert!(id.is_auto_increment());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Column {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) data_type: String,
    #[serde(skip)]
    pub(crate) family: TypeFamily,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) auto_increment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generator_params: Option<HashMap<String, serde_yaml::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) foreign_key: Option<ForeignKey>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data type exactly as spelled in the document
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// Catalog family the data type was recognized as
    pub fn type_family(&self) -> TypeFamily {
        self.family
    }

    pub fn primary_key(&self) -> Option<bool> {
        self.primary_key
    }

    pub fn auto_increment(&self) -> Option<bool> {
        self.auto_increment
    }

    pub fn nullable(&self) -> Option<bool> {
        self.nullable
    }

    pub fn unique(&self) -> Option<bool> {
        self.unique
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key.unwrap_or(false)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment.unwrap_or(false)
    }

    /// Primary keys are never nullable; other columns default to nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(!self.is_primary_key())
    }

    pub fn is_unique(&self) -> bool {
        self.unique.unwrap_or(false)
    }

    /// Opaque default-value expression
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn generator(&self) -> Option<&str> {
        self.generator.as_deref()
    }

    /// Generator parameters; their shape is owned by the named generator
    pub fn generator_params(&self) -> Option<&HashMap<String, serde_yaml::Value>> {
        self.generator_params.as_ref()
    }

    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        self.foreign_key.as_ref()
    }
}
