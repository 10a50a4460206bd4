//! Schema model
//!
//! The top-level validated value handed to the generation engine. It can only
//! be obtained from the validator, so holding a `Schema` means every table,
//! column and cross-reference in it has been checked.

use serde::Serialize;

use super::enums::EnforcementLevel;
use super::relationship::Relationship;
use super::table::Table;

/// Descriptive metadata block
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Metadata {
    pub(crate) industry: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<String>,
    pub(crate) total_records: u64,
}

impl Metadata {
    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Total record count declared by the author (informational)
    pub fn total_records(&self) -> u64 {
        self.total_records
    }
}

/// Validation-rule annotation; carried through, never enforced here
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidationRule {
    pub(crate) rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) level: EnforcementLevel,
}

impl ValidationRule {
    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn level(&self) -> EnforcementLevel {
        self.level
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Schema {
    pub(crate) schema_version: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) author: String,
    pub(crate) version: String,
    pub(crate) database_types: Vec<String>,
    pub(crate) metadata: Metadata,
    pub(crate) tables: Vec<Table>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) relationships: Vec<Relationship>,
    pub(crate) generation_order: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) validation_rules: Vec<ValidationRule>,
}

impl Schema {
    /// Document format version tag
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Content version (`MAJOR.MINOR.PATCH`)
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Supported target database kinds
    pub fn database_types(&self) -> &[String] {
        &self.database_types
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Table names in the order the generation engine should populate them
    pub fn generation_order(&self) -> &[String] {
        &self.generation_order
    }

    /// Tables in generation order
    pub fn tables_in_generation_order(&self) -> impl Iterator<Item = &Table> {
        self.generation_order
            .iter()
            .filter_map(move |name| self.table(name))
    }

    pub fn validation_rules(&self) -> &[ValidationRule] {
        &self.validation_rules
    }

    /// Sum of every table's record count
    pub fn planned_records(&self) -> u64 {
        self.tables.iter().map(|t| t.record_count).sum()
    }

    /// Serialize back to the YAML document format
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Serialize back to the JSON document format
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
