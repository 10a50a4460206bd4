//! Decoded (not yet validated) schema document
//!
//! Every entity rejects unknown fields so typos and stale documents fail at
//! decode time. Every field is optional here: a missing required field is
//! reported by the validator, which knows where in the document it is.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SchemaData {
    pub schema_version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub database_types: Option<Vec<String>>,
    pub metadata: Option<MetadataData>,
    pub tables: Option<Vec<TableData>>,
    #[serde(default)]
    pub relationships: Vec<RelationshipData>,
    pub generation_order: Option<Vec<String>>,
    #[serde(default)]
    pub validation_rules: Vec<ValidationRuleData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetadataData {
    pub industry: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub total_records: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub record_count: Option<i64>,
    pub columns: Option<Vec<ColumnData>>,
    #[serde(default)]
    pub indexes: Vec<IndexData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnData {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub primary_key: Option<bool>,
    pub auto_increment: Option<bool>,
    pub nullable: Option<bool>,
    pub unique: Option<bool>,
    pub default: Option<String>,
    pub generator: Option<String>,
    pub generator_params: Option<HashMap<String, serde_yaml::Value>>,
    pub foreign_key: Option<ForeignKeyData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ForeignKeyData {
    pub table: Option<String>,
    pub column: Option<String>,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IndexData {
    pub name: Option<String>,
    pub columns: Option<Vec<String>>,
    pub unique: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RelationshipData {
    pub from_table: Option<String>,
    pub from_column: Option<String>,
    pub to_table: Option<String>,
    pub to_column: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValidationRuleData {
    pub rule: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
}
