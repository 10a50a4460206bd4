//! Output formatting for CLI

use serde::Serialize;

use crate::models::Schema;
use crate::validation::{SchemaError, TypeCatalog, TypeFamily};

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ValidationOutput<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'a Schema>,
    errors: Vec<ErrorOutput>,
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    message: String,
}

impl From<&SchemaError> for ErrorOutput {
    fn from(error: &SchemaError) -> Self {
        Self {
            kind: format!("{:?}", error.kind()),
            location: error.location().map(ToString::to_string),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TypeOutput<'a> {
    keyword: &'a str,
    family: TypeFamily,
}

/// Summary of an accepted schema, tables listed in generation order
pub fn format_schema_summary(schema: &Schema) -> String {
    let mut output = format!(
        "Schema '{}' v{} is valid: {} table(s), {} planned record(s)\n",
        schema.name(),
        schema.version(),
        schema.tables().len(),
        schema.planned_records()
    );
    output.push_str("Generation order:\n");
    for (idx, table) in schema.tables_in_generation_order().enumerate() {
        output.push_str(&format!(
            "  {}. {} ({} records, {} columns, {} foreign keys)\n",
            idx + 1,
            table.name(),
            table.record_count(),
            table.columns().len(),
            table.foreign_keys().count()
        ));
    }
    output
}

/// JSON report for an accepted schema, including the schema itself
pub fn format_json_success(schema: &Schema) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ValidationOutput {
        valid: true,
        schema: Some(schema),
        errors: Vec::new(),
    })
}

/// JSON report for a rejected schema
pub fn format_json_failure(errors: &[SchemaError]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ValidationOutput {
        valid: false,
        schema: None,
        errors: errors.iter().map(ErrorOutput::from).collect(),
    })
}

/// Catalog keywords, one per line, grouped by family
pub fn format_types_text(catalog: &TypeCatalog) -> String {
    let mut entries: Vec<_> = catalog.entries().iter().collect();
    entries.sort_by(|a, b| {
        a.family
            .to_string()
            .cmp(&b.family.to_string())
            .then_with(|| a.keyword.cmp(&b.keyword))
    });

    let mut output = format!("Type catalog version {}\n", catalog.version());
    for entry in entries {
        output.push_str(&format!("  {:<12} {}\n", entry.keyword, entry.family));
    }
    output
}

pub fn format_types_json(catalog: &TypeCatalog) -> serde_json::Result<String> {
    let types: Vec<TypeOutput<'_>> = catalog
        .entries()
        .iter()
        .map(|entry| TypeOutput {
            keyword: &entry.keyword,
            family: entry.family,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "version": catalog.version(),
        "types": types,
    }))
}
