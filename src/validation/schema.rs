//! Schema-level validation
//!
//! Orchestrates the full pipeline over a decoded document and owns every
//! cross-table concern. The traversal order is fixed:
//!
//! 1. required top-level fields
//! 2. tables in declaration order, columns in declaration order
//! 3. foreign-key cross references (then cycles, when enabled)
//! 4. generation order
//! 5. relationship and validation-rule annotations
//!
//! [`SchemaValidator::validate`] returns the first defect in that order;
//! [`SchemaValidator::validate_all`] walks the same order and returns them all.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::catalog::TypeCatalog;
use super::error::{EntityKind, Location, SchemaError, ValidationReport, Violation};
use super::order::validate_generation_order;
use super::relationships::{detect_cycles, validate_foreign_keys};
use super::report::{Flow, Reporter, ValidationMode};
use super::tables::{TableIndex, validate_table};
use crate::config::ValidationConfig;
use crate::import::{MetadataData, RelationshipData, SchemaData, ValidationRuleData};
use crate::models::{EnforcementLevel, Metadata, Relationship, Schema, Table, ValidationRule};

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("version pattern is valid"));

/// Validates decoded schema documents
///
/// Holds no mutable state; one validator can check any number of documents,
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct SchemaValidator<'a> {
    catalog: &'a TypeCatalog,
    config: ValidationConfig,
}

impl Default for SchemaValidator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator<'static> {
    /// Create a validator using the standard type catalog and default config
    pub fn new() -> Self {
        Self::with_catalog(TypeCatalog::standard())
    }
}

impl<'a> SchemaValidator<'a> {
    /// Create a validator against an alternate type catalog
    pub fn with_catalog(catalog: &'a TypeCatalog) -> Self {
        Self {
            catalog,
            config: ValidationConfig::default(),
        }
    }

    /// Replace the validation configuration
    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &TypeCatalog {
        self.catalog
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a document, returning the first defect found
    pub fn validate(&self, data: SchemaData) -> Result<Schema, SchemaError> {
        self.finish(ValidationMode::FailFast, data)
            .map_err(|errors| {
                errors.into_iter().next().unwrap_or_else(|| SchemaError::Invalid {
                    location: Location::root(),
                    violation: Violation::InvalidValue {
                        field: "schema",
                        reason: "document was rejected without a recorded defect".to_string(),
                    },
                })
            })
    }

    /// Validate a document, returning every defect found
    pub fn validate_all(&self, data: SchemaData) -> Result<Schema, ValidationReport> {
        self.finish(ValidationMode::CollectAll, data)
            .map_err(ValidationReport::new)
    }

    fn finish(&self, mode: ValidationMode, data: SchemaData) -> Result<Schema, Vec<SchemaError>> {
        let mut reporter = Reporter::new(mode);
        let outcome = self.run(&mut reporter, data);
        let errors = reporter.into_errors();
        match outcome {
            Ok(Some(schema)) if errors.is_empty() => {
                debug!(
                    schema = schema.name(),
                    tables = schema.tables().len(),
                    "schema accepted"
                );
                Ok(schema)
            }
            _ => {
                debug!(errors = errors.len(), "schema rejected");
                Err(errors)
            }
        }
    }

    fn run(&self, reporter: &mut Reporter, data: SchemaData) -> Flow<Option<Schema>> {
        let root = Location::root();

        let name = reporter.required_str(&root, "name", data.name)?;
        let schema_version = reporter.required_str(&root, "schema_version", data.schema_version)?;
        // free text; present but possibly empty
        let description = match data.description {
            Some(description) => Some(description),
            None => {
                reporter.report(&root, Violation::MissingField { field: "description" })?;
                None
            }
        };
        let author = reporter.required_str(&root, "author", data.author)?;
        let version = match reporter.required_str(&root, "version", data.version)? {
            Some(version) if VERSION_PATTERN.is_match(&version) => Some(version),
            Some(version) => {
                reporter.report(
                    &root,
                    Violation::InvalidValue {
                        field: "version",
                        reason: format!("expected MAJOR.MINOR.PATCH, found '{}'", version),
                    },
                )?;
                None
            }
            None => None,
        };
        let database_types = validate_database_types(reporter, data.database_types)?;
        let metadata = validate_metadata(reporter, data.metadata)?;
        let tables = reporter.required_list(&root, "tables", data.tables)?;
        let generation_order =
            reporter.required_list(&root, "generation_order", data.generation_order)?;

        let mut index = TableIndex::default();
        let mut validated: Vec<Option<Table>> = Vec::new();
        let tables_present = tables.is_some();
        for (i, table) in tables.into_iter().flatten().enumerate() {
            validated.push(validate_table(reporter, self.catalog, &mut index, i, table)?);
        }

        let before = reporter.error_count();
        validate_foreign_keys(
            reporter,
            &validated,
            &index,
            self.config.check_referenced_columns,
        )?;
        if self.config.detect_cycles && reporter.error_count() == before {
            detect_cycles(reporter, &validated, &index)?;
        }

        if let Some(order) = &generation_order {
            validate_generation_order(reporter, order, &index)?;
        }

        let relationships = validate_relationships(reporter, data.relationships)?;
        let validation_rules = validate_rules(reporter, data.validation_rules)?;

        if !reporter.is_clean() || !tables_present {
            return Ok(None);
        }
        let tables: Option<Vec<Table>> = validated.into_iter().collect();

        let schema = match (
            name,
            schema_version,
            description,
            author,
            version,
            database_types,
            metadata,
            tables,
            generation_order,
        ) {
            (
                Some(name),
                Some(schema_version),
                Some(description),
                Some(author),
                Some(version),
                Some(database_types),
                Some(metadata),
                Some(tables),
                Some(generation_order),
            ) => Schema {
                schema_version,
                name,
                description,
                author,
                version,
                database_types,
                metadata,
                tables,
                relationships,
                generation_order,
                validation_rules,
            },
            _ => return Ok(None),
        };

        let planned = schema.planned_records();
        if schema.metadata.total_records != planned {
            debug!(
                declared = schema.metadata.total_records,
                planned, "metadata total_records differs from the sum of table record counts"
            );
        }
        Ok(Some(schema))
    }
}

/// Validate a decoded document with the standard catalog, failing fast
pub fn validate_schema(data: SchemaData) -> Result<Schema, SchemaError> {
    SchemaValidator::new().validate(data)
}

fn validate_database_types(
    reporter: &mut Reporter,
    database_types: Option<Vec<String>>,
) -> Flow<Option<Vec<String>>> {
    let root = Location::root();
    let Some(database_types) = reporter.required_list(&root, "database_types", database_types)?
    else {
        return Ok(None);
    };

    let mut valid = true;
    let mut seen = HashSet::new();
    for (i, kind) in database_types.iter().enumerate() {
        let location = root.child(EntityKind::DatabaseType, Some(i), Some(kind.as_str()));
        if kind.is_empty() {
            reporter.report(&location, Violation::EmptyField { field: "database_types" })?;
            valid = false;
        } else if !seen.insert(kind.as_str()) {
            reporter.report(
                &location,
                Violation::DuplicateName {
                    entity: EntityKind::DatabaseType,
                    name: kind.clone(),
                },
            )?;
            valid = false;
        }
    }
    Ok(valid.then_some(database_types))
}

fn validate_metadata(
    reporter: &mut Reporter,
    metadata: Option<MetadataData>,
) -> Flow<Option<Metadata>> {
    let Some(metadata) = metadata else {
        reporter.report(&Location::root(), Violation::MissingField { field: "metadata" })?;
        return Ok(None);
    };

    let location = Location::root().child(EntityKind::Metadata, None, None);
    let industry = reporter.required_str(&location, "industry", metadata.industry)?;
    let total_records = match metadata.total_records {
        Some(total) if total >= 0 => Some(total as u64),
        Some(total) => {
            reporter.report(
                &location,
                Violation::InvalidValue {
                    field: "total_records",
                    reason: format!("must not be negative, found {}", total),
                },
            )?;
            None
        }
        None => {
            reporter.report(&location, Violation::MissingField { field: "total_records" })?;
            None
        }
    };

    Ok(match (industry, total_records) {
        (Some(industry), Some(total_records)) => Some(Metadata {
            industry,
            tags: metadata.tags,
            total_records,
        }),
        _ => None,
    })
}

fn validate_relationships(
    reporter: &mut Reporter,
    relationships: Vec<RelationshipData>,
) -> Flow<Vec<Relationship>> {
    let mut validated = Vec::with_capacity(relationships.len());
    for (i, data) in relationships.into_iter().enumerate() {
        let location = Location::root().child(EntityKind::Relationship, Some(i), None);
        let from_table = reporter.required_str(&location, "from_table", data.from_table)?;
        let from_column = reporter.required_str(&location, "from_column", data.from_column)?;
        let to_table = reporter.required_str(&location, "to_table", data.to_table)?;
        let to_column = reporter.required_str(&location, "to_column", data.to_column)?;
        let kind = reporter.required_str(&location, "type", data.kind)?;

        if let (Some(from_table), Some(from_column), Some(to_table), Some(to_column), Some(kind)) =
            (from_table, from_column, to_table, to_column, kind)
        {
            validated.push(Relationship {
                from_table,
                from_column,
                to_table,
                to_column,
                kind,
                description: data.description,
            });
        }
    }
    Ok(validated)
}

fn validate_rules(
    reporter: &mut Reporter,
    rules: Vec<ValidationRuleData>,
) -> Flow<Vec<ValidationRule>> {
    let mut validated = Vec::with_capacity(rules.len());
    for (i, data) in rules.into_iter().enumerate() {
        let location =
            Location::root().child(EntityKind::ValidationRule, Some(i), data.rule.as_deref());
        let rule = reporter.required_str(&location, "rule", data.rule)?;
        let level = match reporter.required_str(&location, "level", data.level)? {
            Some(level) => match level.parse::<EnforcementLevel>() {
                Ok(level) => Some(level),
                Err(()) => {
                    reporter.report(
                        &location,
                        Violation::InvalidValue {
                            field: "level",
                            reason: format!("expected 'soft' or 'hard', found '{}'", level),
                        },
                    )?;
                    None
                }
            },
            None => None,
        };

        if let (Some(rule), Some(level)) = (rule, level) {
            validated.push(ValidationRule {
                rule,
                description: data.description,
                level,
            });
        }
    }
    Ok(validated)
}
