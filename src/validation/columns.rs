//! Column validation
//!
//! Checks run in a fixed order: name, data type, auto-increment family,
//! generator, foreign-key shape. Whether a referenced table exists is checked
//! later by the cross-reference pass, once every table name is known.

use std::collections::HashSet;

use super::catalog::{TypeCatalog, TypeFamily};
use super::error::{EntityKind, Location, Violation};
use super::report::{Flow, Reporter};
use crate::import::{ColumnData, ForeignKeyData};
use crate::models::{Column, ForeignKey, ReferentialAction};

/// Validate one column of a table
///
/// `seen` holds the names of the columns already validated in the same table.
/// Returns `None` when the column could not be built (collect-all mode only;
/// in fail-fast mode the first defect halts).
pub(crate) fn validate_column(
    reporter: &mut Reporter,
    catalog: &TypeCatalog,
    table_location: &Location,
    index: usize,
    column: ColumnData,
    seen: &mut HashSet<String>,
) -> Flow<Option<Column>> {
    let location = table_location.column(index, column.name.as_deref());
    let mut valid = true;

    let name = reporter.required_str(&location, "name", column.name)?;
    if let Some(name) = &name
        && !seen.insert(name.clone())
    {
        reporter.report(
            &location,
            Violation::DuplicateName {
                entity: EntityKind::Column,
                name: name.clone(),
            },
        )?;
        valid = false;
    }

    let data_type = reporter.required_str(&location, "type", column.data_type)?;
    let family = match &data_type {
        Some(data_type) => match catalog.validate_type(data_type) {
            Ok(family) => Some(family),
            Err(violation) => {
                reporter.report(&location, violation)?;
                None
            }
        },
        None => None,
    };

    if column.auto_increment == Some(true)
        && let (Some(data_type), Some(family)) = (&data_type, family)
        && family != TypeFamily::Integer
    {
        reporter.report(
            &location,
            Violation::AutoIncrementRequiresInteger {
                data_type: data_type.clone(),
            },
        )?;
        valid = false;
    }

    if let Some(generator) = &column.generator
        && generator.is_empty()
    {
        reporter.report(&location, Violation::EmptyField { field: "generator" })?;
        valid = false;
    }

    if let Some(params) = &column.generator_params
        && params.keys().any(|key| key.is_empty())
    {
        reporter.report(
            &location,
            Violation::InvalidValue {
                field: "generator_params",
                reason: "parameter names must not be empty".to_string(),
            },
        )?;
        valid = false;
    }

    if let Some(params) = &column.generator_params
        && let Some((key, defect)) = params
            .iter()
            .filter_map(|(key, value)| parameter_defect(value).map(|defect| (key, defect)))
            .min_by(|a, b| a.0.cmp(b.0))
    {
        reporter.report(
            &location,
            Violation::InvalidValue {
                field: "generator_params",
                reason: format!("parameter '{}' {}", key, defect),
            },
        )?;
        valid = false;
    }

    let foreign_key = match column.foreign_key {
        Some(data) => match validate_foreign_key(reporter, &location.foreign_key(), data)? {
            Some(fk) => Some(fk),
            None => {
                valid = false;
                None
            }
        },
        None => None,
    };

    match (name, data_type, family) {
        (Some(name), Some(data_type), Some(family)) if valid => Ok(Some(Column {
            name,
            data_type,
            family,
            primary_key: column.primary_key,
            auto_increment: column.auto_increment,
            nullable: column.nullable,
            unique: column.unique,
            default: column.default,
            generator: column.generator,
            generator_params: column.generator_params,
            foreign_key,
        })),
        _ => Ok(None),
    }
}

/// Check that a foreign key is well-formed on its own
/// Parameters must stay representable as JSON
fn parameter_defect(value: &serde_yaml::Value) -> Option<&'static str> {
    use serde_yaml::Value;

    match value {
        Value::Number(n) if n.is_nan() || n.is_infinite() => Some("is not a finite number"),
        Value::Sequence(items) => items.iter().find_map(parameter_defect),
        Value::Mapping(map) => {
            if map.keys().any(|key| !key.is_string()) {
                return Some("has a non-string key");
            }
            map.values().find_map(parameter_defect)
        }
        Value::Tagged(tagged) => parameter_defect(&tagged.value),
        _ => None,
    }
}

fn validate_foreign_key(
    reporter: &mut Reporter,
    location: &Location,
    data: ForeignKeyData,
) -> Flow<Option<ForeignKey>> {
    let table = reporter.required_str(location, "table", data.table)?;
    let column = reporter.required_str(location, "column", data.column)?;
    let on_delete = referential_action(reporter, location, "on_delete", data.on_delete)?;
    let on_update = referential_action(reporter, location, "on_update", data.on_update)?;

    match (table, column, on_delete, on_update) {
        (Some(table), Some(column), Some(on_delete), Some(on_update)) => Ok(Some(ForeignKey {
            table,
            column,
            on_delete,
            on_update,
        })),
        _ => Ok(None),
    }
}

/// Parse an optional action; the outer `None` means the spelling was invalid
fn referential_action(
    reporter: &mut Reporter,
    location: &Location,
    field: &'static str,
    value: Option<String>,
) -> Flow<Option<Option<ReferentialAction>>> {
    let Some(value) = value else {
        return Ok(Some(None));
    };
    match value.parse::<ReferentialAction>() {
        Ok(action) => Ok(Some(Some(action))),
        Err(()) => {
            reporter.report(location, Violation::InvalidReferentialAction { field, value })?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error::ErrorKind;
    use crate::validation::report::{Halt, ValidationMode};

    fn column(name: &str, data_type: &str) -> ColumnData {
        ColumnData {
            name: Some(name.to_string()),
            data_type: Some(data_type.to_string()),
            ..Default::default()
        }
    }

    fn run(mode: ValidationMode, data: ColumnData) -> (Flow<Option<Column>>, Reporter) {
        let mut reporter = Reporter::new(mode);
        let mut seen = HashSet::new();
        let table = Location::root().table(0, Some("users"));
        let result = validate_column(
            &mut reporter,
            TypeCatalog::standard(),
            &table,
            0,
            data,
            &mut seen,
        );
        (result, reporter)
    }

    fn first_violation(reporter: Reporter) -> Violation {
        let errors = reporter.into_errors();
        errors[0].violation().cloned().unwrap()
    }

    #[test]
    fn test_valid_column_records_family() {
        let (result, reporter) = run(ValidationMode::FailFast, column("email", "VARCHAR(255)"));
        let column = result.unwrap().unwrap();
        assert!(reporter.is_clean());
        assert_eq!(column.name(), "email");
        assert_eq!(column.data_type(), "VARCHAR(255)");
        assert_eq!(column.type_family(), TypeFamily::String);
    }

    #[test]
    fn test_missing_name() {
        let data = ColumnData {
            data_type: Some("int".to_string()),
            ..Default::default()
        };
        let (result, reporter) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));
        assert_eq!(first_violation(reporter), Violation::MissingField { field: "name" });
    }

    #[test]
    fn test_duplicate_name_in_table() {
        let mut reporter = Reporter::new(ValidationMode::FailFast);
        let mut seen = HashSet::new();
        let table = Location::root().table(0, Some("users"));
        let catalog = TypeCatalog::standard();

        let first = validate_column(
            &mut reporter,
            catalog,
            &table,
            0,
            column("id", "int"),
            &mut seen,
        );
        assert!(first.unwrap().is_some());
        let second = validate_column(
            &mut reporter,
            catalog,
            &table,
            1,
            column("id", "int"),
            &mut seen,
        );
        assert_eq!(second, Err(Halt));

        let errors = reporter.into_errors();
        let error = &errors[0];
        assert_eq!(error.kind(), ErrorKind::Duplicate);
        assert_eq!(
            error.to_string(),
            "table[0] 'users' > column[1] 'id': duplicate column name 'id'"
        );
    }

    #[test]
    fn test_unknown_type() {
        let (result, reporter) = run(ValidationMode::FailFast, column("id", "serial"));
        assert_eq!(result, Err(Halt));
        assert_eq!(
            first_violation(reporter),
            Violation::UnknownDataType("serial".to_string())
        );
    }

    #[test]
    fn test_auto_increment_requires_integer() {
        let mut data = column("code", "varchar(50)");
        data.auto_increment = Some(true);
        let (result, reporter) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));
        let violation = first_violation(reporter);
        assert_eq!(violation.kind(), ErrorKind::InvalidValue);
        assert!(violation.to_string().contains("integer-family"));

        let mut data = column("id", "BIGINT");
        data.auto_increment = Some(true);
        let (result, _) = run(ValidationMode::FailFast, data);
        assert!(result.unwrap().is_some());

        let mut data = column("code", "varchar(50)");
        data.auto_increment = Some(false);
        let (result, _) = run(ValidationMode::FailFast, data);
        assert!(result.unwrap().is_some());
    }

    #[test]
    fn test_empty_generator_and_param_name() {
        let mut data = column("amount", "decimal(10,2)");
        data.generator = Some(String::new());
        let (result, reporter) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));
        assert_eq!(
            first_violation(reporter),
            Violation::EmptyField { field: "generator" }
        );

        let mut data = column("amount", "decimal(10,2)");
        data.generator = Some("range".to_string());
        data.generator_params = Some([(String::new(), serde_yaml::Value::Bool(true))].into());
        let (result, _) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));
    }

    #[test]
    fn test_non_finite_param_is_rejected() {
        let nan: serde_yaml::Value = serde_yaml::from_str(".nan").unwrap();
        let nested: serde_yaml::Value = serde_yaml::from_str("{ bounds: [0, -.inf] }").unwrap();
        let mut data = column("amount", "decimal(10,2)");
        data.generator = Some("range".to_string());
        data.generator_params = Some(
            [
                ("min".to_string(), serde_yaml::Value::from(0)),
                ("scale".to_string(), nan),
            ]
            .into(),
        );
        let (result, reporter) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));
        assert_eq!(
            first_violation(reporter),
            Violation::InvalidValue {
                field: "generator_params",
                reason: "parameter 'scale' is not a finite number".to_string(),
            }
        );

        let mut data = column("amount", "decimal(10,2)");
        data.generator_params = Some([("options".to_string(), nested)].into());
        let (result, _) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));

        let mapping: serde_yaml::Value = serde_yaml::from_str("{ 1: one }").unwrap();
        let mut data = column("amount", "decimal(10,2)");
        data.generator_params = Some([("labels".to_string(), mapping)].into());
        let (result, reporter) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));
        assert!(first_violation(reporter).to_string().contains("non-string key"));
    }

    #[test]
    fn test_foreign_key_shape() {
        let mut data = column("user_id", "int");
        data.foreign_key = Some(ForeignKeyData {
            table: Some("users".to_string()),
            column: Some("id".to_string()),
            on_delete: Some("SET NULL".to_string()),
            on_update: None,
        });
        let (result, _) = run(ValidationMode::FailFast, data);
        let column = result.unwrap().unwrap();
        let fk = column.foreign_key().unwrap();
        assert_eq!(fk.table(), "users");
        assert_eq!(fk.on_delete(), Some(ReferentialAction::SetNull));
        assert_eq!(fk.on_update(), None);
    }

    #[test]
    fn test_foreign_key_invalid_action() {
        let mut data = column("user_id", "int");
        data.foreign_key = Some(ForeignKeyData {
            table: Some("users".to_string()),
            column: Some("id".to_string()),
            on_delete: None,
            on_update: Some("NO ACTION".to_string()),
        });
        let (result, reporter) = run(ValidationMode::FailFast, data);
        assert_eq!(result, Err(Halt));
        let errors = reporter.into_errors();
        assert_eq!(
            errors[0].to_string(),
            "table[0] 'users' > column[0] 'user_id' > foreign_key: invalid on_update action \
             'NO ACTION' (expected one of CASCADE, SET NULL, RESTRICT)"
        );
    }

    #[test]
    fn test_collect_all_reports_each_defect_once() {
        let data = ColumnData {
            name: Some(String::new()),
            data_type: Some("uuid".to_string()),
            foreign_key: Some(ForeignKeyData::default()),
            ..Default::default()
        };
        let (result, reporter) = run(ValidationMode::CollectAll, data);
        assert_eq!(result, Ok(None));
        let violations: Vec<Violation> = reporter
            .into_errors()
            .iter()
            .filter_map(|e| e.violation().cloned())
            .collect();
        assert_eq!(
            violations,
            vec![
                Violation::EmptyField { field: "name" },
                Violation::UnknownDataType("uuid".to_string()),
                Violation::MissingField { field: "table" },
                Violation::MissingField { field: "column" },
            ]
        );
    }
}
