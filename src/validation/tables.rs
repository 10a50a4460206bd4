//! Table validation functionality
//!
//! Validates one table: name, record count, columns (threading the set of
//! column names seen so far), the single-primary-key rule and index shape.
//! Table names are registered in a [`TableIndex`] as they are validated so that
//! duplicates fail at the second occurrence.

use std::collections::{HashMap, HashSet};

use super::catalog::TypeCatalog;
use super::columns::validate_column;
use super::error::{EntityKind, Location, Violation};
use super::report::{Flow, Reporter};
use crate::import::{IndexData, TableData};
use crate::models::{Index, Table};

/// Table names of a schema in declaration order, mapped to the position of
/// the declaring table
///
/// Built during the table pass and discarded once validation completes.
#[derive(Debug, Default)]
pub(crate) struct TableIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TableIndex {
    /// Register a table name declared at `position`; returns false if the
    /// name was already present
    pub(crate) fn insert(&mut self, name: &str, position: usize) -> bool {
        if self.positions.contains_key(name) {
            return false;
        }
        self.positions.insert(name.to_string(), position);
        self.names.push(name.to_string());
        true
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Declaration position of a table
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Names in declaration order
    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }
}

/// Validate one table, registering its name in `tables`
pub(crate) fn validate_table(
    reporter: &mut Reporter,
    catalog: &TypeCatalog,
    tables: &mut TableIndex,
    index: usize,
    table: TableData,
) -> Flow<Option<Table>> {
    let location = Location::root().table(index, table.name.as_deref());
    let mut valid = true;

    let name = reporter.required_str(&location, "name", table.name)?;
    if let Some(name) = &name
        && !tables.insert(name, index)
    {
        reporter.report(
            &location,
            Violation::DuplicateName {
                entity: EntityKind::Table,
                name: name.clone(),
            },
        )?;
        valid = false;
    }

    let record_count = match table.record_count {
        Some(count) if count > 0 => Some(count as u64),
        Some(count) => {
            reporter.report(&location, Violation::NonPositiveRecordCount(count))?;
            None
        }
        None => {
            reporter.report(&location, Violation::MissingField { field: "record_count" })?;
            None
        }
    };

    let columns = match reporter.required_list(&location, "columns", table.columns)? {
        Some(columns) => {
            let primary_keys = columns
                .iter()
                .filter(|c| c.primary_key == Some(true))
                .count();

            let mut seen = HashSet::new();
            let mut validated = Vec::with_capacity(columns.len());
            for (i, column) in columns.into_iter().enumerate() {
                match validate_column(reporter, catalog, &location, i, column, &mut seen)? {
                    Some(column) => validated.push(column),
                    None => valid = false,
                }
            }

            if primary_keys != 1 {
                reporter.report(&location, Violation::PrimaryKeyCount(primary_keys))?;
                valid = false;
            }
            Some(validated)
        }
        None => None,
    };

    let mut indexes = Vec::with_capacity(table.indexes.len());
    for (i, data) in table.indexes.into_iter().enumerate() {
        match validate_index(reporter, &location, i, data)? {
            Some(index) => indexes.push(index),
            None => valid = false,
        }
    }

    match (name, record_count, columns) {
        (Some(name), Some(record_count), Some(columns)) if valid => Ok(Some(Table {
            name,
            description: table.description,
            record_count,
            columns,
            indexes,
        })),
        _ => Ok(None),
    }
}

/// Indexes are only checked for non-emptiness
fn validate_index(
    reporter: &mut Reporter,
    table_location: &Location,
    index: usize,
    data: IndexData,
) -> Flow<Option<Index>> {
    let location = table_location.index(index, data.name.as_deref());
    let name = reporter.required_str(&location, "name", data.name)?;
    let columns = reporter.required_list(&location, "columns", data.columns)?;

    let mut valid = true;
    if let Some(columns) = &columns
        && columns.iter().any(|c| c.is_empty())
    {
        reporter.report(
            &location,
            Violation::InvalidValue {
                field: "columns",
                reason: "column names must not be empty".to_string(),
            },
        )?;
        valid = false;
    }

    match (name, columns) {
        (Some(name), Some(columns)) if valid => Ok(Some(Index {
            name,
            columns,
            unique: data.unique,
        })),
        _ => Ok(None),
    }
}
