//! Relationship validation functionality
//!
//! Cross-reference checks between tables:
//! - every foreign key names an existing table
//! - optionally, the referenced column exists and is a primary key or unique
//! - optionally, foreign keys do not form a cycle between tables
//!
//! Tables are visited in declaration order and columns in declaration order,
//! so the first reported defect is always the same for a given document.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};

use super::error::{Location, Violation};
use super::report::{Flow, Reporter};
use super::tables::TableIndex;
use crate::models::{ForeignKey, Table};

/// Check every foreign key against the table-name index
///
/// `tables` holds the validated tables by declaration position; `None` marks
/// a table that failed validation (collect-all mode), whose foreign keys are
/// not checked again.
pub(crate) fn validate_foreign_keys(
    reporter: &mut Reporter,
    tables: &[Option<Table>],
    index: &TableIndex,
    check_referenced_columns: bool,
) -> Flow<()> {
    for (position, table) in tables.iter().enumerate() {
        let Some(table) = table else { continue };
        let table_location = Location::root().table(position, Some(table.name()));

        for (c, column) in table.columns().iter().enumerate() {
            let Some(fk) = column.foreign_key() else { continue };
            let location = table_location
                .column(c, Some(column.name()))
                .foreign_key();

            let Some(target) = index.position(fk.table()) else {
                reporter.report(
                    &location,
                    Violation::UnknownReferencedTable(fk.table().to_string()),
                )?;
                continue;
            };

            if check_referenced_columns && let Some(Some(target)) = tables.get(target) {
                validate_referenced_column(reporter, &location, fk, target)?;
            }
        }
    }
    Ok(())
}

/// The referenced column must exist and identify a single row
fn validate_referenced_column(
    reporter: &mut Reporter,
    location: &Location,
    fk: &ForeignKey,
    target: &Table,
) -> Flow<()> {
    let Some(column) = target.column(fk.column()) else {
        return reporter.report(
            location,
            Violation::UnknownReferencedColumn {
                table: fk.table().to_string(),
                column: fk.column().to_string(),
            },
        );
    };

    let unique_index = target
        .indexes()
        .iter()
        .any(|i| i.is_unique() && i.columns() == [fk.column()]);
    if !(column.is_primary_key() || column.is_unique() || unique_index) {
        reporter.report(
            location,
            Violation::ReferencedColumnNotUnique {
                table: fk.table().to_string(),
                column: fk.column().to_string(),
            },
        )?;
    }
    Ok(())
}

/// Report the first foreign-key cycle between tables, if any
///
/// A table referencing itself is not a cycle: the generation engine fills
/// self-references from rows of the same table.
pub(crate) fn detect_cycles(
    reporter: &mut Reporter,
    tables: &[Option<Table>],
    index: &TableIndex,
) -> Flow<()> {
    let mut graph = Graph::<&str, (), Directed>::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();
    for name in index.names() {
        node_map.insert(name.as_str(), graph.add_node(name.as_str()));
    }

    for table in tables.iter().flatten() {
        let Some(&from) = node_map.get(table.name()) else { continue };
        for fk in table.columns().iter().filter_map(|c| c.foreign_key()) {
            match node_map.get(fk.table()) {
                Some(&to) if to != from => {
                    graph.update_edge(from, to, ());
                }
                _ => {}
            }
        }
    }

    let Err(cycle) = toposort(&graph, None) else {
        return Ok(());
    };

    let path = cycle_through(&graph, cycle.node_id());
    let start = path[0];
    let location = Location::root().table(index.position(start).unwrap_or_default(), Some(start));
    reporter.report(
        &location,
        Violation::ForeignKeyCycle(path.iter().map(|name| name.to_string()).collect()),
    )
}

/// Closed cycle through `node`, rotated to start at the earliest declared table
fn cycle_through<'a>(graph: &Graph<&'a str, (), Directed>, node: NodeIndex) -> Vec<&'a str> {
    let mut successors: Vec<NodeIndex> = graph.neighbors(node).collect();
    successors.sort();

    let mut cycle = vec![node];
    for next in successors {
        if let Some(path) = find_path(graph, next, node) {
            // path ends at `node`, which is already the first element
            cycle.extend(&path[..path.len() - 1]);
            break;
        }
    }

    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, n)| **n)
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle.rotate_left(start);
    cycle.push(cycle[0]);
    cycle.into_iter().map(|n| graph[n]).collect()
}

/// Shortest path from `from` to `to`, both included
fn find_path(
    graph: &Graph<&str, (), Directed>,
    from: NodeIndex,
    to: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut parent = HashMap::new();

    queue.push_back(from);
    visited.insert(from);

    while let Some(node) = queue.pop_front() {
        if node == to {
            let mut path = Vec::new();
            let mut current = Some(to);
            while let Some(node_idx) = current {
                path.push(node_idx);
                current = parent.get(&node_idx).copied();
            }
            path.reverse();
            return Some(path);
        }

        let mut neighbors: Vec<NodeIndex> = graph.neighbors(node).collect();
        neighbors.sort();
        for neighbor in neighbors {
            if visited.insert(neighbor) {
                parent.insert(neighbor, node);
                queue.push_back(neighbor);
            }
        }
    }
    None
}
