//! Generation-order validation
//!
//! The generation order must be a permutation of the table names: no unknown
//! entries, no repeats, no omissions. Whether it respects foreign-key
//! dependencies is not checked; that remains the author's responsibility.

use std::collections::HashSet;

use super::error::{EntityKind, Location, Violation};
use super::report::{Flow, Reporter};
use super::tables::TableIndex;

pub(crate) fn validate_generation_order(
    reporter: &mut Reporter,
    order: &[String],
    index: &TableIndex,
) -> Flow<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(order.len());

    for (i, name) in order.iter().enumerate() {
        let location =
            Location::root().child(EntityKind::GenerationOrder, Some(i), Some(name.as_str()));
        if !index.contains(name) {
            reporter.report(
                &location,
                Violation::UnknownGenerationOrderTable(name.clone()),
            )?;
        } else if !seen.insert(name.as_str()) {
            reporter.report(
                &location,
                Violation::DuplicateGenerationOrderEntry(name.clone()),
            )?;
        }
    }

    let location = Location::root().child(EntityKind::GenerationOrder, None, None);
    for name in index.names() {
        if !seen.contains(name.as_str()) {
            reporter.report(
                &location,
                Violation::MissingFromGenerationOrder(name.clone()),
            )?;
        }
    }
    Ok(())
}
