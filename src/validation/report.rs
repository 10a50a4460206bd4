//! Error sink shared by the entity validators
//!
//! Every check reports through [`Reporter::report`] and propagates its result
//! with `?`. In fail-fast mode the first report halts the traversal; in
//! collect-all mode it is recorded and the traversal continues, so both modes
//! visit entities in exactly the same order.

use super::error::{Location, SchemaError, Violation};
use tracing::trace;

/// Traversal stopped after a fail-fast report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Halt;

/// Result of one validation step
pub(crate) type Flow<T> = Result<T, Halt>;

/// How the validator reacts to a defect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ValidationMode {
    /// Stop at the first defect
    #[default]
    FailFast,
    /// Record every defect and keep going
    CollectAll,
}

#[derive(Debug)]
pub(crate) struct Reporter {
    mode: ValidationMode,
    errors: Vec<SchemaError>,
}

impl Reporter {
    pub(crate) fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    pub(crate) fn report(&mut self, location: &Location, violation: Violation) -> Flow<()> {
        trace!(%location, %violation, "validation defect");
        self.errors.push(SchemaError::Invalid {
            location: location.clone(),
            violation,
        });
        match self.mode {
            ValidationMode::FailFast => Err(Halt),
            ValidationMode::CollectAll => Ok(()),
        }
    }

    /// Number of defects recorded so far
    pub(crate) fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn into_errors(self) -> Vec<SchemaError> {
        self.errors
    }

    /// Require a non-empty string field, reporting a missing or empty value
    pub(crate) fn required_str(
        &mut self,
        location: &Location,
        field: &'static str,
        value: Option<String>,
    ) -> Flow<Option<String>> {
        match value {
            Some(value) if !value.is_empty() => Ok(Some(value)),
            Some(_) => {
                self.report(location, Violation::EmptyField { field })?;
                Ok(None)
            }
            None => {
                self.report(location, Violation::MissingField { field })?;
                Ok(None)
            }
        }
    }

    /// Require a present, non-empty list
    pub(crate) fn required_list<T>(
        &mut self,
        location: &Location,
        field: &'static str,
        value: Option<Vec<T>>,
    ) -> Flow<Option<Vec<T>>> {
        match value {
            Some(items) if !items.is_empty() => Ok(Some(items)),
            Some(_) => {
                self.report(location, Violation::EmptyField { field })?;
                Ok(None)
            }
            None => {
                self.report(location, Violation::MissingField { field })?;
                Ok(None)
            }
        }
    }
}
