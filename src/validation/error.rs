//! Located validation errors
//!
//! Every semantic failure is a [`Violation`] (what rule was broken) wrapped with a
//! [`Location`] (where in the document it was found). The location never alters
//! the cause: `SchemaError::Invalid` displays as `<location>: <violation>`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Classification of a failure, independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input could not be opened or read
    Io,
    /// The input is not well-formed, or contains a field outside the vocabulary
    Decode,
    /// A required attribute is absent (or an empty string / empty list)
    MissingField,
    /// A present field holds a value outside its allowed domain
    InvalidValue,
    /// Two entities at the same level share a name
    Duplicate,
    /// A foreign key or generation-order entry names something that does not exist
    DanglingReference,
    /// The generation order omits a table, or a table has no primary key
    Incomplete,
    /// Foreign keys form a cycle between tables
    Cycle,
}

/// Kind of entity a location segment points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Table,
    Column,
    ForeignKey,
    Index,
    Metadata,
    Relationship,
    ValidationRule,
    GenerationOrder,
    DatabaseType,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Table => "table",
            EntityKind::Column => "column",
            EntityKind::ForeignKey => "foreign_key",
            EntityKind::Index => "index",
            EntityKind::Metadata => "metadata",
            EntityKind::Relationship => "relationship",
            EntityKind::ValidationRule => "validation_rule",
            EntityKind::GenerationOrder => "generation_order",
            EntityKind::DatabaseType => "database_type",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a location path, e.g. `table[1] 'loans'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: EntityKind,
    pub index: Option<usize>,
    pub name: Option<String>,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(index) = self.index {
            write!(f, "[{}]", index)?;
        }
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => write!(f, " '{}'", name),
            _ => Ok(()),
        }
    }
}

/// Path from the document root to the entity where a problem was found
///
/// An empty path is the schema itself and displays as `schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    segments: Vec<Segment>,
}

impl Location {
    /// The schema root
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Return a new location one level deeper
    pub fn child(&self, kind: EntityKind, index: Option<usize>, name: Option<&str>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment {
            kind,
            index,
            name: name.map(str::to_string),
        });
        Self { segments }
    }

    pub fn table(&self, index: usize, name: Option<&str>) -> Self {
        self.child(EntityKind::Table, Some(index), name)
    }

    pub fn column(&self, index: usize, name: Option<&str>) -> Self {
        self.child(EntityKind::Column, Some(index), name)
    }

    pub fn foreign_key(&self) -> Self {
        self.child(EntityKind::ForeignKey, None, None)
    }

    pub fn index(&self, index: usize, name: Option<&str>) -> Self {
        self.child(EntityKind::Index, Some(index), name)
    }

    /// Name of the innermost table segment, if any
    pub fn table_name(&self) -> Option<&str> {
        self.name_of(EntityKind::Table)
    }

    /// Name of the innermost column segment, if any
    pub fn column_name(&self) -> Option<&str> {
        self.name_of(EntityKind::Column)
    }

    fn name_of(&self, kind: EntityKind) -> Option<&str> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.kind == kind)
            .and_then(|s| s.name.as_deref())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("schema");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// The rule that was broken, without positional context
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("required field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unrecognized data type '{0}'")]
    UnknownDataType(String),

    #[error("auto_increment requires an integer-family data type, found '{data_type}'")]
    AutoIncrementRequiresInteger { data_type: String },

    #[error("invalid {field} action '{value}' (expected one of CASCADE, SET NULL, RESTRICT)")]
    InvalidReferentialAction { field: &'static str, value: String },

    #[error("record_count must be greater than zero, found {0}")]
    NonPositiveRecordCount(i64),

    #[error("table must declare exactly one primary key column, found {0}")]
    PrimaryKeyCount(usize),

    #[error("duplicate {entity} name '{name}'")]
    DuplicateName { entity: EntityKind, name: String },

    #[error("table '{0}' appears more than once in generation_order")]
    DuplicateGenerationOrderEntry(String),

    #[error("foreign key references unknown table '{0}'")]
    UnknownReferencedTable(String),

    #[error("foreign key references unknown column '{column}' in table '{table}'")]
    UnknownReferencedColumn { table: String, column: String },

    #[error("foreign key references column '{column}' in table '{table}', which is neither a primary key nor unique")]
    ReferencedColumnNotUnique { table: String, column: String },

    #[error("generation_order references unknown table '{0}'")]
    UnknownGenerationOrderTable(String),

    #[error("table '{0}' is missing from generation_order")]
    MissingFromGenerationOrder(String),

    #[error("foreign keys form a cycle: {}", .0.join(" -> "))]
    ForeignKeyCycle(Vec<String>),
}

impl Violation {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Violation::MissingField { .. } | Violation::EmptyField { .. } => {
                ErrorKind::MissingField
            }
            Violation::InvalidValue { .. }
            | Violation::UnknownDataType(_)
            | Violation::AutoIncrementRequiresInteger { .. }
            | Violation::InvalidReferentialAction { .. }
            | Violation::NonPositiveRecordCount(_)
            | Violation::ReferencedColumnNotUnique { .. } => ErrorKind::InvalidValue,
            Violation::PrimaryKeyCount(0) => ErrorKind::Incomplete,
            Violation::PrimaryKeyCount(_) => ErrorKind::InvalidValue,
            Violation::DuplicateName { .. } | Violation::DuplicateGenerationOrderEntry(_) => {
                ErrorKind::Duplicate
            }
            Violation::UnknownReferencedTable(_)
            | Violation::UnknownReferencedColumn { .. }
            | Violation::UnknownGenerationOrderTable(_) => ErrorKind::DanglingReference,
            Violation::MissingFromGenerationOrder(_) => ErrorKind::Incomplete,
            Violation::ForeignKeyCycle(_) => ErrorKind::Cycle,
        }
    }
}

/// Error returned by the loader and the validator
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to open schema document '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read schema document: {0}")]
    Read(#[from] std::io::Error),

    #[error("schema document exceeds maximum size of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("failed to decode schema document: {0}")]
    Decode(String),

    #[error("{location}: {violation}")]
    Invalid {
        location: Location,
        violation: Violation,
    },
}

impl SchemaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::Open { .. } | SchemaError::Read(_) => ErrorKind::Io,
            SchemaError::TooLarge { .. } | SchemaError::Decode(_) => ErrorKind::Decode,
            SchemaError::Invalid { violation, .. } => violation.kind(),
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            SchemaError::Invalid { location, .. } => Some(location),
            _ => None,
        }
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            SchemaError::Invalid { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for SchemaError {
    fn from(e: serde_yaml::Error) -> Self {
        SchemaError::Decode(e.to_string())
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Decode(e.to_string())
    }
}

/// Every defect found by a collect-all validation, in traversal order
#[derive(Debug)]
pub struct ValidationReport {
    errors: Vec<SchemaError>,
}

impl ValidationReport {
    pub(crate) fn new(errors: Vec<SchemaError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SchemaError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<SchemaError> for ValidationReport {
    fn from(e: SchemaError) -> Self {
        Self { errors: vec![e] }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
