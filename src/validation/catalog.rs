//! Column data-type catalog
//!
//! A data type is accepted when its lower-cased spelling starts with one of the
//! catalog keywords, so parameterized spellings such as `VARCHAR(255)` or
//! `decimal(10,2)` validate against their base keyword without the parameters
//! being parsed. Parameter extraction belongs to the generation engine.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

use super::error::Violation;

/// Family a recognized data type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFamily {
    Integer,
    Numeric,
    String,
    Temporal,
    Boolean,
    Structured,
    Enumerated,
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeFamily::Integer => "integer",
            TypeFamily::Numeric => "numeric",
            TypeFamily::String => "string",
            TypeFamily::Temporal => "temporal",
            TypeFamily::Boolean => "boolean",
            TypeFamily::Structured => "structured",
            TypeFamily::Enumerated => "enumerated",
        };
        f.write_str(name)
    }
}

/// Version tag of the built-in keyword table
pub const STANDARD_CATALOG_VERSION: &str = "1";

/// Built-in keyword table
pub const STANDARD_TYPES: &[(&str, TypeFamily)] = &[
    ("int", TypeFamily::Integer),
    ("bigint", TypeFamily::Integer),
    ("smallint", TypeFamily::Integer),
    ("tinyint", TypeFamily::Integer),
    ("decimal", TypeFamily::Numeric),
    ("float", TypeFamily::Numeric),
    ("double", TypeFamily::Numeric),
    ("varchar", TypeFamily::String),
    ("text", TypeFamily::String),
    ("char", TypeFamily::String),
    ("date", TypeFamily::Temporal),
    ("datetime", TypeFamily::Temporal),
    ("timestamp", TypeFamily::Temporal),
    ("boolean", TypeFamily::Boolean),
    ("bit", TypeFamily::Boolean),
    ("json", TypeFamily::Structured),
    ("jsonb", TypeFamily::Structured),
    ("enum", TypeFamily::Enumerated),
];

static STANDARD: Lazy<TypeCatalog> =
    Lazy::new(|| TypeCatalog::new(STANDARD_CATALOG_VERSION, STANDARD_TYPES.iter().copied()));

/// One recognized base keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub keyword: String,
    pub family: TypeFamily,
}

/// Read-only table of recognized data-type keywords
///
/// The standard catalog is a process-wide static; validators take a reference
/// so tests (or a future document format) can supply an alternate catalog.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    version: String,
    // longest keyword first, so the most specific family wins
    entries: Vec<TypeEntry>,
}

impl TypeCatalog {
    /// Build a catalog from `(keyword, family)` pairs. Keywords are lower-cased.
    pub fn new<K, I>(version: impl Into<String>, entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, TypeFamily)>,
    {
        let mut entries: Vec<TypeEntry> = entries
            .into_iter()
            .map(|(keyword, family)| TypeEntry {
                keyword: keyword.as_ref().to_lowercase(),
                family,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.keyword
                .len()
                .cmp(&a.keyword.len())
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        entries.dedup_by(|a, b| a.keyword == b.keyword);
        Self {
            version: version.into(),
            entries,
        }
    }

    /// The built-in catalog
    pub fn standard() -> &'static TypeCatalog {
        &STANDARD
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    /// Family of `data_type`, or `None` if no keyword is a prefix of it
    pub fn family_of(&self, data_type: &str) -> Option<TypeFamily> {
        let normalized = data_type.to_lowercase();
        self.entries
            .iter()
            .find(|entry| normalized.starts_with(entry.keyword.as_str()))
            .map(|entry| entry.family)
    }

    pub fn is_recognized(&self, data_type: &str) -> bool {
        self.family_of(data_type).is_some()
    }

    /// Validate a data-type spelling, echoing it back on failure
    pub fn validate_type(&self, data_type: &str) -> Result<TypeFamily, Violation> {
        self.family_of(data_type)
            .ok_or_else(|| Violation::UnknownDataType(data_type.to_string()))
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        TypeCatalog::standard().clone()
    }
}

/// Validate a data-type spelling against the standard catalog
pub fn validate_type(data_type: &str) -> Result<TypeFamily, Violation> {
    TypeCatalog::standard().validate_type(data_type)
}
