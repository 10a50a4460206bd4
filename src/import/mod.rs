//! Import functionality
//!
//! Structural decoding of schema documents. YAML is the primary format; a
//! document whose first non-whitespace character is `{` is decoded as JSON,
//! falling back to YAML when it is a flow-style mapping instead.

pub mod document;

use crate::validation::error::SchemaError;
use tracing::trace;

pub use document::{
    ColumnData, ForeignKeyData, IndexData, MetadataData, RelationshipData, SchemaData, TableData,
    ValidationRuleData,
};

/// Input format of a schema document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Sniff the first non-whitespace byte
    #[default]
    Auto,
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Resolve `Auto` against the document content
    pub fn detect(self, content: &[u8]) -> DocumentFormat {
        match self {
            DocumentFormat::Auto => {
                let first = content.iter().find(|b| !b.is_ascii_whitespace());
                if first == Some(&b'{') {
                    DocumentFormat::Json
                } else {
                    DocumentFormat::Yaml
                }
            }
            other => other,
        }
    }
}

/// Schema document importer - strict structural decoding only
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaImporter {
    format: DocumentFormat,
}

impl SchemaImporter {
    /// Create an importer that detects the document format
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an importer for a fixed document format
    pub fn with_format(format: DocumentFormat) -> Self {
        Self { format }
    }

    /// Decode a document into its unvalidated form
    pub fn parse(&self, content: &[u8]) -> Result<SchemaData, SchemaError> {
        let format = self.format.detect(content);
        trace!(?format, bytes = content.len(), "decoding schema document");
        let data = match (self.format, format) {
            // a flow-style YAML mapping also starts with `{`
            (DocumentFormat::Auto, DocumentFormat::Json) => match serde_json::from_slice(content) {
                Ok(data) => data,
                Err(e) => {
                    trace!(error = %e, "not JSON, decoding as YAML");
                    serde_yaml::from_slice(content)?
                }
            },
            (_, DocumentFormat::Json) => serde_json::from_slice(content)?,
            _ => serde_yaml::from_slice(content)?,
        };
        Ok(data)
    }

    /// Decode a document held in a string
    pub fn parse_str(&self, content: &str) -> Result<SchemaData, SchemaError> {
        self.parse(content.as_bytes())
    }
}
