//! Schema loading functionality
//!
//! Reads one document from a path, a reader or an in-memory buffer, decodes it
//! and runs it through the validator. The path entry point opens the file,
//! delegates to the reader entry point and drops the handle on every exit path.
//!
//! Documents larger than the configured limit are rejected before decoding.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::ValidationConfig;
use crate::import::{SchemaData, SchemaImporter};
use crate::models::Schema;
use crate::validation::{SchemaError, SchemaValidator, TypeCatalog, ValidationReport};

/// Loads and validates schema documents
#[derive(Debug, Clone)]
pub struct SchemaLoader<'a> {
    importer: SchemaImporter,
    validator: SchemaValidator<'a>,
}

impl Default for SchemaLoader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLoader<'static> {
    /// Create a loader with the standard type catalog and default config
    pub fn new() -> Self {
        Self::with_catalog(TypeCatalog::standard())
    }
}

impl<'a> SchemaLoader<'a> {
    /// Create a loader that validates against `catalog`
    pub fn with_catalog(catalog: &'a TypeCatalog) -> Self {
        Self {
            importer: SchemaImporter::new(),
            validator: SchemaValidator::with_catalog(catalog),
        }
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.validator = self.validator.with_config(config);
        self
    }

    /// Override document format detection
    pub fn with_importer(mut self, importer: SchemaImporter) -> Self {
        self.importer = importer;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        self.validator.config()
    }

    /// Load a schema from a file, failing at the first defect
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading schema document");
        let file = File::open(path).map_err(|source| SchemaError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_reader(file)
    }

    /// Load a schema from any reader, failing at the first defect
    ///
    /// The reader is consumed and dropped before this returns.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Schema, SchemaError> {
        let bytes = self.read_limited(reader)?;
        self.load_slice(&bytes)
    }

    pub fn load_str(&self, content: &str) -> Result<Schema, SchemaError> {
        self.load_slice(content.as_bytes())
    }

    /// Load a schema from an in-memory document, failing at the first defect
    pub fn load_slice(&self, bytes: &[u8]) -> Result<Schema, SchemaError> {
        let data = self.decode(bytes)?;
        self.validator.validate(data)
    }

    /// Load a schema from a file, reporting every defect found
    pub fn load_path_all(&self, path: impl AsRef<Path>) -> Result<Schema, ValidationReport> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SchemaError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_reader_all(file)
    }

    pub fn load_reader_all<R: Read>(&self, reader: R) -> Result<Schema, ValidationReport> {
        let bytes = self.read_limited(reader)?;
        self.load_slice_all(&bytes)
    }

    pub fn load_str_all(&self, content: &str) -> Result<Schema, ValidationReport> {
        self.load_slice_all(content.as_bytes())
    }

    /// Decode failures end collection at once; there is no document to walk
    pub fn load_slice_all(&self, bytes: &[u8]) -> Result<Schema, ValidationReport> {
        let data = self.decode(bytes)?;
        self.validator.validate_all(data)
    }

    fn decode(&self, bytes: &[u8]) -> Result<SchemaData, SchemaError> {
        let limit = self.config().max_document_bytes;
        if bytes.len() as u64 > limit {
            return Err(SchemaError::TooLarge { limit });
        }
        let data = self.importer.parse(bytes)?;
        debug!(
            bytes = bytes.len(),
            tables = data.tables.as_ref().map_or(0, Vec::len),
            "decoded schema document"
        );
        Ok(data)
    }

    fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, SchemaError> {
        let limit = self.config().max_document_bytes;
        let mut bytes = Vec::new();
        reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
        if bytes.len() as u64 > limit {
            return Err(SchemaError::TooLarge { limit });
        }
        Ok(bytes)
    }
}

/// Load a schema from a file with the standard catalog and default config
pub fn load_schema_from_path(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    SchemaLoader::new().load_path(path)
}

/// Load a schema from a reader with the standard catalog and default config
pub fn load_schema_from_reader<R: Read>(reader: R) -> Result<Schema, SchemaError> {
    SchemaLoader::new().load_reader(reader)
}

/// Load a schema from a string with the standard catalog and default config
pub fn load_schema_from_str(content: &str) -> Result<Schema, SchemaError> {
    SchemaLoader::new().load_str(content)
}
