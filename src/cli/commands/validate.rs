//! Validate command implementation

use std::path::PathBuf;

use tracing::debug;

use crate::cli::error::CliError;
use crate::cli::output::{
    OutputFormat, format_json_failure, format_json_success, format_schema_summary,
};
use crate::config::ValidationConfig;
use crate::model::SchemaLoader;
use crate::models::Schema;
use crate::validation::{SchemaError, ValidationReport};

/// Arguments of `datagen-schema validate`
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Schema document to validate, or `-` to read standard input
    pub input: String,

    /// Report every defect instead of stopping at the first
    #[arg(long)]
    pub all: bool,

    /// TOML file with validation settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Require foreign keys to reference a primary-key or unique column
    #[arg(long)]
    pub check_referenced_columns: bool,

    /// Reject foreign keys that form a cycle between tables
    #[arg(long)]
    pub detect_cycles: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl ValidateArgs {
    /// Settings from `--config`, with command-line switches layered on top
    pub fn resolve_config(&self) -> Result<ValidationConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => ValidationConfig::load(path)?,
            None => ValidationConfig::default(),
        };
        config.check_referenced_columns |= self.check_referenced_columns;
        config.detect_cycles |= self.detect_cycles;
        Ok(config)
    }
}

/// Handle the validate command
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let config = args.resolve_config()?;
    debug!(?config, input = %args.input, all = args.all, "validating schema");
    let loader = SchemaLoader::new().with_config(config);

    let result: Result<Schema, ValidationReport> = match (args.input.as_str(), args.all) {
        ("-", false) => loader
            .load_reader(std::io::stdin().lock())
            .map_err(ValidationReport::from),
        ("-", true) => loader.load_reader_all(std::io::stdin().lock()),
        (path, false) => loader.load_path(path).map_err(ValidationReport::from),
        (path, true) => loader.load_path_all(path),
    };

    match (result, args.output) {
        (Ok(schema), OutputFormat::Text) => {
            print!("{}", format_schema_summary(&schema));
            Ok(())
        }
        (Ok(schema), OutputFormat::Json) => {
            println!("{}", format_json_success(&schema)?);
            Ok(())
        }
        (Err(report), OutputFormat::Json) => {
            println!("{}", format_json_failure(report.errors())?);
            Err(CliError::Rejected(report.len()))
        }
        (Err(report), OutputFormat::Text) if !args.all => {
            Err(first_error(report).map_or(CliError::Rejected(0), CliError::Schema))
        }
        (Err(report), OutputFormat::Text) => Err(CliError::Report(report)),
    }
}

fn first_error(report: ValidationReport) -> Option<SchemaError> {
    report.into_errors().into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(input: &str) -> ValidateArgs {
        ValidateArgs {
            input: input.to_string(),
            all: false,
            config: None,
            check_referenced_columns: false,
            detect_cycles: false,
            output: OutputFormat::Text,
        }
    }

    #[test]
    fn test_flags_layer_over_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "check_referenced_columns = true\nmax_document_bytes = 2048").unwrap();

        let mut args = args("schema.yaml");
        args.config = Some(file.path().to_path_buf());
        args.detect_cycles = true;
        let config = args.resolve_config().unwrap();
        assert!(config.check_referenced_columns);
        assert!(config.detect_cycles);
        assert_eq!(config.max_document_bytes, 2048);
    }

    #[test]
    fn test_invalid_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "detect_cycle = true").unwrap();
        let mut args = args("schema.yaml");
        args.config = Some(file.path().to_path_buf());
        assert!(matches!(args.resolve_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_error_is_passed_through_verbatim() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            include_str!("../../../tests/fixtures/loan_portfolio.yaml")
                .replace("type: bigint", "type: bigserial")
        )
        .unwrap();

        let error = handle_validate(&args(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(
            error.to_string(),
            "table[1] 'loans' > column[0] 'id': unrecognized data type 'bigserial'"
        );
    }

    #[test]
    fn test_valid_file() {
        let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/loan_portfolio.yaml");
        assert!(handle_validate(&args(fixture)).is_ok());
    }
}
