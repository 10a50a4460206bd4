//! Types command implementation

use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_types_json, format_types_text};
use crate::validation::TypeCatalog;

/// Arguments of `datagen-schema types`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TypesArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// Print the standard type catalog
pub fn handle_types(args: &TypesArgs) -> Result<(), CliError> {
    let catalog = TypeCatalog::standard();
    match args.output {
        OutputFormat::Text => print!("{}", format_types_text(catalog)),
        OutputFormat::Json => println!("{}", format_types_json(catalog)?),
    }
    Ok(())
}
