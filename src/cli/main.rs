//! datagen-schema CLI entry point

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use datagen_schema::cli::commands::{TypesArgs, ValidateArgs, handle_types, handle_validate};

/// Load and validate declarative schemas for synthetic data generation
#[derive(Parser, Debug)]
#[command(name = "datagen-schema", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a schema document
    Validate(ValidateArgs),
    /// List the recognized data types
    Types(TypesArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Validate(args) => handle_validate(&args)?,
        Commands::Types(args) => handle_types(&args)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // already positioned; print as-is
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
