//! CLI module for the datagen-schema binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
