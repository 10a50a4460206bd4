//! CLI command handlers

pub mod types;
pub mod validate;

pub use types::{TypesArgs, handle_types};
pub use validate::{ValidateArgs, handle_validate};
