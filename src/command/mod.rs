//! Command pipeline
//!
//! Raw chat text -> parser -> typed [`Command`] -> [`CommandExecutor`] -> state

pub mod executor;
pub mod parser;
pub mod perturbation;

pub use executor::{CommandExecutor, ExecutionResult};
pub use parser::{parse_line, Command, Request, HELP_TEXT};
pub use perturbation::Perturbation;
