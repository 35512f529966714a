//! CLI layer: process-boundary argument parsing and the demo command tree

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod wisher;

pub use args::Cli;
pub use error::{CliError, CliResult};
