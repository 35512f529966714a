//! Domain-level errors (no I/O beyond writing help text)

use std::io;

use thiserror::Error;

/// Domain errors represent violations while building or resolving a command tree.
/// Every variant is fatal for the operation that raised it.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("flag name must not be empty")]
    EmptyFlagName,

    #[error("command name must not be empty")]
    EmptyCommandName,

    #[error("command {0} has already been defined")]
    DuplicateCommand(String),

    #[error("flag {0} has already been defined")]
    DuplicateFlag(String),

    #[error("invalid flag: {0}")]
    InvalidFlag(String),

    #[error("failed to write help text: {0}")]
    Output(#[from] io::Error),
}

/// Result type for command tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
