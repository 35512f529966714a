//! CLI-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config { .. } => crate::exitcode::CONFIG,
            CliError::Domain(e) => match e {
                DomainError::InvalidFlag(_) => crate::exitcode::USAGE,
                DomainError::Output(_) => crate::exitcode::IOERR,
                DomainError::EmptyFlagName
                | DomainError::EmptyCommandName
                | DomainError::DuplicateCommand(_)
                | DomainError::DuplicateFlag(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
