//! Domain layer: the command tree and its resolution algorithm
//!
//! This layer is independent of external concerns (no process arguments, no config loading).

pub mod command;
pub mod error;
pub mod flag;
pub mod help;
pub mod lookup;
pub mod outline;

pub use command::{Command, CommandHandler, Resolution, HELP_FLAG};
pub use error::{DomainError, DomainResult};
pub use flag::{Flag, FlagHandler};
pub use help::{HelpStyle, LINE_ENDING};
pub use outline::CommandOutline;
