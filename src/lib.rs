//! flagtree: resolve `argv`-style tokens against a declared tree of commands and flags.
//!
//! Build a tree of [`Command`]s with [`Flag`]s, then call [`Command::resolve`] with the
//! tokens that follow the program name. The first token may select a sub-command; the
//! resolving command matches every remaining token to a flag (`--name` or `-n`),
//! collects the plain tokens after a flag as its arguments and runs the handlers.
//!
//! ```
//! use flagtree::{Command, Flag};
//!
//! let mut cli = Command::new("greet")?
//!     .return_handler_result(true)
//!     .register_flag(Flag::new("loud")?.handler(|_, msg: String| msg.to_uppercase()))?
//!     .register_handler(|selected| {
//!         selected.iter().fold("hello".to_string(), |acc, flag| flag.call(acc))
//!     });
//!
//! let greeting = cli.resolve(&["-l"])?.into_value();
//! assert_eq!(greeting.as_deref(), Some("HELLO"));
//! # Ok::<(), flagtree::DomainError>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    Command, CommandHandler, CommandOutline, DomainError, DomainResult, Flag, FlagHandler,
    HelpStyle, Resolution, HELP_FLAG, LINE_ENDING,
};
