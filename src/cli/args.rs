//! Process-boundary argument definitions using clap
//!
//! clap only handles the binary's own switches; everything after them is handed to
//! the command tree untouched.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Resolve sub-commands and flags against a demo command tree
#[derive(Parser, Debug)]
#[command(name = "flagtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Debug output on stderr, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Additional config file (layered over the global config)
    #[arg(long, env = "FLAGTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print a config template and exit
    #[arg(long)]
    pub template: bool,

    /// Print the command hierarchy and exit
    #[arg(long)]
    pub outline: bool,

    /// Collect flags without running handlers; prints the selection
    #[arg(long)]
    pub dry_run: bool,

    /// Tokens resolved against the command tree, e.g. `good -v -r`
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "TOKENS"
    )]
    pub tokens: Vec<String>,
}
