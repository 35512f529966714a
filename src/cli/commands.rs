//! Binary actions: load settings, build the demo tree and resolve the tokens

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::wisher::wisher_tree;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{Command, CommandOutline, Resolution};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    _check_exclusive(cli)?;

    if cli.template {
        output::block(&Settings::template());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    if cli.show_config {
        output::block(&settings.to_toml()?);
        return Ok(());
    }

    let mut tree = wisher_tree(!cli.dry_run)?.help_style(settings.help);
    if cli.outline {
        output::block(&format!("{}\n", tree.to_tree_string()));
        return Ok(());
    }

    _resolve(&mut tree, &cli.tokens)
}

/// The informational switches exit before resolution, so trailing tokens would be ignored.
fn _check_exclusive(cli: &Cli) -> CliResult<()> {
    let informational = cli.template || cli.show_config || cli.outline;
    if informational && !cli.tokens.is_empty() {
        return Err(CliError::Usage(format!(
            "--template, --show-config and --outline take no tokens, got: {}",
            cli.tokens.join(" ")
        )));
    }
    Ok(())
}

#[instrument(skip(tree), fields(command = %tree.name()))]
fn _resolve(tree: &mut Command<String>, tokens: &[String]) -> CliResult<()> {
    match tree.resolve(tokens)? {
        Resolution::Value(greeting) => output::info(&greeting),
        Resolution::Help(text) => output::block(&text),
        Resolution::Command(command) => _report_selection(command),
    }
    Ok(())
}

/// Show what a collect-only pass picked up.
fn _report_selection(command: &Command<String>) {
    let selected = command.selected_flags();
    debug!(command = %command.name(), selected = selected.len(), "collected flags");
    if selected.is_empty() {
        return;
    }
    output::header(&format!("{}: selected flags", command.name()));
    for flag in selected {
        if flag.arguments().is_empty() {
            output::detail(&flag);
        } else {
            output::action(&flag.to_string(), &flag.arguments().join(" "));
        }
    }
}
