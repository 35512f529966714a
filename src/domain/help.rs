//! Help text rendering for command nodes

use serde::{Deserialize, Serialize};

use crate::domain::command::Command;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Presentation settings for help listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HelpStyle {
    /// Header line above the flag listing
    pub options_header: String,
    /// Marker placed before each child's block, followed by the parent name
    pub subcommand_prefix: String,
    /// Spaces between the aligned `-s --name` column and the description
    pub column_gap: usize,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            options_header: "Options".into(),
            subcommand_prefix: "Subcommand on".into(),
            column_gap: 2,
        }
    }
}

/// Render the help block of `command` and, recursively, of all its children.
///
/// Only declared state is consulted; flags selected during a pass do not matter.
/// The description line is always emitted, blank when the node has none.
/// The result ends with a line terminator.
pub fn render<V>(command: &Command<V>, style: &HelpStyle) -> String {
    let mut lines = Vec::new();
    collect_lines(command, style, &mut lines);
    let mut text = lines.join(LINE_ENDING);
    text.push_str(LINE_ENDING);
    text
}

fn collect_lines<V>(command: &Command<V>, style: &HelpStyle, lines: &mut Vec<String>) {
    lines.push(command.name().to_string());
    lines.push(command.get_description().to_string());
    lines.push(String::new());
    lines.push(style.options_header.clone());

    let usages: Vec<String> = command.flags().iter().map(|flag| flag.usage()).collect();
    let width = usages.iter().map(|u| u.chars().count()).max().unwrap_or(0);
    for (usage, flag) in usages.iter().zip(command.flags()) {
        let line = format!(
            "{usage:<width$}{gap}{desc}",
            gap = " ".repeat(style.column_gap),
            desc = flag.get_description(),
        );
        lines.push(line.trim_end().to_string());
    }

    for child in command.children().values() {
        lines.push(String::new());
        lines.push(format!("{} {}", style.subcommand_prefix, command.name()));
        collect_lines(child, style, lines);
    }
}
