/*
Outline of a command hierarchy for terminal display.
Each node shows its name and the short forms of its flags.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::command::Command;

pub trait CommandOutline {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<V> CommandOutline for Command<V> {
    #[instrument(level = "debug", skip_all, fields(command = %self.name()))]
    fn to_tree_string(&self) -> Tree<String> {
        let shorts: Vec<String> = self
            .flags()
            .iter()
            .map(|f| format!("-{}", f.short_name()))
            .collect();
        let label = format!("{} [{}]", self.name(), shorts.join(" "));

        // Recursively construct the children
        let leaves: Vec<_> = self
            .children()
            .values()
            .map(|c| c.to_tree_string())
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}
