//! Command nodes: registration, resolution and handler dispatch

use std::fmt;
use std::io::{self, Write};

use indexmap::IndexMap;
use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::flag::Flag;
use crate::domain::help::{self, HelpStyle};
use crate::domain::lookup;

/// Name of the flag every command registers at construction.
pub const HELP_FLAG: &str = "help";

/// Node-level callback, invoked with the selected flags (most recently matched first).
pub type CommandHandler<V> = Box<dyn Fn(&[&Flag<V>]) -> V>;

/// Outcome of a resolution pass.
#[derive(Debug)]
pub enum Resolution<'a, V> {
    /// The node that consumed the flags, after dispatch ran (or was skipped)
    Command(&'a Command<V>),
    /// The node handler's return value (return mode only)
    Value(V),
    /// Rendered help of the resolving node (return mode with execution disabled)
    Help(String),
}

impl<'a, V> Resolution<'a, V> {
    pub fn command(&self) -> Option<&'a Command<V>> {
        match self {
            Resolution::Command(command) => Some(*command),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Resolution::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn help(&self) -> Option<&str> {
        match self {
            Resolution::Help(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// A named point in the command tree.
///
/// Owns its flags and its children. A resolution pass mutates the selected flags and
/// the flags' captured arguments in place; call [`Command::reset`] before reusing a
/// tree for an independent pass.
pub struct Command<V = String> {
    name: String,
    description: String,
    flags: Vec<Flag<V>>,
    children: IndexMap<String, Command<V>>,
    /// indices into `flags`, most recent first
    selected: Vec<usize>,
    handler: Option<CommandHandler<V>>,
    returns_handler_result: bool,
    executes_handlers: bool,
    help_style: HelpStyle,
}

impl<V> Command<V> {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyCommandName);
        }
        let help = Flag::new(HELP_FLAG)?
            .short('h')
            .description("Show this help text");
        Ok(Self {
            name,
            description: String::new(),
            flags: vec![help],
            children: IndexMap::new(),
            selected: Vec::new(),
            handler: None,
            returns_handler_result: false,
            executes_handlers: true,
            help_style: HelpStyle::default(),
        })
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Return the node handler's value from `resolve` instead of the node itself.
    pub fn return_handler_result(mut self, enabled: bool) -> Self {
        self.returns_handler_result = enabled;
        self
    }

    /// Run handlers during resolution; when disabled flags are only collected.
    pub fn execute_handlers(mut self, enabled: bool) -> Self {
        self.executes_handlers = enabled;
        self
    }

    pub fn help_style(mut self, style: HelpStyle) -> Self {
        self.help_style = style;
        self
    }

    pub fn register_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[&Flag<V>]) -> V + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    #[instrument(level = "trace", skip_all, fields(command = %self.name, flag = %flag.name()))]
    pub fn register_flag(mut self, flag: Flag<V>) -> DomainResult<Self> {
        if self.flags.iter().any(|f| f.name() == flag.name()) {
            return Err(DomainError::DuplicateFlag(flag.name().to_string()));
        }
        if let Some(earlier) = self
            .flags
            .iter()
            .find(|f| f.short_name() == flag.short_name())
        {
            warn!(
                "-{} already resolves to {}, {} is only reachable in long form",
                flag.short_name(),
                earlier,
                flag
            );
        }
        self.flags.push(flag);
        Ok(self)
    }

    #[instrument(level = "trace", skip_all, fields(command = %self.name, child = %command.name))]
    pub fn register_command(mut self, command: Command<V>) -> DomainResult<Self> {
        if self.children.contains_key(&command.name) {
            return Err(DomainError::DuplicateCommand(command.name));
        }
        self.children.insert(command.name.clone(), command);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn returns_handler_result(&self) -> bool {
        self.returns_handler_result
    }

    pub fn executes_handlers(&self) -> bool {
        self.executes_handlers
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub fn get_help_style(&self) -> &HelpStyle {
        &self.help_style
    }

    pub fn flags(&self) -> &[Flag<V>] {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&Flag<V>> {
        self.flags.iter().find(|f| f.name() == name)
    }

    pub fn children(&self) -> &IndexMap<String, Command<V>> {
        &self.children
    }

    pub fn find_command(&self, name: &str) -> Option<&Command<V>> {
        self.children.get(name)
    }

    pub fn find_flag(&self, token: &str) -> Option<&Flag<V>> {
        lookup::find_flag(token, &self.flags)
    }

    pub fn find_short_flag(&self, token: &str) -> Option<&Flag<V>> {
        lookup::find_short_flag(token, &self.flags)
    }

    /// Flags matched during the current pass, most recently matched first.
    pub fn selected_flags(&self) -> Vec<&Flag<V>> {
        self.selected.iter().map(|&idx| &self.flags[idx]).collect()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected
            .iter()
            .any(|&idx| self.flags[idx].name() == name)
    }

    /// Clear selected flags and captured arguments in this node and all descendants.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.flags.iter_mut().for_each(Flag::clear_args);
        self.children.values_mut().for_each(Command::reset);
    }

    pub fn render_help(&self) -> String {
        help::render(self, &self.help_style)
    }

    /// Resolve `tokens` against this tree, printing help (if any) to stdout.
    pub fn resolve<S: AsRef<str>>(&mut self, tokens: &[S]) -> DomainResult<Resolution<'_, V>>
    where
        V: Default,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.resolve_to(tokens, &mut out)
    }

    /// Resolve `tokens` against this tree, writing printed help to `out`.
    ///
    /// The first token selects a child command if one with that exact name exists;
    /// the child then resolves the remaining tokens. Otherwise every token must be a
    /// declared flag, followed by any number of arguments not starting with `-`.
    ///
    /// Help printed or returned anywhere on the path uses the help style of `self`;
    /// a child's own style only applies to its [`Command::render_help`].
    pub fn resolve_to<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        out: &mut dyn Write,
    ) -> DomainResult<Resolution<'_, V>>
    where
        V: Default,
    {
        let style = self.help_style.clone();
        self.resolve_pass(tokens, false, &style, out)
    }

    #[instrument(level = "debug", skip_all, fields(command = %self.name, tokens = tokens.len()))]
    fn resolve_pass<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        inherited_return: bool,
        style: &HelpStyle,
        out: &mut dyn Write,
    ) -> DomainResult<Resolution<'_, V>>
    where
        V: Default,
    {
        // return mode, once set on the path, sticks for all descendants
        if inherited_return {
            self.returns_handler_result = true;
        }

        if let Some(idx) = tokens
            .first()
            .and_then(|token| self.children.get_index_of(token.as_ref()))
        {
            let returns = self.returns_handler_result;
            let child = &mut self.children[idx];
            debug!(child = %child.name, "delegating to subcommand");
            return child.resolve_pass(&tokens[1..], returns, style, out);
        }

        self.select_flags(tokens)?;
        self.dispatch(style, out)
    }

    fn select_flags<S: AsRef<str>>(&mut self, tokens: &[S]) -> DomainResult<()> {
        let mut pos = 0;
        while pos < tokens.len() {
            let token = tokens[pos].as_ref();
            let idx = lookup::find_flag_index(token, &self.flags)
                .ok_or_else(|| DomainError::InvalidFlag(token.to_string()))?;
            debug!(flag = %self.flags[idx], %token, "matched flag");
            pos += 1;

            while let Some(arg) = tokens.get(pos).map(|t| t.as_ref()) {
                if lookup::is_flag_shaped(arg) {
                    break;
                }
                self.flags[idx].add_arg(arg);
                pos += 1;
            }

            self.selected.insert(0, idx);
        }
        Ok(())
    }

    fn dispatch(&mut self, style: &HelpStyle, out: &mut dyn Write) -> DomainResult<Resolution<'_, V>>
    where
        V: Default,
    {
        if self.executes_handlers {
            let selected = self.selected_flags();
            match &self.handler {
                Some(handler) => {
                    debug!(selected = selected.len(), "running command handler");
                    let value = handler(&selected);
                    if self.returns_handler_result {
                        return Ok(Resolution::Value(value));
                    }
                }
                None => {
                    for flag in selected.iter().filter(|f| f.has_handler()) {
                        debug!(flag = %flag, "running flag handler");
                        flag.call(V::default());
                    }
                }
            }
        } else if self.is_selected(HELP_FLAG) {
            let text = help::render(self, style);
            if self.returns_handler_result {
                return Ok(Resolution::Help(text));
            }
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Ok(Resolution::Command(self))
    }
}

impl<V> fmt::Debug for Command<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("flags", &self.flags)
            .field("children", &self.children)
            .field("selected", &self.selected)
            .field("handler", &self.handler.is_some())
            .field("returns_handler_result", &self.returns_handler_result)
            .field("executes_handlers", &self.executes_handlers)
            .finish()
    }
}
