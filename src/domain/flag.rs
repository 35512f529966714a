//! Flag declarations and their per-pass argument state

use std::fmt;

use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};

/// Callback attached to a flag.
///
/// Receives the arguments captured for the flag during the current pass and an
/// accumulator value, and returns the new accumulator.
pub type FlagHandler<V> = Box<dyn Fn(&[String], V) -> V>;

/// A declared option with a long and a short form.
pub struct Flag<V = String> {
    name: String,
    short_name: char,
    description: String,
    handler: Option<FlagHandler<V>>,
    arguments: Vec<String>,
}

impl<V> Flag<V> {
    /// Create a flag named `name`; the short name defaults to its first character.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let short_name = name.chars().next().ok_or(DomainError::EmptyFlagName)?;
        Ok(Self {
            name,
            short_name,
            description: String::new(),
            handler: None,
            arguments: Vec::new(),
        })
    }

    pub fn short(mut self, short_name: char) -> Self {
        self.short_name = short_name;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[String], V) -> V + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> char {
        self.short_name
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Arguments captured for this flag, in consumption order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn add_arg(&mut self, arg: impl Into<String>) {
        let arg = arg.into();
        trace!(flag = %self.name, %arg, "captured argument");
        self.arguments.push(arg);
    }

    pub fn clear_args(&mut self) {
        self.arguments.clear();
    }

    /// Run the handler against `input`. Without a handler `input` passes through unchanged.
    pub fn call(&self, input: V) -> V {
        match &self.handler {
            Some(handler) => handler(&self.arguments, input),
            None => input,
        }
    }

    /// `-s --name`, the form shown in help listings.
    pub fn usage(&self) -> String {
        format!("-{} --{}", self.short_name, self.name)
    }
}

impl<V> fmt::Debug for Flag<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("description", &self.description)
            .field("handler", &self.handler.is_some())
            .field("arguments", &self.arguments)
            .finish()
    }
}

impl<V> fmt::Display for Flag<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.name)
    }
}
