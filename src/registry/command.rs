use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// Function invoked when a command is dispatched.
pub type Handler = Box<dyn Fn(&CommandArgs) -> Result<()>>;

/// A positional argument accepted by a command.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgSpec {
    pub name: String,
    pub required: bool,
    pub help: Option<String>,
}

impl ArgSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(), required: true, help: None }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self { name: name.into(), required: false, help: None }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// A dispatchable command: its name, description, positional arguments and handler.
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub arguments: Vec<ArgSpec>,
    pub(crate) handler: Handler,
}

impl CommandSpec {
    /// Creates a command without arguments whose handler does nothing.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments: Vec::new(),
            handler: Box::new(|_| Ok(())),
        }
    }

    pub fn argument(mut self, arg: ArgSpec) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&CommandArgs) -> Result<()> + 'static,
    {
        self.handler = Box::new(handler);
        self
    }

    pub(crate) fn invoke(&self, args: &CommandArgs) -> Result<()> {
        (self.handler)(args)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Positional values supplied for a dispatched command, keyed by argument name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    command: String,
    values: IndexMap<String, String>,
}

impl CommandArgs {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), values: IndexMap::new() }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Like [`CommandArgs::get`] but fails when the argument was not supplied.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| Error::MissingArgumentError {
            command: self.command.clone(),
            argument: name.to_string(),
        })
    }

    /// Supplied values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.values().map(String::as_str)
    }
}
