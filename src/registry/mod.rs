//! Process-wide command registry and dispatcher.
//!
//! The registry goes through a single lifecycle:
//! `Empty → Populating → Sealed → Done`. Plugins and static commands register while
//! the registry is `Empty`/`Populating`; [`ProgramRegistry::dispatch`] seals it, parses
//! the command line with clap and runs exactly one handler.

pub mod command;

pub use command::{ArgSpec, CommandArgs, CommandSpec, Handler};

use crate::error::{Error, Result};
use clap::{
    error::{ContextKind, ContextValue, ErrorKind},
    Arg, ArgAction, Command,
};
use indexmap::IndexMap;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Argument ids owned by the top-level parser.
const RESERVED_ARGS: &[&str] = &["help", "version", "verbose"];

/// Command names clap claims for itself.
const RESERVED_COMMANDS: &[&str] = &["help"];

/// Registration capability handed to plugins and static command declarations.
pub trait CommandRegistrar {
    fn register(&mut self, spec: CommandSpec) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Empty,
    Populating,
    Sealed,
    Done,
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// The named command handler ran.
    Command(String),
    /// Version was printed; no handler ran.
    Version(String),
    /// Help was printed; no handler ran.
    Help,
}

/// Program metadata plus every dispatchable command, in registration order.
#[derive(Debug)]
pub struct ProgramRegistry {
    name: String,
    version: String,
    description: String,
    commands: IndexMap<String, CommandSpec>,
    state: RegistryState,
}

impl ProgramRegistry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            commands: IndexMap::new(),
            state: RegistryState::Empty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Registered command names in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Adds a command. The first registration of a name wins; later ones fail.
    pub fn register(&mut self, spec: CommandSpec) -> Result<()> {
        match self.state {
            RegistryState::Sealed | RegistryState::Done => {
                return Err(Error::RegistryClosedError { name: spec.name });
            }
            RegistryState::Empty => self.state = RegistryState::Populating,
            RegistryState::Populating => {}
        }

        validate(&spec)?;

        if self.commands.contains_key(&spec.name) {
            return Err(Error::DuplicateCommandError { name: spec.name });
        }

        log::debug!("Registered command '{}'", spec.name);
        self.commands.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Parses `argv` (including the binary name) and runs the matching command.
    pub fn dispatch<I, T>(&mut self, argv: I) -> Result<Dispatched>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if matches!(self.state, RegistryState::Sealed | RegistryState::Done) {
            return Err(Error::AlreadyDispatchedError);
        }
        self.state = RegistryState::Sealed;

        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let matches = match self.build_command().try_get_matches_from(&argv) {
            Ok(matches) => matches,
            Err(err) => {
                self.state = RegistryState::Done;
                return self.handle_parse_error(err, &argv);
            }
        };

        self.state = RegistryState::Done;
        let Some((name, sub_matches)) = matches.subcommand() else {
            // Only flags such as `--verbose` were given.
            self.build_command().print_help()?;
            return Ok(Dispatched::Help);
        };

        let spec = self
            .commands
            .get(name)
            .ok_or_else(|| Error::UnknownCommandError { name: name.to_string() })?;

        let mut args = CommandArgs::new(name);
        for arg in &spec.arguments {
            if let Some(value) = sub_matches.get_one::<String>(&arg.name) {
                args = args.with_value(arg.name.clone(), value.clone());
            }
        }

        log::debug!("Dispatching '{name}' with {args:?}");
        spec.invoke(&args)?;
        Ok(Dispatched::Command(name.to_string()))
    }

    /// Builds the clap command tree mirroring the registered commands.
    pub fn build_command(&self) -> Command {
        let mut command = Command::new(self.name.clone())
            .version(self.version.clone())
            .about(self.description.clone())
            .help_template(HELP_TEMPLATE)
            .disable_version_flag(true)
            .arg_required_else_help(true)
            .arg(
                Arg::new("version")
                    .short('v')
                    .long("version")
                    .action(ArgAction::Version)
                    .help("Print the current version"),
            )
            .arg(
                Arg::new("verbose")
                    .long("verbose")
                    .action(ArgAction::Count)
                    .global(true)
                    .help("Increase logging verbosity (repeatable)"),
            );

        for spec in self.commands.values() {
            let mut subcommand =
                Command::new(spec.name.clone()).about(spec.description.clone());
            for arg_spec in &spec.arguments {
                let mut arg = Arg::new(arg_spec.name.clone())
                    .value_name(arg_spec.name.clone())
                    .required(arg_spec.required)
                    .action(ArgAction::Set);
                if let Some(help) = &arg_spec.help {
                    arg = arg.help(help.clone());
                }
                subcommand = subcommand.arg(arg);
            }
            command = command.subcommand(subcommand);
        }
        command
    }

    fn handle_parse_error(&self, err: clap::Error, argv: &[String]) -> Result<Dispatched> {
        match err.kind() {
            ErrorKind::DisplayVersion => {
                let text = err.render().to_string();
                print!("{text}");
                Ok(Dispatched::Version(text.trim().to_string()))
            }
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print()?;
                Ok(Dispatched::Help)
            }
            ErrorKind::InvalidSubcommand => {
                let name = context_string(&err, ContextKind::InvalidSubcommand)
                    .or_else(|| command_token(argv).map(str::to_string))
                    .unwrap_or_default();
                Err(Error::UnknownCommandError { name })
            }
            // Without any subcommands clap reports a stray command as an unexpected argument.
            ErrorKind::UnknownArgument => match command_token(argv) {
                Some(name) if !self.commands.contains_key(name) => {
                    Err(Error::UnknownCommandError { name: name.to_string() })
                }
                _ => Err(usage_error(&err)),
            },
            ErrorKind::MissingRequiredArgument => {
                let argument = context_string(&err, ContextKind::InvalidArg)
                    .map(|arg| arg.trim_start_matches('<').trim_end_matches('>').to_string())
                    .unwrap_or_default();
                let command = command_token(argv).unwrap_or_default().to_string();
                Err(Error::MissingArgumentError { command, argument })
            }
            _ => Err(usage_error(&err)),
        }
    }
}

impl CommandRegistrar for ProgramRegistry {
    fn register(&mut self, spec: CommandSpec) -> Result<()> {
        ProgramRegistry::register(self, spec)
    }
}

/// Rejects specs that clap could not represent.
fn validate(spec: &CommandSpec) -> Result<()> {
    let invalid = |reason: String| Error::InvalidCommandError {
        name: spec.name.clone(),
        reason,
    };

    if spec.name.is_empty() || spec.name.starts_with('-') || spec.name.contains(char::is_whitespace)
    {
        return Err(invalid("command names must be non-empty words".to_string()));
    }
    if RESERVED_COMMANDS.contains(&spec.name.as_str()) {
        return Err(invalid("the name is reserved".to_string()));
    }

    let mut seen_optional = false;
    for (index, arg) in spec.arguments.iter().enumerate() {
        if arg.name.is_empty() || RESERVED_ARGS.contains(&arg.name.as_str()) {
            return Err(invalid(format!("argument name '{}' is not allowed", arg.name)));
        }
        if spec.arguments[..index].iter().any(|prev| prev.name == arg.name) {
            return Err(invalid(format!("argument '{}' is declared twice", arg.name)));
        }
        if arg.required && seen_optional {
            return Err(invalid(format!(
                "required argument '{}' follows an optional one",
                arg.name
            )));
        }
        seen_optional |= !arg.required;
    }
    Ok(())
}

fn usage_error(err: &clap::Error) -> Error {
    Error::UsageError(err.render().to_string().trim_end().to_string())
}

fn context_string(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind)? {
        ContextValue::String(value) => Some(value.clone()),
        ContextValue::Strings(values) => values.first().cloned(),
        _ => None,
    }
}

/// First token after the binary that is not a flag.
fn command_token(argv: &[String]) -> Option<&str> {
    argv.iter().skip(1).map(String::as_str).find(|token| !token.starts_with('-'))
}
