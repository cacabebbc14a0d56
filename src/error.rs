use std::process::ExitStatus;
use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to read settings file '{path}'. Original error: {source}")]
    SettingsParseError { path: String, source: serde_yaml::Error },

    #[error("Prompt failed: {0}")]
    PromptError(#[from] dialoguer::Error),

    /// Represents answers a prompt provider returned that do not fit the question
    #[error("Validation error: {0}.")]
    ValidationError(String),

    #[error("Preflight check failed: {0}.")]
    PreflightError(String),

    #[error("No template found for project type '{project_type}' (looked in '{template_dir}').")]
    UnknownTemplateError { project_type: String, template_dir: String },

    #[error("Failed to copy template file '{path}'. Original error: {source}")]
    TemplateCopyError { path: String, source: std::io::Error },

    #[error("Failed to parse manifest '{path}': {reason}")]
    ManifestParseError { path: String, reason: String },

    #[error("Failed to read plugin manifest '{path}'. Original error: {source}")]
    PluginManifestError { path: String, source: serde_yaml::Error },

    /// A plugin failed while registering its commands. Startup is aborted.
    #[error("Failed to load plugin '{plugin_name}': {cause}")]
    PluginLoadError { plugin_name: String, cause: Box<Error> },

    #[error("Plugin command '{command}' failed with status: {status}")]
    PluginCommandError { command: String, status: ExitStatus },

    #[error("Invalid command '{name}': {reason}.")]
    InvalidCommandError { name: String, reason: String },

    #[error("Command '{name}' is already registered.")]
    DuplicateCommandError { name: String },

    #[error("Cannot register command '{name}': the command registry is sealed.")]
    RegistryClosedError { name: String },

    #[error("Commands have already been dispatched.")]
    AlreadyDispatchedError,

    #[error("Unknown command '{name}'.")]
    UnknownCommandError { name: String },

    #[error("Missing required argument '{argument}' for command '{command}'.")]
    MissingArgumentError { command: String, argument: String },

    #[error("{0}")]
    UsageError(String),
}

impl Error {
    /// Returns true for failures caused by the command line rather than by the work
    /// a command performed.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::UnknownCommandError { .. }
                | Error::MissingArgumentError { .. }
                | Error::UsageError(_)
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            exit_codes::USAGE
        } else {
            exit_codes::FAILURE
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Usage errors are followed by a hint pointing at `--help`.
pub fn default_error_handler(err: Error) -> ! {
    crate::output::error(&err.to_string());
    if err.is_usage() {
        eprintln!("Run '{} --help' for usage.", crate::constants::PROGRAM_NAME);
    }
    std::process::exit(err.exit_code());
}
