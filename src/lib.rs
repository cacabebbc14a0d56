/// Argument pre-scanning, logging setup and the top-level runner.
pub mod cli;

/// Statically declared commands such as `init`.
pub mod commands;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Command registry and dispatcher.
pub mod registry;

/// Plugin discovery and registration.
pub mod plugin;

/// Project types and their question schemas.
pub mod project;

/// Answer collection for a project type.
pub mod answers;

/// User input and interaction handling.
pub mod prompt;

/// Template lookup and copying.
pub mod template;

/// `package.json` patching.
pub mod manifest;

/// Dependency installation via the package manager.
pub mod installer;

/// Runtime settings.
pub mod settings;

/// Environment checks run at startup.
pub mod preflight;

/// Terminal status output and spinners.
pub mod output;
