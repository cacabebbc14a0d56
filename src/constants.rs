//! Constants used throughout the mycli application

/// Program name shown in usage and version output
pub const PROGRAM_NAME: &str = "mycli";

/// One-line program description
pub const PROGRAM_DESCRIPTION: &str = "A high-performance front-end CLI";

/// Program version surfaced by `-v` / `--version`
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry file that marks a plugin directory
pub const PLUGIN_ENTRY_FILE: &str = "plugin.yaml";

/// Directory holding plugins, relative to the resource root
pub const PLUGINS_DIR: &str = "plugins";

/// Directory holding one template per project type, relative to the resource root
pub const TEMPLATES_DIR: &str = "templates";

/// Optional settings file inside the resource root
pub const SETTINGS_FILE: &str = "mycli.yaml";

/// Manifest file patched after a template has been copied
pub const MANIFEST_FILENAME: &str = "package.json";

/// Choice value that triggers the free-text follow-up of a multi-select question
pub const CUSTOM_SENTINEL: &str = "custom";

/// Separator for free-text custom entries
pub const CUSTOM_SEPARATOR: char = ',';

/// Environment variables understood by mycli
pub mod env {
    pub const HOME: &str = "MYCLI_HOME";
    pub const PLUGINS_DIR: &str = "MYCLI_PLUGINS_DIR";
    pub const TEMPLATES_DIR: &str = "MYCLI_TEMPLATES_DIR";
    pub const PACKAGE_MANAGER: &str = "MYCLI_PACKAGE_MANAGER";
    pub const LOG: &str = "MYCLI_LOG";
    /// Set for plugin commands, points at the plugin directory
    pub const PLUGIN_DIR: &str = "MYCLI_PLUGIN_DIR";
}

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const USAGE: i32 = 2;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
