//! Dependency installation through the host package manager.

use crate::settings::Settings;
use std::path::Path;
use std::process::{Command, Stdio};

/// Package manager executable for the current platform.
pub fn default_package_manager() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallResult {
    pub succeeded: bool,
}

/// Runs `<program> install` in a project directory.
#[derive(Debug, Clone)]
pub struct DependencyInstaller {
    program: String,
    args: Vec<String>,
}

impl DependencyInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: vec!["install".to_string()] }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.package_manager.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Installs dependencies synchronously, handing the terminal to the package manager.
    ///
    /// Never fails: a missing executable or a non-zero exit is logged and reported
    /// through [`InstallResult::succeeded`].
    pub fn install<P: AsRef<Path>>(&self, target_dir: P) -> InstallResult {
        let target_dir = target_dir.as_ref();
        log::debug!(
            "Running '{} {}' in {}",
            self.program,
            self.args.join(" "),
            target_dir.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(target_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        let succeeded = match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                log::warn!("'{} install' exited with {status}", self.program);
                false
            }
            Err(e) => {
                log::warn!("Failed to start '{}': {e}", self.program);
                false
            }
        };
        InstallResult { succeeded }
    }
}
