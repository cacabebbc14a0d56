//! Runtime settings: where plugins and templates live and which package manager to run.
//!
//! Settings are resolved in three layers, later layers winning:
//! 1. defaults derived from the resource root (`MYCLI_HOME` or the executable's directory)
//! 2. an optional `mycli.yaml` inside the resource root
//! 3. `MYCLI_PLUGINS_DIR`, `MYCLI_TEMPLATES_DIR` and `MYCLI_PACKAGE_MANAGER`

use crate::{
    constants::{env, PLUGINS_DIR, SETTINGS_FILE, TEMPLATES_DIR},
    error::{Error, Result},
    installer::default_package_manager,
};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Shape of the optional settings file
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    plugins_dir: Option<PathBuf>,
    #[serde(default)]
    templates_dir: Option<PathBuf>,
    #[serde(default)]
    package_manager: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub resource_root: PathBuf,
    pub plugins_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub package_manager: String,
}

impl Settings {
    /// Default settings for a resource root, without consulting files or environment.
    pub fn new<P: AsRef<Path>>(resource_root: P) -> Self {
        let resource_root = resource_root.as_ref().to_path_buf();
        Self {
            plugins_dir: resource_root.join(PLUGINS_DIR),
            templates_dir: resource_root.join(TEMPLATES_DIR),
            package_manager: default_package_manager().to_string(),
            resource_root,
        }
    }

    /// Resolves settings for the running process.
    pub fn load() -> Result<Self> {
        let root = match std::env::var_os(env::HOME) {
            Some(home) => PathBuf::from(home),
            None => executable_dir()?,
        };
        log::debug!("Resource root: {}", root.display());

        let mut settings = Self::new(root);
        settings.apply_file()?;
        settings.apply_env(|key| std::env::var_os(key));
        Ok(settings)
    }

    /// Overlays `mycli.yaml` from the resource root when it exists.
    pub fn apply_file(&mut self) -> Result<()> {
        let path = self.resource_root.join(SETTINGS_FILE);
        if !path.is_file() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&path)?;
        let file: SettingsFile = serde_yaml::from_str(&content).map_err(|source| {
            Error::SettingsParseError { path: path.display().to_string(), source }
        })?;

        if let Some(dir) = file.plugins_dir {
            self.plugins_dir = self.resource_root.join(dir);
        }
        if let Some(dir) = file.templates_dir {
            self.templates_dir = self.resource_root.join(dir);
        }
        if let Some(program) = file.package_manager {
            self.package_manager = program;
        }
        Ok(())
    }

    /// Overlays environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(dir) = lookup(env::PLUGINS_DIR) {
            self.plugins_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(env::TEMPLATES_DIR) {
            self.templates_dir = PathBuf::from(dir);
        }
        if let Some(program) = lookup(env::PACKAGE_MANAGER) {
            self.package_manager = program.to_string_lossy().into_owned();
        }
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}
