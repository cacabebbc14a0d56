//! Plugin discovery and registration.
//!
//! A plugin is anything that, handed a [`CommandRegistrar`], registers zero or more
//! commands. On disk, every immediate subdirectory of the plugins root that contains a
//! `plugin.yaml` entry file is loaded as a [`ManifestPlugin`].

pub mod manifest;

pub use manifest::{ManifestPlugin, PluginManifest};

use crate::{
    constants::PLUGIN_ENTRY_FILE,
    error::{Error, Result},
    registry::{CommandRegistrar, CommandSpec},
};
use std::path::{Path, PathBuf};

/// Common interface for all plugins
pub trait Plugin {
    fn name(&self) -> &str;

    /// Registers the plugin's commands.
    fn register(&self, registrar: &mut dyn CommandRegistrar) -> Result<()>;
}

/// Scans a plugins root and registers every plugin found there.
pub struct PluginLoader {
    root: PathBuf,
    reserved: Vec<String>,
}

impl PluginLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf(), reserved: Vec::new() }
    }

    /// Names registered after the plugins. A plugin claiming one of them fails to load.
    pub fn with_reserved<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved = names.into_iter().map(Into::into).collect();
        self
    }

    /// Loads every plugin under the root in directory enumeration order and returns
    /// their names. The first failing plugin aborts loading.
    pub fn load(&self, registrar: &mut dyn CommandRegistrar) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            log::debug!("No plugins directory at {}", self.root.display());
            return Ok(Vec::new());
        }

        let mut loaded = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_dir() {
                log::debug!("Skipping non-directory plugin entry {}", path.display());
                continue;
            }
            if !path.join(PLUGIN_ENTRY_FILE).is_file() {
                log::debug!("Skipping {}: no {PLUGIN_ENTRY_FILE}", path.display());
                continue;
            }

            let plugin = ManifestPlugin::from_dir(&path).map_err(|cause| {
                Error::PluginLoadError {
                    plugin_name: plugin_dir_name(&path),
                    cause: Box::new(cause),
                }
            })?;
            let mut guarded = ReservedNames { inner: &mut *registrar, reserved: &self.reserved };
            Self::install(&plugin, &mut guarded)?;
            loaded.push(plugin.name().to_string());
        }
        Ok(loaded)
    }

    /// Registers a single plugin, attributing any failure to it.
    pub fn install(plugin: &dyn Plugin, registrar: &mut dyn CommandRegistrar) -> Result<()> {
        log::info!("Loading plugin '{}'", plugin.name());
        plugin.register(registrar).map_err(|cause| Error::PluginLoadError {
            plugin_name: plugin.name().to_string(),
            cause: Box::new(cause),
        })
    }
}

/// Rejects registrations of reserved names before they reach the registry.
struct ReservedNames<'a> {
    inner: &'a mut dyn CommandRegistrar,
    reserved: &'a [String],
}

impl CommandRegistrar for ReservedNames<'_> {
    fn register(&mut self, spec: CommandSpec) -> Result<()> {
        if self.reserved.contains(&spec.name) {
            return Err(Error::DuplicateCommandError { name: spec.name });
        }
        self.inner.register(spec)
    }
}

fn plugin_dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
