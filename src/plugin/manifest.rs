//! Plugins declared by a `plugin.yaml` entry file.
//!
//! Each declared command is registered with a handler that runs an external program,
//! passing the positional values after the configured `exec_args`.

use super::Plugin;
use crate::{
    constants::{env, PLUGIN_ENTRY_FILE},
    error::{Error, Result},
    registry::{ArgSpec, CommandArgs, CommandRegistrar, CommandSpec},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PluginManifest {
    /// Plugin name; defaults to the directory name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandDecl>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommandDecl {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub arguments: Vec<ArgumentDecl>,
    pub exec: String,
    #[serde(default)]
    pub exec_args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ArgumentDecl {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub help: Option<String>,
}

/// A plugin loaded from a directory containing `plugin.yaml`.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    name: String,
    dir: PathBuf,
    manifest: PluginManifest,
}

impl ManifestPlugin {
    /// Reads `<dir>/plugin.yaml`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let entry = dir.join(PLUGIN_ENTRY_FILE);
        let content = std::fs::read_to_string(&entry)?;
        let manifest: PluginManifest = serde_yaml::from_str(&content).map_err(|source| {
            Error::PluginManifestError { path: entry.display().to_string(), source }
        })?;

        let name = manifest.name.clone().unwrap_or_else(|| dir_name(&dir));
        Ok(Self { name, dir, manifest })
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }
}

impl Plugin for ManifestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, registrar: &mut dyn CommandRegistrar) -> Result<()> {
        for decl in &self.manifest.commands {
            let mut spec = CommandSpec::new(decl.name.clone(), decl.description.clone());
            for arg in &decl.arguments {
                let mut arg_spec = if arg.required {
                    ArgSpec::required(arg.name.clone())
                } else {
                    ArgSpec::optional(arg.name.clone())
                };
                if let Some(help) = &arg.help {
                    arg_spec = arg_spec.with_help(help.clone());
                }
                spec = spec.argument(arg_spec);
            }

            let exec = ExternalCommand {
                program: resolve_program(&self.dir, &decl.exec),
                args: decl.exec_args.clone(),
                plugin_dir: self.dir.clone(),
            };
            registrar.register(spec.handler(move |args| exec.run(args)))?;
        }
        Ok(())
    }
}

/// The program behind a plugin command.
#[derive(Debug, Clone)]
struct ExternalCommand {
    program: PathBuf,
    args: Vec<String>,
    plugin_dir: PathBuf,
}

impl ExternalCommand {
    fn run(&self, args: &CommandArgs) -> Result<()> {
        log::debug!(
            "Running plugin command '{}': {} {:?}",
            args.command(),
            self.program.display(),
            self.args
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .args(args.values())
            .env(env::PLUGIN_DIR, &self.plugin_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(Error::PluginCommandError {
                command: args.command().to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// Bare program names are looked up on PATH; relative paths belong to the plugin.
fn resolve_program(plugin_dir: &Path, exec: &str) -> PathBuf {
    let path = Path::new(exec);
    if path.is_relative() && path.components().count() > 1 {
        plugin_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ProgramRegistry;
    use tempfile::TempDir;

    fn write_plugin(root: &Path, name: &str, manifest: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(PLUGIN_ENTRY_FILE), manifest).unwrap();
        dir
    }

    #[test]
    fn name_defaults_to_directory() {
        let root = TempDir::new().unwrap();
        let dir = write_plugin(root.path(), "greeter", "commands: []\n");

        let plugin = ManifestPlugin::from_dir(&dir).unwrap();
        assert_eq!(plugin.name(), "greeter");
        assert!(plugin.manifest().commands.is_empty());
    }

    #[test]
    fn registers_declared_commands_with_arguments() {
        let root = TempDir::new().unwrap();
        let dir = write_plugin(
            root.path(),
            "deploy",
            r#"
name: deployer
commands:
  - name: deploy
    description: Deploy the project
    arguments:
      - name: env
        required: true
        help: Target environment
      - name: tag
    exec: ./bin/deploy.sh
"#,
        );

        let plugin = ManifestPlugin::from_dir(&dir).unwrap();
        let mut registry = ProgramRegistry::new("mycli", "0.0.0", "test");
        plugin.register(&mut registry).unwrap();

        assert_eq!(plugin.name(), "deployer");
        let spec = registry.get("deploy").unwrap();
        assert_eq!(spec.description, "Deploy the project");
        assert_eq!(
            spec.arguments,
            vec![
                ArgSpec::required("env").with_help("Target environment"),
                ArgSpec::optional("tag")
            ]
        );
    }

    #[test]
    fn malformed_manifest_is_reported_with_path() {
        let root = TempDir::new().unwrap();
        let dir = write_plugin(root.path(), "broken", "commands: [ { name: x }\n");

        let err = ManifestPlugin::from_dir(&dir).unwrap_err();
        match err {
            Error::PluginManifestError { path, .. } => assert!(path.ends_with(PLUGIN_ENTRY_FILE)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolves_programs_against_plugin_dir() {
        let dir = Path::new("/plugins/deploy");
        assert_eq!(resolve_program(dir, "sh"), PathBuf::from("sh"));
        assert_eq!(
            resolve_program(dir, "./bin/run.sh"),
            PathBuf::from("/plugins/deploy/./bin/run.sh")
        );
        assert_eq!(resolve_program(dir, "/usr/bin/env"), PathBuf::from("/usr/bin/env"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_plugin_command_reports_status() {
        let root = TempDir::new().unwrap();
        let dir = write_plugin(
            root.path(),
            "flaky",
            r#"
commands:
  - name: flaky
    exec: sh
    exec_args: ["-c", "exit 3"]
"#,
        );

        let plugin = ManifestPlugin::from_dir(&dir).unwrap();
        let mut registry = ProgramRegistry::new("mycli", "0.0.0", "test");
        plugin.register(&mut registry).unwrap();

        let err = registry.dispatch(["mycli", "flaky"]).unwrap_err();
        match err {
            Error::PluginCommandError { command, status } => {
                assert_eq!(command, "flaky");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn plugin_command_receives_positional_values() {
        let root = TempDir::new().unwrap();
        let dir = write_plugin(
            root.path(),
            "check",
            r#"
commands:
  - name: check
    arguments:
      - name: expected
        required: true
    exec: sh
    exec_args: ["-c", "test \"$0\" = ok && test -n \"$MYCLI_PLUGIN_DIR\""]
"#,
        );

        let plugin = ManifestPlugin::from_dir(&dir).unwrap();
        let mut registry = ProgramRegistry::new("mycli", "0.0.0", "test");
        plugin.register(&mut registry).unwrap();

        registry.dispatch(["mycli", "check", "ok"]).unwrap();
    }
}
