use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod utils;
use utils::{PLUGINS, TEMPLATES};

fn mycli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mycli").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("MYCLI_HOME", home.path())
        .env("MYCLI_PLUGINS_DIR", std::fs::canonicalize(PLUGINS).unwrap())
        .env("MYCLI_TEMPLATES_DIR", std::fs::canonicalize(TEMPLATES).unwrap())
        .env_remove("MYCLI_LOG");
    cmd
}

#[test]
fn prints_version() {
    let home = TempDir::new().unwrap();
    for flag in ["-v", "--version"] {
        mycli(&home)
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("mycli {}", env!("CARGO_PKG_VERSION"))));
    }
}

#[test]
fn help_lists_static_and_plugin_commands() {
    let home = TempDir::new().unwrap();
    mycli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init").and(predicate::str::contains("foo")));
}

#[test]
fn flags_without_command_print_help() {
    let home = TempDir::new().unwrap();
    mycli(&home)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"));
}

#[test]
fn missing_project_name_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    mycli(&home)
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("projectName"));
    assert!(std::fs::read_dir(home.path()).unwrap().next().is_none());
}

#[test]
fn unknown_command_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    mycli(&home)
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown command 'deploy'"))
        .stderr(predicate::str::contains("--help"));
}

#[test]
fn broken_plugin_stops_startup() {
    let home = TempDir::new().unwrap();
    let plugins = home.path().join("plugins");
    std::fs::create_dir_all(plugins.join("broken")).unwrap();
    std::fs::write(plugins.join("broken").join("plugin.yaml"), "commands: {").unwrap();

    mycli(&home)
        .env("MYCLI_PLUGINS_DIR", &plugins)
        .arg("--version")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load plugin 'broken'"));
}

#[cfg(unix)]
#[test]
fn runs_plugin_command() {
    let home = TempDir::new().unwrap();
    mycli(&home)
        .args(["foo", "world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"));
}
