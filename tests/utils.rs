#![allow(dead_code)]

use mycli::installer::DependencyInstaller;
use mycli::settings::Settings;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const TEMPLATES: &str = "tests/fixtures/templates";
pub const EXPECTED: &str = "tests/fixtures/expected";
pub const PLUGINS: &str = "tests/fixtures/plugins";

/// Settings pointing at the fixture templates and plugins.
pub fn fixture_settings(resource_root: &Path) -> Settings {
    let mut settings = Settings::new(resource_root);
    settings.templates_dir = PathBuf::from(TEMPLATES);
    settings.plugins_dir = PathBuf::from(PLUGINS);
    settings
}

/// An installer whose executable cannot be found, so installs always fail.
pub fn failing_installer() -> DependencyInstaller {
    DependencyInstaller::new("mycli-test-missing-package-manager")
}

fn relative_files(dir: &Path) -> HashSet<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect()
}

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files1 = relative_files(dir1);
    let files2 = relative_files(dir2);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);

    for file in files1.difference(&files2) {
        println!("  + {:?}", file);
    }
    for file in files2.difference(&files1) {
        println!("  - {:?}", file);
    }

    for file in files1.intersection(&files2) {
        let content1 = fs::read(dir1.join(file)).unwrap();
        let content2 = fs::read(dir2.join(file)).unwrap();
        if content1 != content2 {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{}", String::from_utf8_lossy(&content1));
            println!("  --- Expected content:\n{}", String::from_utf8_lossy(&content2));
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directory trees hold the same files with the same contents.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    let different = dir_diff::is_different(actual, expected).unwrap();
    if different {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}
