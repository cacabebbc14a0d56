use mycli::answers::AnswerValue;
use mycli::commands::init::InitCommand;
use mycli::error::Error;
use mycli::installer::DependencyInstaller;
use mycli::project::{ProjectType, CUSTOM_ENTRIES_PROMPT, PROJECT_TYPE_PROMPT};
use mycli::prompt::AutomaticPrompter;
use mycli::template::TemplateDescriptor;
use std::path::Path;
use tempfile::TempDir;
use test_log::test;

mod utils;
use utils::{assert_same_tree, failing_installer, fixture_settings, EXPECTED, TEMPLATES};

fn material_prompter() -> AutomaticPrompter {
    AutomaticPrompter::new()
        .with_choice_response(PROJECT_TYPE_PROMPT, 0)
        .with_text_response("NPM package name", "@acme/table")
        .with_text_response("Material title", "Table")
        .with_text_response("Describe your material", "Table material")
        .with_multiple_choice_response("Keywords for the material (multi-select)", vec![2, 7])
        .with_text_response(CUSTOM_ENTRIES_PROMPT, "A, B ,,C")
}

#[test]
fn materialize_copies_every_template_file() {
    let descriptor = TemplateDescriptor::new(TEMPLATES);
    for project_type in ProjectType::ALL {
        let target = TempDir::new().unwrap();
        descriptor.materialize(project_type, target.path()).unwrap();
        assert_same_tree(target.path(), &descriptor.source_dir(project_type));
    }
}

#[test]
fn init_scaffolds_material_project() {
    let cwd = TempDir::new().unwrap();
    let settings = fixture_settings(cwd.path());
    let prompter = material_prompter();

    let outcome = InitCommand::new(&settings, &prompter)
        .with_installer(failing_installer())
        .run("my-material", cwd.path())
        .unwrap();

    assert_eq!(outcome.project_type, ProjectType::Material);
    assert_eq!(outcome.target_dir, cwd.path().join("my-material"));
    assert_eq!(outcome.files_copied, 3);
    assert!(outcome.manifest_patched);
    assert_eq!(
        outcome.answers.get("keywords"),
        Some(&AnswerValue::List(vec![
            "表格".to_string(),
            "A".to_string(),
            "B".to_string(),
            "C".to_string()
        ]))
    );
    assert_same_tree(&outcome.target_dir, &Path::new(EXPECTED).join("material"));
}

#[test]
fn failed_install_keeps_generated_files() {
    let cwd = TempDir::new().unwrap();
    let settings = fixture_settings(cwd.path());
    let prompter = material_prompter();

    let outcome = InitCommand::new(&settings, &prompter)
        .with_installer(failing_installer())
        .run("app", cwd.path())
        .unwrap();

    assert!(!outcome.install.succeeded);
    assert_same_tree(&outcome.target_dir, &Path::new(EXPECTED).join("material"));
}

#[cfg(unix)]
#[test]
fn install_runs_inside_the_target_directory() {
    let cwd = TempDir::new().unwrap();
    let settings = fixture_settings(cwd.path());
    let prompter = AutomaticPrompter::new().with_choice_response(PROJECT_TYPE_PROMPT, 3);

    let outcome = InitCommand::new(&settings, &prompter)
        .with_installer(DependencyInstaller::new("true"))
        .run("vue-app", cwd.path())
        .unwrap();

    assert!(outcome.install.succeeded);
    assert_eq!(outcome.project_type, ProjectType::Vue);
    assert!(outcome.target_dir.join("src/main.js").is_file());
}

#[test]
fn existing_target_directory_is_reused() {
    let cwd = TempDir::new().unwrap();
    let target = cwd.path().join("theme-app");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("NOTES.md"), "mine").unwrap();

    let settings = fixture_settings(cwd.path());
    let prompter = AutomaticPrompter::new()
        .with_choice_response(PROJECT_TYPE_PROMPT, 1)
        .with_text_response("NPM package name", "@acme/theme");

    InitCommand::new(&settings, &prompter)
        .with_installer(failing_installer())
        .run("theme-app", cwd.path())
        .unwrap();

    assert_eq!(std::fs::read_to_string(target.join("NOTES.md")).unwrap(), "mine");
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(target.join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["name"], "@acme/theme");
    assert_eq!(manifest["version"], "0.1.0");
    assert!(manifest.get("description").is_none());
}

#[test]
fn missing_template_aborts_before_install() {
    let cwd = TempDir::new().unwrap();
    let mut settings = fixture_settings(cwd.path());
    settings.templates_dir = cwd.path().join("no-templates");
    let prompter = AutomaticPrompter::new().with_choice_response(PROJECT_TYPE_PROMPT, 2);

    let err = InitCommand::new(&settings, &prompter)
        .with_installer(failing_installer())
        .run("admin-app", cwd.path())
        .unwrap_err();

    assert!(matches!(err, Error::UnknownTemplateError { ref project_type, .. } if project_type == "admin"));
}

#[test]
fn broken_manifest_fails_init() {
    let root = TempDir::new().unwrap();
    let template = root.path().join("templates").join("vue");
    std::fs::create_dir_all(&template).unwrap();
    std::fs::write(template.join("package.json"), "{ broken").unwrap();

    let mut settings = fixture_settings(root.path());
    settings.templates_dir = root.path().join("templates");
    let prompter = AutomaticPrompter::new().with_choice_response(PROJECT_TYPE_PROMPT, 3);

    let err = InitCommand::new(&settings, &prompter)
        .with_installer(failing_installer())
        .run("app", root.path())
        .unwrap_err();

    assert!(matches!(err, Error::ManifestParseError { .. }));
    assert_eq!(err.exit_code(), 1);
}
