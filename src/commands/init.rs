//! The `init` command: scaffold a new project from a template.

use crate::{
    answers::{AnswerCollector, AnswerRecord},
    error::Result,
    installer::{DependencyInstaller, InstallResult},
    manifest::patch_manifest,
    output,
    project::ProjectType,
    prompt::{get_prompt_provider, PromptProvider},
    registry::{ArgSpec, CommandSpec},
    settings::Settings,
    template::TemplateDescriptor,
};
use std::path::{Path, PathBuf};

pub const INIT_COMMAND: &str = "init";
pub const PROJECT_NAME_ARG: &str = "projectName";

/// Declares `init <projectName>` backed by a terminal prompt provider.
pub fn spec(settings: Settings) -> CommandSpec {
    CommandSpec::new(INIT_COMMAND, "Initialize a new project")
        .argument(
            ArgSpec::required(PROJECT_NAME_ARG)
                .with_help("Directory to create, relative to the current directory"),
        )
        .handler(move |args| {
            let project_name = args.require(PROJECT_NAME_ARG)?;
            let cwd = std::env::current_dir()?;
            let prompter = get_prompt_provider();
            InitCommand::new(&settings, &prompter).run(project_name, &cwd)?;
            Ok(())
        })
}

/// What a completed `init` produced.
#[derive(Debug, Clone, PartialEq)]
pub struct InitOutcome {
    pub target_dir: PathBuf,
    pub project_type: ProjectType,
    pub answers: AnswerRecord,
    pub files_copied: usize,
    pub manifest_patched: bool,
    pub install: InstallResult,
}

/// Orchestrates answer collection, template copy, manifest patch and install.
pub struct InitCommand<'a, P: PromptProvider> {
    templates: TemplateDescriptor,
    installer: DependencyInstaller,
    prompter: &'a P,
}

impl<'a, P: PromptProvider> InitCommand<'a, P> {
    pub fn new(settings: &Settings, prompter: &'a P) -> Self {
        Self {
            templates: TemplateDescriptor::new(&settings.templates_dir),
            installer: DependencyInstaller::from_settings(settings),
            prompter,
        }
    }

    pub fn with_installer(mut self, installer: DependencyInstaller) -> Self {
        self.installer = installer;
        self
    }

    /// Scaffolds `cwd/<project_name>`.
    pub fn run(&self, project_name: &str, cwd: &Path) -> Result<InitOutcome> {
        let collector = AnswerCollector::new(self.prompter);
        let project_type = collector.select_project_type()?;
        let answers = collector.collect(project_type)?;

        let target_dir = cwd.join(project_name);
        output::info(&format!("Initializing project in: {}", target_dir.display()));

        let (files_copied, manifest_patched) =
            self.materialize(project_type, &target_dir, &answers)?;

        output::info("Installing dependencies, this may take a few minutes...");
        let install = self.installer.install(&target_dir);
        if !install.succeeded {
            output::warning(&format!(
                "Dependency installation failed. Run '{} install' in {} manually.",
                self.installer.program(),
                target_dir.display()
            ));
        }

        output::success("Project initialized. Happy hacking!");
        Ok(InitOutcome {
            target_dir,
            project_type,
            answers,
            files_copied,
            manifest_patched,
            install,
        })
    }

    /// Copies the template and patches the manifest behind a spinner. The spinner is
    /// finished before returning so the installer gets a clean terminal.
    fn materialize(
        &self,
        project_type: ProjectType,
        target_dir: &Path,
        answers: &AnswerRecord,
    ) -> Result<(usize, bool)> {
        let pb = output::spinner("Copying template...");
        let result = self.templates.materialize(project_type, target_dir).and_then(|copied| {
            patch_manifest(target_dir, answers).map(|patched| (copied, patched))
        });

        match result {
            Ok(outcome) => {
                output::spinner_succeed(pb, "Template copied and adapted");
                Ok(outcome)
            }
            Err(e) => {
                pb.finish_and_clear();
                Err(e)
            }
        }
    }
}
