//! Supported project types and the question schema each one asks.

use crate::answers::{Choice, Question, QuestionKind};
use crate::constants::CUSTOM_SENTINEL;
use std::fmt::{self, Display};

/// Prompt used to pick the project type
pub const PROJECT_TYPE_PROMPT: &str = "Select the type of project to create";

/// Prompt used for the free-text follow-up of a `custom` selection
pub const CUSTOM_ENTRIES_PROMPT: &str = "Enter new values (comma separated)";

const DEFAULT_VERSION: &str = "0.1.0";

const MATERIAL_KEYWORDS: &[Choice] = &[
    Choice::new("数据展示", "数据展示"),
    Choice::new("信息展示", "信息展示"),
    Choice::new("表格", "表格"),
    Choice::new("表单", "表单"),
    Choice::new("筛选", "筛选"),
    Choice::new("弹出框", "弹出框"),
    Choice::new("编辑器", "编辑器"),
    Choice::new("[custom input]", CUSTOM_SENTINEL),
];

const MATERIAL_QUESTIONS: &[Question] = &[
    Question::text("npmName", "NPM package name"),
    Question::text("title", "Material title"),
    Question::text("description", "Describe your material"),
    Question::text("version", "NPM package version").with_default(DEFAULT_VERSION),
    Question::multi_select(
        "keywords",
        "Keywords for the material (multi-select)",
        MATERIAL_KEYWORDS,
    ),
];

const THEME_QUESTIONS: &[Question] = &[
    Question::text("npmName", "NPM package name"),
    Question::text("description", "Describe your theme"),
    Question::text("version", "NPM package version").with_default(DEFAULT_VERSION),
];

const ADMIN_QUESTIONS: &[Question] = &[
    Question::text("npmName", "NPM package name"),
    Question::text("description", "Describe your admin application"),
    Question::text("version", "NPM package version").with_default(DEFAULT_VERSION),
];

const VUE_QUESTIONS: &[Question] = &[
    Question::text("npmName", "NPM package name"),
    Question::text("description", "Describe your Vue project"),
    Question::text("version", "NPM package version").with_default(DEFAULT_VERSION),
];

/// The closed set of project types `init` can scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Material,
    Theme,
    Admin,
    Vue,
}

impl ProjectType {
    /// Every project type in the order offered to the user.
    pub const ALL: [ProjectType; 4] =
        [ProjectType::Material, ProjectType::Theme, ProjectType::Admin, ProjectType::Vue];

    /// Identifier, also the template directory name.
    pub fn id(self) -> &'static str {
        match self {
            ProjectType::Material => "material",
            ProjectType::Theme => "theme",
            ProjectType::Admin => "admin",
            ProjectType::Vue => "vue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Material => "Material library",
            ProjectType::Theme => "Theme library",
            ProjectType::Admin => "Admin dashboard template",
            ProjectType::Vue => "Vue project template",
        }
    }

    /// Questions asked, in order, when scaffolding this project type.
    pub fn questions(self) -> &'static [Question] {
        match self {
            ProjectType::Material => MATERIAL_QUESTIONS,
            ProjectType::Theme => THEME_QUESTIONS,
            ProjectType::Admin => ADMIN_QUESTIONS,
            ProjectType::Vue => VUE_QUESTIONS,
        }
    }
}

impl Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
