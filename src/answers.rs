//! Answer collection: typed question schemas and the record they produce.

use crate::{
    constants::{CUSTOM_SENTINEL, CUSTOM_SEPARATOR},
    error::{Error, Result},
    project::{ProjectType, CUSTOM_ENTRIES_PROMPT, PROJECT_TYPE_PROMPT},
    prompt::{MultipleChoiceConfig, PromptProvider, SingleChoiceConfig, TextPromptConfig},
};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    SingleSelect,
    MultiSelect,
}

/// A selectable option: what the user sees and what ends up in the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub value: &'static str,
}

impl Choice {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Answer field the response is stored under
    pub field: &'static str,
    pub kind: QuestionKind,
    pub message: &'static str,
    pub default: Option<&'static str>,
    pub choices: &'static [Choice],
}

impl Question {
    pub const fn text(field: &'static str, message: &'static str) -> Self {
        Self { field, kind: QuestionKind::Text, message, default: None, choices: &[] }
    }

    pub const fn single_select(
        field: &'static str,
        message: &'static str,
        choices: &'static [Choice],
    ) -> Self {
        Self { field, kind: QuestionKind::SingleSelect, message, default: None, choices }
    }

    pub const fn multi_select(
        field: &'static str,
        message: &'static str,
        choices: &'static [Choice],
    ) -> Self {
        Self { field, kind: QuestionKind::MultiSelect, message, default: None, choices }
    }

    /// Default text, or the value preselected for select questions.
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    fn labels(&self) -> Vec<String> {
        self.choices.iter().map(|choice| choice.label.to_string()).collect()
    }

    fn choice_value(&self, index: usize) -> Result<&'static str> {
        self.choices.get(index).map(|choice| choice.value).ok_or_else(|| {
            Error::ValidationError(format!(
                "choice {index} is out of range for '{}'",
                self.field
            ))
        })
    }
}

/// A single collected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            AnswerValue::Text(_) => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::List(value)
    }
}

/// Answers keyed by field name, in the order they were asked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnswerRecord(IndexMap<String, AnswerValue>);

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Drops the `custom` sentinel from `selected` and appends the comma separated entries
/// of `custom_input`, trimmed, with empty entries removed. Duplicates are kept.
pub fn merge_custom_entries(selected: Vec<String>, custom_input: &str) -> Vec<String> {
    selected
        .into_iter()
        .filter(|value| value != CUSTOM_SENTINEL)
        .chain(
            custom_input
                .split(CUSTOM_SEPARATOR)
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string),
        )
        .collect()
}

/// Asks the question schema of a project type through a prompt provider.
pub struct AnswerCollector<'a, P: PromptProvider> {
    provider: &'a P,
}

impl<'a, P: PromptProvider> AnswerCollector<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Asks which kind of project to create.
    pub fn select_project_type(&self) -> Result<ProjectType> {
        let config = SingleChoiceConfig {
            prompt: PROJECT_TYPE_PROMPT.to_string(),
            choices: ProjectType::ALL.iter().map(|t| t.label().to_string()).collect(),
            default_index: Some(0),
        };
        let index = self.provider.prompt_single_choice(&config)?;
        ProjectType::ALL.get(index).copied().ok_or_else(|| {
            Error::ValidationError(format!("project type {index} is out of range"))
        })
    }

    /// Asks every question of the project type's schema in order.
    pub fn collect(&self, project_type: ProjectType) -> Result<AnswerRecord> {
        let mut answers = AnswerRecord::new();
        for question in project_type.questions() {
            let answer = self.ask(question)?;
            log::debug!("Answer for '{}': {answer:?}", question.field);
            answers.insert(question.field, answer);
        }
        Ok(answers)
    }

    fn ask(&self, question: &Question) -> Result<AnswerValue> {
        match question.kind {
            QuestionKind::Text => {
                let config = TextPromptConfig {
                    prompt: question.message.to_string(),
                    default: question.default.map(str::to_string),
                };
                Ok(AnswerValue::Text(self.provider.prompt_text(&config)?))
            }
            QuestionKind::SingleSelect => {
                let default_index = question
                    .default
                    .and_then(|d| question.choices.iter().position(|c| c.value == d));
                let config = SingleChoiceConfig {
                    prompt: question.message.to_string(),
                    choices: question.labels(),
                    default_index,
                };
                let index = self.provider.prompt_single_choice(&config)?;
                Ok(AnswerValue::Text(question.choice_value(index)?.to_string()))
            }
            QuestionKind::MultiSelect => {
                let config = MultipleChoiceConfig {
                    prompt: question.message.to_string(),
                    choices: question.labels(),
                    defaults: question
                        .choices
                        .iter()
                        .map(|c| question.default == Some(c.value))
                        .collect(),
                };
                let mut indices = self.provider.prompt_multiple_choice(&config)?;
                indices.sort_unstable();

                let selected = indices
                    .into_iter()
                    .map(|index| question.choice_value(index).map(str::to_string))
                    .collect::<Result<Vec<_>>>()?;

                if !selected.iter().any(|value| value == CUSTOM_SENTINEL) {
                    return Ok(AnswerValue::List(selected));
                }

                let follow_up = TextPromptConfig {
                    prompt: CUSTOM_ENTRIES_PROMPT.to_string(),
                    default: None,
                };
                let custom_input = self.provider.prompt_text(&follow_up)?;
                Ok(AnswerValue::List(merge_custom_entries(selected, &custom_input)))
            }
        }
    }
}
