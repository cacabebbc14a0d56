//! Pure interfaces for prompting without external dependencies
//!
//! This module defines abstract interfaces for the kinds of questions the answer
//! collector asks. They are independent of any specific UI library implementation.

use crate::error::Result;

/// Configuration for text input prompts
#[derive(Debug, Clone)]
pub struct TextPromptConfig {
    pub prompt: String,
    pub default: Option<String>,
}

/// Configuration for single choice selection
#[derive(Debug, Clone)]
pub struct SingleChoiceConfig {
    pub prompt: String,
    pub choices: Vec<String>,
    pub default_index: Option<usize>,
}

/// Configuration for multiple choice selection
#[derive(Debug, Clone)]
pub struct MultipleChoiceConfig {
    pub prompt: String,
    pub choices: Vec<String>,
    pub defaults: Vec<bool>,
}

/// Abstract interface for text input prompts
pub trait TextPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<String>;
}

/// Abstract interface for single choice selection
pub trait SingleChoicePrompter {
    fn prompt_single_choice(&self, config: &SingleChoiceConfig) -> Result<usize>;
}

/// Abstract interface for multiple choice selection
pub trait MultipleChoicePrompter {
    /// Returns the selected indices in ascending order.
    fn prompt_multiple_choice(&self, config: &MultipleChoiceConfig)
        -> Result<Vec<usize>>;
}

/// Combined interface that provides all prompt types
pub trait PromptProvider: TextPrompter + SingleChoicePrompter + MultipleChoicePrompter {}

// Blanket implementation for any type that implements all prompt interfaces
impl<T> PromptProvider for T where T: TextPrompter + SingleChoicePrompter + MultipleChoicePrompter
{}
