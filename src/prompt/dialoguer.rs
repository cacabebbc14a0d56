//! Dialoguer-based implementations of prompt interfaces
//!
//! This module provides concrete implementations of the prompt interfaces
//! using the dialoguer library for terminal user interaction.

use super::interface::{
    MultipleChoiceConfig, MultipleChoicePrompter, SingleChoiceConfig, SingleChoicePrompter,
    TextPromptConfig, TextPrompter,
};
use crate::error::Result;
use dialoguer::{Input, MultiSelect, Select};

/// Dialoguer-based implementation of all prompt interfaces
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPrompter for DialoguerPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(&config.prompt).allow_empty(true);

        if let Some(default) = &config.default {
            input = input.default(default.clone());
        }

        Ok(input.interact_text()?)
    }
}

impl SingleChoicePrompter for DialoguerPrompter {
    fn prompt_single_choice(&self, config: &SingleChoiceConfig) -> Result<usize> {
        let mut select = Select::new().with_prompt(&config.prompt).items(&config.choices);

        if let Some(default_index) = config.default_index {
            select = select.default(default_index);
        }

        Ok(select.interact()?)
    }
}

impl MultipleChoicePrompter for DialoguerPrompter {
    fn prompt_multiple_choice(
        &self,
        config: &MultipleChoiceConfig,
    ) -> Result<Vec<usize>> {
        let mut indices = MultiSelect::new()
            .with_prompt(&config.prompt)
            .items(&config.choices)
            .defaults(&config.defaults)
            .interact()?;

        indices.sort_unstable();
        Ok(indices)
    }
}
