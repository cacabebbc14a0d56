//! Prompt provider that answers from a script instead of a terminal.
//!
//! Useful for automation, testing, or CI/CD environments. Responses are keyed by the
//! exact prompt text; unscripted prompts fall back to the prompt's own default.

use super::interface::*;
use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct AutomaticPrompter {
    text_responses: HashMap<String, String>,
    choice_responses: HashMap<String, usize>,
    multiple_choice_responses: HashMap<String, Vec<usize>>,
    asked: RefCell<Vec<String>>,
}

impl AutomaticPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined text response for a specific prompt
    pub fn with_text_response(mut self, prompt: &str, response: &str) -> Self {
        self.text_responses.insert(prompt.to_string(), response.to_string());
        self
    }

    /// Add a predefined choice response for a specific prompt
    pub fn with_choice_response(mut self, prompt: &str, choice_index: usize) -> Self {
        self.choice_responses.insert(prompt.to_string(), choice_index);
        self
    }

    /// Add a predefined multiple choice response for a specific prompt
    pub fn with_multiple_choice_response(
        mut self,
        prompt: &str,
        choice_indices: Vec<usize>,
    ) -> Self {
        self.multiple_choice_responses.insert(prompt.to_string(), choice_indices);
        self
    }

    /// Prompts asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn record(&self, prompt: &str) {
        self.asked.borrow_mut().push(prompt.to_string());
    }
}

impl TextPrompter for AutomaticPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<String> {
        self.record(&config.prompt);
        Ok(self
            .text_responses
            .get(&config.prompt)
            .or(config.default.as_ref())
            .cloned()
            .unwrap_or_default())
    }
}

impl SingleChoicePrompter for AutomaticPrompter {
    fn prompt_single_choice(&self, config: &SingleChoiceConfig) -> Result<usize> {
        self.record(&config.prompt);
        Ok(self
            .choice_responses
            .get(&config.prompt)
            .copied()
            .or(config.default_index)
            .unwrap_or(0))
    }
}

impl MultipleChoicePrompter for AutomaticPrompter {
    fn prompt_multiple_choice(
        &self,
        config: &MultipleChoiceConfig,
    ) -> Result<Vec<usize>> {
        self.record(&config.prompt);
        let mut indices = match self.multiple_choice_responses.get(&config.prompt) {
            Some(indices) => indices.clone(),
            None => config
                .defaults
                .iter()
                .enumerate()
                .filter_map(|(index, selected)| selected.then_some(index))
                .collect(),
        };
        indices.sort_unstable();
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_text_wins_over_default() {
        let provider = AutomaticPrompter::new().with_text_response("Name:", "scripted");
        let config =
            TextPromptConfig { prompt: "Name:".to_string(), default: Some("fallback".to_string()) };
        assert_eq!(provider.prompt_text(&config).unwrap(), "scripted");
    }

    #[test]
    fn unscripted_prompts_use_defaults() {
        let provider = AutomaticPrompter::new();

        let text = TextPromptConfig { prompt: "Version".to_string(), default: Some("0.1.0".into()) };
        assert_eq!(provider.prompt_text(&text).unwrap(), "0.1.0");

        let single = SingleChoiceConfig {
            prompt: "Pick".to_string(),
            choices: vec!["A".to_string(), "B".to_string()],
            default_index: Some(1),
        };
        assert_eq!(provider.prompt_single_choice(&single).unwrap(), 1);

        let multiple = MultipleChoiceConfig {
            prompt: "Pick many".to_string(),
            choices: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            defaults: vec![true, false, true],
        };
        assert_eq!(provider.prompt_multiple_choice(&multiple).unwrap(), vec![0, 2]);

        assert_eq!(provider.asked(), vec!["Version", "Pick", "Pick many"]);
    }

    #[test]
    fn multiple_choice_indices_are_sorted() {
        let provider =
            AutomaticPrompter::new().with_multiple_choice_response("Tags", vec![2, 0]);
        let config = MultipleChoiceConfig {
            prompt: "Tags".to_string(),
            choices: vec!["a".into(), "b".into(), "c".into()],
            defaults: vec![false; 3],
        };
        assert_eq!(provider.prompt_multiple_choice(&config).unwrap(), vec![0, 2]);
    }
}
