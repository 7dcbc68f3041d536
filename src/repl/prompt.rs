//! Custom prompt implementation for h5sh

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Custom prompt for the h5sh REPL
pub struct H5Prompt {
    /// Label shown before the `>`; tracks the open file, if any
    label: String,
}

impl H5Prompt {
    pub fn new(label: String) -> Self {
        Self { label }
    }

    /// Build the prompt label from the open-file variables.
    pub fn label_for(variables: &[String]) -> String {
        match variables {
            [] => "h5sh".to_string(),
            [only] => format!("h5sh:{only}"),
            many => format!("h5sh({})", many.len()),
        }
    }
}

impl Prompt for H5Prompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("{}> ", self.label).into()
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_files() {
        let prompt = H5Prompt::new(H5Prompt::label_for(&[]));
        assert_eq!(prompt.render_prompt_left(), "h5sh> ");
    }

    #[test]
    fn test_prompt_with_single_file() {
        let prompt = H5Prompt::new(H5Prompt::label_for(&["run42".to_string()]));
        assert_eq!(prompt.render_prompt_left(), "h5sh:run42> ");
    }

    #[test]
    fn test_prompt_with_many_files() {
        let vars = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let prompt = H5Prompt::new(H5Prompt::label_for(&vars));
        assert_eq!(prompt.render_prompt_left(), "h5sh(3)> ");
    }

    #[test]
    fn test_right_prompt_empty() {
        let prompt = H5Prompt::new("h5sh".to_string());
        assert_eq!(prompt.render_prompt_right(), "");
    }
}
