//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use super::completion::{CompletionEngine, SessionCandidateProvider};
use super::shared_state::SharedState;

/// h5sh completer for reedline
pub struct H5Completer {
    /// Completion engine for intelligent suggestions
    completion_engine: CompletionEngine,
}

impl H5Completer {
    /// Create a new completer backed by the shared session.
    pub fn new(shared_state: SharedState, hide_underscore: bool) -> Self {
        let provider = Arc::new(SessionCandidateProvider::new(shared_state, hide_underscore));
        let completion_engine = CompletionEngine::new(provider);

        Self { completion_engine }
    }
}

impl Completer for H5Completer {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (start, candidates) = self.completion_engine.complete(line, pos);

        candidates
            .into_iter()
            .map(|pair| Suggestion {
                value: pair.replacement,
                description: pair.description,
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Value;
    use crate::tree::node::fixtures::sample_tree;

    fn create_test_completer() -> H5Completer {
        let shared_state = SharedState::new();
        shared_state
            .session
            .write()
            .unwrap()
            .bind("f", Value::Node(sample_tree()));
        H5Completer::new(shared_state, false)
    }

    #[test]
    fn test_complete_items() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("f['", 3);

        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().any(|s| s.value == "item1"));
        assert!(suggestions.iter().any(|s| s.value == "readme"));
    }

    #[test]
    fn test_complete_attributes() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("f['items'].s", 12);

        assert!(suggestions.iter().any(|s| s.value == "shape"));
        assert!(suggestions.iter().any(|s| s.value == "size"));
        assert!(!suggestions.iter().any(|s| s.value == "dtype"));
    }

    #[test]
    fn test_span_position() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("ls f['it", 8);

        for suggestion in suggestions {
            assert_eq!(suggestion.span.start, 6); // Start of "it"
            assert_eq!(suggestion.span.end, 8); // Current cursor position
        }
    }
}
