//! Completion engine - orchestrates the completion flow
//!
//! Ties the completion components together: lexing, FSM, context
//! determination, and candidate fetching. The engine itself never fails; any
//! input that does not call for completion simply yields no candidates.

use std::sync::Arc;

use super::context::CompletionContext;
use super::fsm::CompletionState;
use super::provider::CandidateProvider;
use super::token_stream::TokenStream;

/// Completion pair representing a candidate suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionPair {
    /// Display text for the candidate
    pub display: String,
    /// Replacement text to insert
    pub replacement: String,
    /// Optional description for the candidate
    pub description: Option<String>,
}

/// Main completion engine
pub struct CompletionEngine {
    /// Candidate provider for fetching suggestions
    provider: Arc<dyn CandidateProvider>,
}

impl CompletionEngine {
    pub fn new(provider: Arc<dyn CandidateProvider>) -> Self {
        Self { provider }
    }

    /// Complete the input at the given cursor position.
    ///
    /// Returns the byte position the replacement starts at and the ranked
    /// candidate pairs.
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<CompletionPair>) {
        let pos = pos.min(line.len());

        // 1. Tokenize with cursor awareness
        let stream = TokenStream::new(line, pos);

        // 2. Run FSM on tokens before the cursor
        let state = CompletionState::run(stream.tokens_before_cursor());

        // 3. Convert state to completion context
        let context = state.to_context(&stream);

        // 4. Fetch candidates based on context
        let mut candidates = self.fetch_candidates(&context);

        // 5. If the prefix exactly matches a candidate, drop it from the
        // list so TAB cycles through the remaining options instead of
        // re-inserting the already-typed text
        let prefix = context.prefix();
        if !prefix.is_empty() {
            candidates.retain(|c| c != prefix);
        }

        // 6. The replacement covers exactly the typed prefix
        let start = pos - prefix.len();

        let pairs: Vec<CompletionPair> = candidates
            .into_iter()
            .map(|c| CompletionPair {
                display: c.clone(),
                replacement: c,
                description: None,
            })
            .collect();

        (start, pairs)
    }

    /// Fetch candidates based on completion context
    fn fetch_candidates(&self, context: &CompletionContext) -> Vec<String> {
        match context {
            CompletionContext::Item { base, partial } => self.provider.items(base, partial),
            CompletionContext::Attribute { base, prefix } => {
                self.provider.attributes(base, prefix)
            }
            CompletionContext::Variable { prefix } => self.provider.variables(prefix),
            CompletionContext::ShowSubcommand { prefix } => {
                self.provider.show_subcommands(prefix)
            }
            CompletionContext::FormatMode { prefix } => self.provider.format_modes(prefix),
            CompletionContext::Command { prefix } => self.provider.commands(prefix),
            CompletionContext::None => Vec::new(),
        }
    }
}
