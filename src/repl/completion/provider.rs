//! Candidate provider for completion suggestions
//!
//! Fetches and ranks completion candidates: item paths inside subscripts,
//! attribute and member names, session variables, and command words. All
//! lookups are best effort; anything that fails to resolve simply produces
//! no candidates.

use tracing::trace;

use crate::expr;
use crate::parser::ShowCommand;
use crate::repl::SharedState;
use crate::session::Value;
use crate::tree::path;

/// Trait for providing completion candidates
pub trait CandidateProvider: Send + Sync {
    /// Item paths under `base` matching the partial path typed so far
    fn items(&self, base: &str, partial: &str) -> Vec<String>;

    /// Member and attribute names of `base` matching the prefix
    fn attributes(&self, base: &str, prefix: &str) -> Vec<String>;

    /// Session variable names matching the prefix
    fn variables(&self, prefix: &str) -> Vec<String>;

    /// "show" subcommands matching the prefix
    fn show_subcommands(&self, prefix: &str) -> Vec<String>;

    /// Output format names matching the prefix
    fn format_modes(&self, prefix: &str) -> Vec<String>;

    /// Top-level words: commands plus session variables
    fn commands(&self, prefix: &str) -> Vec<String>;
}

/// Built-in command words offered at the start of a line.
const COMMANDS: &[&str] = &[
    "attrs", "close", "exit", "format", "help", "ls", "open", "quit", "show",
];

/// Session-backed candidate provider
pub struct SessionCandidateProvider {
    /// Shared state for resolving expressions against the live session
    shared_state: SharedState,

    /// Drop `_`-prefixed attribute candidates unless the prefix asks for them
    hide_underscore: bool,
}

impl SessionCandidateProvider {
    pub fn new(shared_state: SharedState, hide_underscore: bool) -> Self {
        Self {
            shared_state,
            hide_underscore,
        }
    }

    /// Resolve a base expression against the session, best effort.
    fn resolve(&self, base: &str) -> Option<Value> {
        let session = self
            .shared_state
            .session
            .read()
            .unwrap_or_else(|e| e.into_inner());
        match expr::resolve(base, &session) {
            Ok(value) => Some(value),
            Err(e) => {
                trace!(base, error = %e, "base expression did not resolve");
                None
            }
        }
    }
}

impl CandidateProvider for SessionCandidateProvider {
    fn items(&self, base: &str, partial: &str) -> Vec<String> {
        let candidates: Vec<String> = match self.resolve(base) {
            Some(Value::Node(node)) => {
                // The partial splits at the last `/`: everything before it is
                // an already-typed directory, the rest filters that group's
                // keys
                let (dir, _item) = path::split(partial);
                let group = if dir.is_empty() || dir == "/" {
                    node
                } else {
                    match node.get(dir) {
                        Some(child) if child.is_group() => child,
                        _ => return Vec::new(),
                    }
                };
                if !group.is_group() {
                    return Vec::new();
                }

                group
                    .keys()
                    .into_iter()
                    .map(|name| path::join(dir, &name))
                    .collect()
            }
            // Attribute views subscript by key; they are flat, so a partial
            // with a directory part cannot match anything
            Some(Value::Attrs(node)) => {
                let (dir, _item) = path::split(partial);
                if !dir.is_empty() {
                    return Vec::new();
                }
                node.attr_names()
            }
            _ => return Vec::new(),
        };
        filter_by_prefix(&candidates, partial)
    }

    fn attributes(&self, base: &str, prefix: &str) -> Vec<String> {
        let Some(value) = self.resolve(base) else {
            return Vec::new();
        };

        let mut names = expr::member_names(&value);
        if self.hide_underscore && !prefix.starts_with('_') {
            names.retain(|name| !name.starts_with('_'));
        }
        filter_by_prefix(&names, prefix)
    }

    fn variables(&self, prefix: &str) -> Vec<String> {
        let session = self
            .shared_state
            .session
            .read()
            .unwrap_or_else(|e| e.into_inner());
        filter_by_prefix(&session.variable_names(), prefix)
    }

    fn show_subcommands(&self, prefix: &str) -> Vec<String> {
        let subcommands: Vec<String> =
            ShowCommand::names().iter().map(|s| s.to_string()).collect();
        filter_by_prefix(&subcommands, prefix)
    }

    fn format_modes(&self, prefix: &str) -> Vec<String> {
        let modes: Vec<String> = crate::config::OutputFormat::names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        filter_by_prefix(&modes, prefix)
    }

    fn commands(&self, prefix: &str) -> Vec<String> {
        let session = self
            .shared_state
            .session
            .read()
            .unwrap_or_else(|e| e.into_inner());
        let mut words: Vec<String> = COMMANDS.iter().map(|s| s.to_string()).collect();
        words.extend(session.variable_names());
        // A variable may shadow a command word
        words.sort();
        words.dedup();
        filter_by_prefix(&words, prefix)
    }
}

/// Filter a list of strings by prefix and sort intelligently:
/// 1. Exact matches first (only when prefix is not empty)
/// 2. Shorter names before longer (more specific matches)
/// 3. Alphabetically for same length
pub(super) fn filter_by_prefix(items: &[String], prefix: &str) -> Vec<String> {
    let mut filtered: Vec<String> = if prefix.is_empty() {
        items.to_vec()
    } else {
        items
            .iter()
            .filter(|item| item.starts_with(prefix))
            .cloned()
            .collect()
    };

    filtered.sort_by(|a, b| {
        if !prefix.is_empty() {
            let a_exact = a == prefix;
            let b_exact = b == prefix;
            if a_exact && !b_exact {
                return std::cmp::Ordering::Less;
            }
            if !a_exact && b_exact {
                return std::cmp::Ordering::Greater;
            }
        }

        let len_cmp = a.len().cmp(&b.len());
        if len_cmp != std::cmp::Ordering::Equal {
            return len_cmp;
        }

        a.cmp(b)
    });

    filtered
}
