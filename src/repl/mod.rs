//! REPL (Read-Eval-Print Loop) engine for h5sh
//!
//! Interactive shell interface with:
//! - Line editing with reedline
//! - Command history with optional persistence
//! - FSM-driven tab completion for commands, variables, items, and members
//! - Syntax highlighting and history hints
//! - A prompt that tracks the open files

mod completer;
pub mod completion;
mod engine;
mod highlighter;
mod hinter;
mod prompt;
mod shared_state;
mod validator;

pub use completer::H5Completer;
pub use engine::ReplEngine;
pub use highlighter::SyntaxHighlighter;
pub use hinter::H5Hinter;
pub use prompt::H5Prompt;
pub use shared_state::SharedState;
pub use validator::H5Validator;
