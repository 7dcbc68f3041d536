//! Interactive shell for hierarchical data snapshots
//!
//! This library provides the core functionality for h5sh, an interactive
//! shell for exploring trees of groups, datasets, and attributes loaded
//! from JSON snapshot files.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `executor`: Command execution against the session
//! - `expr`: Expression lexing and resolution
//! - `formatter`: Output formatting and display
//! - `parser`: Command parsing
//! - `repl`: Interactive REPL engine and tab completion
//! - `session`: Open files and variable bindings
//! - `tree`: Tree model and snapshot loading
//!
//! # Example
//!
//! ```no_run
//! use h5sh::session::Session;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session::new();
//!     let root = session.open(Path::new("data.json"), "f")?;
//!     println!("{} top-level items", root.keys().len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod expr;
pub mod formatter;
pub mod parser;
pub mod repl;
pub mod session;
pub mod tree;

// Re-export commonly used types
pub use config::Config;
pub use error::{H5shError, Result};
pub use executor::{ExecutionResult, Executor};
pub use formatter::Formatter;
pub use parser::{Command, Parser};
pub use repl::{ReplEngine, SharedState};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
