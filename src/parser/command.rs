//! Command type definitions for h5sh
//!
//! Every line the user enters parses into one of these commands before the
//! executor sees it.

use std::path::PathBuf;

/// Represents a parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a snapshot file, optionally binding it to a named variable
    Open {
        path: PathBuf,
        variable: Option<String>,
    },

    /// Close an open file / drop a variable
    Close { variable: String },

    /// List the children of a group (default: root of the sole open file)
    List {
        expr: Option<String>,
        long: bool,
    },

    /// Show the attributes of a node
    Attrs { expr: String },

    /// Show session state (files, vars, format)
    Show(ShowCommand),

    /// Set the output format
    SetFormat(String),

    /// Bind a variable to the value of an expression
    Assign { variable: String, expr: String },

    /// Evaluate an expression and print its value
    Eval { expr: String },

    /// Help command with optional topic
    Help(Option<String>),

    /// Exit/quit command
    Exit,
}

/// Targets of the `show` command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowCommand {
    /// Open files and the variables they are bound to
    Files,

    /// All session variables with their types
    Vars,

    /// Current output format
    Format,
}

impl ShowCommand {
    /// Subcommand words, in the order completion offers them.
    pub fn names() -> &'static [&'static str] {
        &["files", "format", "vars"]
    }
}
