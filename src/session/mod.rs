//! Session namespace: the live objects completion resolves against.
//!
//! Every open file and every user binding (`g = f['grp']`) lives here under a
//! variable name. The completion provider and the executor both look names up
//! through this table; neither ever mutates a tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::info;

use crate::error::{H5shError, Result};
use crate::tree::{loader, NodeRef};

/// A value bound to a session variable.
///
/// `Node` is what `open` and subscripting produce; `Attrs` is the view
/// produced by `.attrs`; `Json` covers attribute values and scalar members
/// such as `.shape`.
#[derive(Debug, Clone)]
pub enum Value {
    /// A group or dataset handle.
    Node(NodeRef),

    /// The attribute view of a node (`expr.attrs`).
    Attrs(NodeRef),

    /// A plain JSON value (attribute contents, shapes, key listings).
    Json(JsonValue),
}

impl Value {
    /// Short label used in messages and member-error reporting.
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Node(node) => node.kind_label(),
            Value::Attrs(_) => "attributes",
            Value::Json(_) => "value",
        }
    }
}

/// Record of one open file.
#[derive(Debug, Clone)]
pub struct OpenFile {
    /// Variable the file root is bound to.
    pub variable: String,

    /// Path the snapshot was loaded from.
    pub path: PathBuf,
}

/// Interactive session state: open files and variable bindings.
#[derive(Debug, Default)]
pub struct Session {
    variables: BTreeMap<String, Value>,
    files: Vec<OpenFile>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a snapshot file and bind its root to `variable`.
    ///
    /// Re-binding an existing variable replaces the old value; a previous
    /// file bound to the same variable is dropped from the file list.
    pub fn open(&mut self, path: &Path, variable: &str) -> Result<NodeRef> {
        let root = loader::load_file(path)?;
        self.files.retain(|f| f.variable != variable);
        self.files.push(OpenFile {
            variable: variable.to_string(),
            path: path.to_path_buf(),
        });
        self.variables
            .insert(variable.to_string(), Value::Node(root.clone()));
        info!(variable, file = %path.display(), "opened file");
        Ok(root)
    }

    /// Drop a variable (and its file entry, if it was an open file).
    pub fn close(&mut self, variable: &str) -> Result<()> {
        if self.variables.remove(variable).is_none() {
            return Err(H5shError::Generic(format!(
                "No such variable: {variable}"
            )));
        }
        self.files.retain(|f| f.variable != variable);
        Ok(())
    }

    /// Bind a variable to a value.
    pub fn bind(&mut self, variable: &str, value: Value) {
        self.variables.insert(variable.to_string(), value);
    }

    /// Look up a variable.
    pub fn lookup(&self, variable: &str) -> Option<&Value> {
        self.variables.get(variable)
    }

    /// Variable names in sorted order.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    /// Open files in open order.
    pub fn files(&self) -> &[OpenFile] {
        &self.files
    }

    /// Derive a variable name from a file path: the stem with any characters
    /// that cannot appear in an identifier replaced by `_`.
    pub fn variable_for_path(path: &Path) -> String {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("file");
        let mut name: String = stem
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if name.chars().next().is_none_or(|c| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }
}
