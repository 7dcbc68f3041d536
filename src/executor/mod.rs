//! Command execution engine for h5sh
//!
//! Executes parsed commands against the shared session: opening and closing
//! snapshot files, listing groups, printing attributes, and binding variables.
//! Expression resolution itself lives in `crate::expr`; this layer turns
//! resolved values into displayable result data.

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::OutputFormat;
use crate::error::H5shError;
use crate::expr;
use crate::parser::{Command, ShowCommand};
use crate::repl::SharedState;
use crate::session::{Session, Value};
use crate::tree::NodeRef;

/// Result of command execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Success status
    pub success: bool,

    /// Result data (listings, values, messages)
    pub data: ResultData,

    /// Error message if failed
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn ok(data: ResultData) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            data: ResultData::None,
            error: Some(message),
        }
    }
}

/// Data returned from command execution
#[derive(Debug, Clone)]
pub enum ResultData {
    /// Children of a group; `long` selects the detailed rendering
    Listing {
        entries: Vec<EntryInfo>,
        long: bool,
    },

    /// Attributes of a node
    Attributes(Vec<AttrEntry>),

    /// A plain value (attribute contents, shapes, key listings)
    Value(JsonValue),

    /// Summary of a single group or dataset
    Node(NodeSummary),

    /// Open files
    Files(Vec<FileEntry>),

    /// Session variables
    Vars(Vec<VarEntry>),

    /// Text message
    Message(String),

    /// No data
    None,
}

/// One row of a group listing
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub name: String,
    pub kind: String,
    pub shape: Option<Vec<u64>>,
    pub dtype: Option<String>,
    pub nattrs: usize,
}

/// One attribute name/value pair
#[derive(Debug, Clone)]
pub struct AttrEntry {
    pub name: String,
    pub value: JsonValue,
}

/// Summary of a node, shown when a bare expression resolves to one
#[derive(Debug, Clone)]
pub struct NodeSummary {
    pub path: String,
    pub kind: String,
    pub shape: Option<Vec<u64>>,
    pub dtype: Option<String>,
    pub nchildren: Option<usize>,
    pub nattrs: usize,
}

/// One open file
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub variable: String,
    pub path: String,
}

/// One session variable
#[derive(Debug, Clone)]
pub struct VarEntry {
    pub name: String,
    pub kind: String,
    pub detail: String,
}

/// Executes commands against the shared session state.
pub struct Executor {
    state: SharedState,
}

impl Executor {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Execute a parsed command. Failures are folded into the result rather
    /// than propagated, so one bad command never tears down the shell.
    pub fn execute(&self, command: Command) -> ExecutionResult {
        debug!(?command, "executing command");
        match self.dispatch(command) {
            Ok(data) => ExecutionResult::ok(data),
            Err(e) => ExecutionResult::failure(e.to_string()),
        }
    }

    fn dispatch(&self, command: Command) -> Result<ResultData, H5shError> {
        match command {
            Command::Open { path, variable } => {
                let variable =
                    variable.unwrap_or_else(|| Session::variable_for_path(&path));
                let mut session = self.session_mut();
                session.open(&path, &variable)?;
                Ok(ResultData::Message(format!(
                    "Opened {} as '{}'",
                    path.display(),
                    variable
                )))
            }

            Command::Close { variable } => {
                self.session_mut().close(&variable)?;
                Ok(ResultData::Message(format!("Closed '{variable}'")))
            }

            Command::List { expr, long } => {
                let session = self.session();
                let node = match expr {
                    Some(expr) => match expr::resolve(&expr, &session)? {
                        Value::Node(node) => node,
                        other => {
                            return Err(H5shError::Generic(format!(
                                "cannot list {}",
                                other.type_label()
                            )));
                        }
                    },
                    None => default_root(&session)?,
                };
                Ok(ResultData::Listing {
                    entries: list_entries(&node),
                    long,
                })
            }

            Command::Attrs { expr } => {
                let session = self.session();
                let node = match expr::resolve(&expr, &session)? {
                    Value::Node(node) | Value::Attrs(node) => node,
                    other => {
                        return Err(H5shError::Generic(format!(
                            "{} has no attributes",
                            other.type_label()
                        )));
                    }
                };
                let attrs = node
                    .attrs()
                    .iter()
                    .map(|(name, value)| AttrEntry {
                        name: name.clone(),
                        value: value.clone(),
                    })
                    .collect();
                Ok(ResultData::Attributes(attrs))
            }

            Command::Show(ShowCommand::Files) => {
                let session = self.session();
                let files = session
                    .files()
                    .iter()
                    .map(|f| FileEntry {
                        variable: f.variable.clone(),
                        path: f.path.display().to_string(),
                    })
                    .collect();
                Ok(ResultData::Files(files))
            }

            Command::Show(ShowCommand::Vars) => {
                let session = self.session();
                let vars = session
                    .variable_names()
                    .into_iter()
                    .filter_map(|name| {
                        session.lookup(&name).map(|value| VarEntry {
                            name: name.clone(),
                            kind: value.type_label().to_string(),
                            detail: value_detail(value),
                        })
                    })
                    .collect();
                Ok(ResultData::Vars(vars))
            }

            Command::Show(ShowCommand::Format) => Ok(ResultData::Message(format!(
                "Output format: {}",
                self.state.format()
            ))),

            Command::SetFormat(mode) => {
                let format: OutputFormat = mode.parse()?;
                self.state.set_format(format);
                Ok(ResultData::Message(format!("Output format set to {format}")))
            }

            Command::Assign { variable, expr } => {
                let value = {
                    let session = self.session();
                    expr::resolve(&expr, &session)?
                };
                let detail = value_detail(&value);
                let label = value.type_label().to_string();
                self.session_mut().bind(&variable, value);
                Ok(ResultData::Message(format!("{variable} = {label} {detail}")))
            }

            Command::Eval { expr } => {
                let session = self.session();
                match expr::resolve(&expr, &session)? {
                    Value::Node(node) => Ok(ResultData::Node(summarize(&node))),
                    Value::Attrs(node) => {
                        let attrs = node
                            .attrs()
                            .iter()
                            .map(|(name, value)| AttrEntry {
                                name: name.clone(),
                                value: value.clone(),
                            })
                            .collect();
                        Ok(ResultData::Attributes(attrs))
                    }
                    Value::Json(value) => Ok(ResultData::Value(value)),
                }
            }

            Command::Help(topic) => Ok(ResultData::Message(help_text(topic.as_deref()))),

            Command::Exit => Ok(ResultData::None),
        }
    }

    fn session(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.session.read().unwrap_or_else(|e| e.into_inner())
    }

    fn session_mut(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.state
            .session
            .write()
            .unwrap_or_else(|e| e.into_inner())
    }
}

/// Root used by a bare `ls`: the sole open file, if there is exactly one.
fn default_root(session: &Session) -> Result<NodeRef, H5shError> {
    let files = session.files();
    match files {
        [] => Err(H5shError::Generic(
            "no open files (use 'open <file>')".to_string(),
        )),
        [only] => match session.lookup(&only.variable) {
            Some(Value::Node(node)) => Ok(node.clone()),
            _ => Err(H5shError::Generic(format!(
                "variable '{}' no longer holds a node",
                only.variable
            ))),
        },
        _ => Err(H5shError::Generic(
            "multiple files open, pass an expression to 'ls'".to_string(),
        )),
    }
}

fn list_entries(node: &NodeRef) -> Vec<EntryInfo> {
    if !node.is_group() {
        return vec![entry_for(node.name(), node)];
    }
    node.keys()
        .into_iter()
        .filter_map(|name| node.child(&name).map(|child| entry_for(&name, &child)))
        .collect()
}

fn entry_for(name: &str, node: &NodeRef) -> EntryInfo {
    EntryInfo {
        name: name.to_string(),
        kind: node.kind_label().to_string(),
        shape: node.shape().map(|s| s.to_vec()),
        dtype: node.dtype().map(|d| d.to_string()),
        nattrs: node.attr_names().len(),
    }
}

fn summarize(node: &NodeRef) -> NodeSummary {
    NodeSummary {
        path: node.path().to_string(),
        kind: node.kind_label().to_string(),
        shape: node.shape().map(|s| s.to_vec()),
        dtype: node.dtype().map(|d| d.to_string()),
        nchildren: node.is_group().then(|| node.len()),
        nattrs: node.attr_names().len(),
    }
}

fn value_detail(value: &Value) -> String {
    match value {
        Value::Node(node) => node.path().to_string(),
        Value::Attrs(node) => format!("of {}", node.path()),
        Value::Json(json) => json.to_string(),
    }
}

fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => "\
Commands:
  open <file> [as <var>]   load a snapshot file
  close <var>              drop a variable / open file
  ls [-l] [expr]           list the children of a group
  attrs <expr>             show the attributes of a node
  show files|vars|format   show session state
  format <mode>            set output format (shell, json, json-pretty, table)
  <var> = <expr>           bind a variable
  <expr>                   print the value of an expression
  help [command]           this help
  exit                     leave the shell

Expressions address nodes with subscripts and members, for example:
  f['group/dataset']       f['group'].attrs.units       f['dataset'].shape"
            .to_string(),
        Some("open") => "open <file> [as <var>]: load a snapshot file and bind \
its root. Without 'as', the variable is derived from the file name."
            .to_string(),
        Some("ls") => "ls [-l] [expr]: list the children of a group. With -l, \
show kind, shape, dtype and attribute count. Without an expression, lists the \
root of the only open file."
            .to_string(),
        Some("attrs") => "attrs <expr>: show the attributes of the node the \
expression resolves to."
            .to_string(),
        Some("show") => "show files|vars|format: show open files, session \
variables, or the current output format."
            .to_string(),
        Some("format") => "format <mode>: set the output format. Modes: shell, \
json, json-pretty, table."
            .to_string(),
        Some("close") => "close <var>: drop a variable and its file entry.".to_string(),
        Some(other) => format!("No help for '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::tree::node::fixtures::sample_tree;

    fn executor_with_tree() -> Executor {
        let state = SharedState::new();
        state
            .session
            .write()
            .unwrap()
            .bind("f", Value::Node(sample_tree()));
        Executor::new(state)
    }

    fn run(executor: &Executor, line: &str) -> ExecutionResult {
        let command = Parser::new().parse(line).unwrap();
        executor.execute(command)
    }

    #[test]
    fn test_ls_group() {
        let executor = executor_with_tree();
        let result = run(&executor, "ls f");
        assert!(result.success);
        match result.data {
            ResultData::Listing { entries, long } => {
                assert!(!long);
                let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, vec!["item1", "items", "readme"]);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_ls_nested() {
        let executor = executor_with_tree();
        let result = run(&executor, "ls -l f['item1']");
        assert!(result.success);
        match result.data {
            ResultData::Listing { entries, long } => {
                assert!(long);
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].name, "item2");
                assert_eq!(entries[0].kind, "group");
                assert_eq!(entries[1].name, "temperature");
                assert_eq!(entries[1].kind, "dataset");
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_ls_without_files_fails() {
        let executor = Executor::new(SharedState::new());
        let result = run(&executor, "ls");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no open files"));
    }

    #[test]
    fn test_attrs() {
        let executor = executor_with_tree();
        let result = run(&executor, "attrs f['item1']");
        assert!(result.success);
        match result.data {
            ResultData::Attributes(attrs) => {
                let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
                assert_eq!(names, vec!["scale", "units"]);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_assignment_binds_variable() {
        let executor = executor_with_tree();
        let result = run(&executor, "g = f['item1']");
        assert!(result.success);

        let result = run(&executor, "ls g");
        assert!(result.success);
    }

    #[test]
    fn test_eval_json_value() {
        let executor = executor_with_tree();
        let result = run(&executor, "f['item1'].attrs.units");
        assert!(result.success);
        assert!(matches!(
            result.data,
            ResultData::Value(serde_json::Value::String(ref s)) if s == "counts"
        ));
    }

    #[test]
    fn test_eval_node_summary() {
        let executor = executor_with_tree();
        let result = run(&executor, "f['items']");
        assert!(result.success);
        match result.data {
            ResultData::Node(summary) => {
                assert_eq!(summary.kind, "dataset");
                assert_eq!(summary.shape, Some(vec![10, 2]));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_eval_failure_is_soft() {
        let executor = executor_with_tree();
        let result = run(&executor, "f['missing']");
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_set_format() {
        let executor = executor_with_tree();
        let result = run(&executor, "format json");
        assert!(result.success);
        assert_eq!(executor.state.format(), OutputFormat::Json);

        let result = run(&executor, "format yaml");
        assert!(!result.success);
    }

    #[test]
    fn test_show_vars() {
        let executor = executor_with_tree();
        let result = run(&executor, "show vars");
        match result.data {
            ResultData::Vars(vars) => {
                assert_eq!(vars.len(), 1);
                assert_eq!(vars[0].name, "f");
                assert_eq!(vars[0].kind, "group");
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_close_drops_variable() {
        let executor = executor_with_tree();
        assert!(run(&executor, "close f").success);
        assert!(!run(&executor, "ls f").success);
    }

    #[test]
    fn test_help() {
        let executor = executor_with_tree();
        let result = run(&executor, "help");
        assert!(matches!(result.data, ResultData::Message(ref m) if m.contains("open")));
    }
}
