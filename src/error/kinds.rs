use std::{fmt, io};

/// Crate-wide `Result` type using [`H5shError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, H5shError>;

/// Top-level error type for h5sh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum H5shError {
    /// Command parsing errors.
    Parse(ParseError),

    /// Expression resolution errors.
    Eval(EvalError),

    /// Snapshot loading errors.
    Snapshot(SnapshotError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Parsing-specific errors.
#[derive(Debug)]
pub enum ParseError {
    /// Syntax error in command.
    SyntaxError(String),

    /// Invalid command format.
    InvalidCommand(String),

    /// Unexpected token while parsing.
    UnexpectedToken { expected: String, found: String },

    /// A command is missing a required argument.
    MissingArgument { command: String, argument: String },
}

/// Expression resolution errors.
///
/// Produced when resolving an expression like `f['grp/dset'].attrs.units`
/// against the session namespace. During tab completion these are always
/// swallowed and mapped to "no candidates"; during command execution they
/// are reported to the user.
#[derive(Debug)]
pub enum EvalError {
    /// The leading identifier is not bound in the session.
    UnknownVariable(String),

    /// Item lookup failed for the given path.
    NoSuchItem(String),

    /// Attribute lookup failed for the given name.
    NoSuchAttribute(String),

    /// Member access failed (e.g. `.shape` on a group).
    NoSuchMember { member: String, on: String },

    /// Subscript applied to a value that has no items.
    NotSubscriptable(String),

    /// The expression contains a call; calls are never evaluated.
    CallNotSupported,

    /// The expression has trailing or malformed input.
    SyntaxError(String),
}

/// Snapshot loading errors.
#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file not found.
    FileNotFound(String),

    /// Snapshot is not valid JSON.
    InvalidJson(String),

    /// Snapshot JSON does not describe a valid tree.
    InvalidStructure(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for H5shError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            H5shError::Parse(e) => write!(f, "{e}"),
            H5shError::Eval(e) => write!(f, "{e}"),
            H5shError::Snapshot(e) => write!(f, "Snapshot error: {e}"),
            H5shError::Config(e) => write!(f, "Configuration error: {e}"),
            H5shError::Io(e) => write!(f, "I/O error: {e}"),
            H5shError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::SyntaxError(msg) => write!(f, "Syntax error: {msg}"),
            ParseError::InvalidCommand(cmd) => write!(f, "Invalid command: {cmd}"),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "Expected '{expected}', found '{found}'")
            }
            ParseError::MissingArgument { command, argument } => {
                write!(f, "'{command}' requires <{argument}>")
            }
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownVariable(name) => write!(f, "Unknown variable: {name}"),
            EvalError::NoSuchItem(path) => write!(f, "No such item: {path}"),
            EvalError::NoSuchAttribute(name) => write!(f, "No such attribute: {name}"),
            EvalError::NoSuchMember { member, on } => {
                write!(f, "'{on}' has no member '{member}'")
            }
            EvalError::NotSubscriptable(what) => {
                write!(f, "'{what}' does not support item lookup")
            }
            EvalError::CallNotSupported => {
                write!(f, "Function calls are not supported in expressions")
            }
            EvalError::SyntaxError(msg) => write!(f, "Invalid expression: {msg}"),
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::FileNotFound(path) => write!(f, "File not found: {path}"),
            SnapshotError::InvalidJson(msg) => write!(f, "Invalid JSON: {msg}"),
            SnapshotError::InvalidStructure(msg) => write!(f, "Invalid tree structure: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for H5shError {}
impl std::error::Error for ParseError {}
impl std::error::Error for EvalError {}
impl std::error::Error for SnapshotError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to H5shError ========================= */

impl From<io::Error> for H5shError {
    fn from(err: io::Error) -> Self {
        H5shError::Io(err)
    }
}

impl From<ParseError> for H5shError {
    fn from(err: ParseError) -> Self {
        H5shError::Parse(err)
    }
}

impl From<EvalError> for H5shError {
    fn from(err: EvalError) -> Self {
        H5shError::Eval(err)
    }
}

impl From<SnapshotError> for H5shError {
    fn from(err: SnapshotError) -> Self {
        H5shError::Snapshot(err)
    }
}

impl From<ConfigError> for H5shError {
    fn from(err: ConfigError) -> Self {
        H5shError::Config(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::InvalidJson(err.to_string())
    }
}

impl From<String> for H5shError {
    fn from(msg: String) -> Self {
        H5shError::Generic(msg)
    }
}

impl From<&str> for H5shError {
    fn from(msg: &str) -> Self {
        H5shError::Generic(msg.to_owned())
    }
}
