//! Command parser for h5sh
//!
//! Shell commands (`open`, `ls`, `show`, ...) are dispatched on their first
//! word; anything else is an assignment or a bare expression, detected with
//! the expression lexer rather than string matching so that `g = f['grp']`
//! and `f['grp']` land in the right place.

mod command;

pub use command::{Command, ShowCommand};

use std::path::PathBuf;

use crate::error::{ParseError, Result};
use crate::expr::{ExprLexer, TokenKind};

/// Main parser for h5sh input lines
pub struct Parser {}

impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    /// Parse an input line into a Command.
    pub fn parse(&self, input: &str) -> Result<Command> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(ParseError::InvalidCommand("Empty input".to_string()).into());
        }

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (trimmed, ""),
        };

        match word {
            "open" => Self::parse_open(rest),
            "close" => Self::parse_close(rest),
            "ls" => Self::parse_ls(rest),
            "attrs" => Self::parse_attrs(rest),
            "show" => Self::parse_show(rest),
            "format" => Ok(if rest.is_empty() {
                Command::Show(ShowCommand::Format)
            } else {
                Command::SetFormat(rest.to_string())
            }),
            "help" => Ok(Command::Help(if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            })),
            "exit" | "quit" => Ok(Command::Exit),
            _ => Self::parse_expression_line(trimmed),
        }
    }

    fn parse_open(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: "open".to_string(),
                argument: "file path".to_string(),
            }
            .into());
        }

        // `open data.json as f` binds the root to an explicit variable.
        let (path, variable) = match rest.rsplit_once(" as ") {
            Some((path, var)) if !var.trim().is_empty() => {
                (path.trim(), Some(var.trim().to_string()))
            }
            _ => (rest, None),
        };

        if let Some(var) = &variable {
            if !is_identifier(var) {
                return Err(ParseError::UnexpectedToken {
                    expected: "a variable name".to_string(),
                    found: var.clone(),
                }
                .into());
            }
        }

        Ok(Command::Open {
            path: PathBuf::from(path),
            variable,
        })
    }

    fn parse_close(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: "close".to_string(),
                argument: "variable".to_string(),
            }
            .into());
        }
        Ok(Command::Close {
            variable: rest.to_string(),
        })
    }

    fn parse_ls(rest: &str) -> Result<Command> {
        let mut long = false;
        let mut expr_parts = Vec::new();

        for part in rest.split_whitespace() {
            match part {
                "-l" => long = true,
                other => expr_parts.push(other),
            }
        }

        let expr = if expr_parts.is_empty() {
            None
        } else {
            Some(expr_parts.join(" "))
        };

        Ok(Command::List { expr, long })
    }

    fn parse_attrs(rest: &str) -> Result<Command> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: "attrs".to_string(),
                argument: "expression".to_string(),
            }
            .into());
        }
        Ok(Command::Attrs {
            expr: rest.to_string(),
        })
    }

    fn parse_show(rest: &str) -> Result<Command> {
        match rest {
            "" => Err(ParseError::MissingArgument {
                command: "show".to_string(),
                argument: "files | vars | format".to_string(),
            }
            .into()),
            "files" => Ok(Command::Show(ShowCommand::Files)),
            "vars" => Ok(Command::Show(ShowCommand::Vars)),
            "format" => Ok(Command::Show(ShowCommand::Format)),
            other => Err(ParseError::UnexpectedToken {
                expected: "files, vars or format".to_string(),
                found: other.to_string(),
            }
            .into()),
        }
    }

    /// Distinguish `g = expr` from a bare expression.
    fn parse_expression_line(line: &str) -> Result<Command> {
        let tokens = ExprLexer::tokenize(line);

        if let (Some(first), Some(second)) = (tokens.first(), tokens.get(1)) {
            if let (TokenKind::Ident(name), TokenKind::Eq) = (&first.kind, &second.kind) {
                let expr = line[second.span.end..].trim();
                if expr.is_empty() {
                    return Err(ParseError::MissingArgument {
                        command: "assignment".to_string(),
                        argument: "expression".to_string(),
                    }
                    .into());
                }
                return Ok(Command::Assign {
                    variable: name.clone(),
                    expr: expr.to_string(),
                });
            }
        }

        Ok(Command::Eval {
            expr: line.to_string(),
        })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exit() {
        let parser = Parser::new();
        assert!(matches!(parser.parse("exit").unwrap(), Command::Exit));
        assert!(matches!(parser.parse("quit").unwrap(), Command::Exit));
    }

    #[test]
    fn test_parse_help() {
        let parser = Parser::new();
        assert!(matches!(parser.parse("help").unwrap(), Command::Help(None)));
        assert!(matches!(
            parser.parse("help open").unwrap(),
            Command::Help(Some(ref t)) if t == "open"
        ));
    }

    #[test]
    fn test_parse_open() {
        let parser = Parser::new();
        let cmd = parser.parse("open data.json").unwrap();
        assert_eq!(
            cmd,
            Command::Open {
                path: PathBuf::from("data.json"),
                variable: None,
            }
        );

        let cmd = parser.parse("open /tmp/run 42.json as f").unwrap();
        assert_eq!(
            cmd,
            Command::Open {
                path: PathBuf::from("/tmp/run 42.json"),
                variable: Some("f".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_open_missing_path() {
        let parser = Parser::new();
        assert!(parser.parse("open").is_err());
    }

    #[test]
    fn test_parse_open_bad_variable() {
        let parser = Parser::new();
        assert!(parser.parse("open a.json as 2bad").is_err());
    }

    #[test]
    fn test_parse_close() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("close f").unwrap(),
            Command::Close {
                variable: "f".to_string()
            }
        );
        assert!(parser.parse("close").is_err());
    }

    #[test]
    fn test_parse_ls() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("ls").unwrap(),
            Command::List {
                expr: None,
                long: false
            }
        );
        assert_eq!(
            parser.parse("ls -l f['grp']").unwrap(),
            Command::List {
                expr: Some("f['grp']".to_string()),
                long: true
            }
        );
    }

    #[test]
    fn test_parse_attrs() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("attrs f['grp/dset']").unwrap(),
            Command::Attrs {
                expr: "f['grp/dset']".to_string()
            }
        );
        assert!(parser.parse("attrs").is_err());
    }

    #[test]
    fn test_parse_show() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("show files").unwrap(),
            Command::Show(ShowCommand::Files)
        );
        assert_eq!(
            parser.parse("show vars").unwrap(),
            Command::Show(ShowCommand::Vars)
        );
        assert!(parser.parse("show nothing").is_err());
        assert!(parser.parse("show").is_err());
    }

    #[test]
    fn test_parse_format() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("format json").unwrap(),
            Command::SetFormat("json".to_string())
        );
        assert_eq!(
            parser.parse("format").unwrap(),
            Command::Show(ShowCommand::Format)
        );
    }

    #[test]
    fn test_parse_assignment() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("g = f['grp']").unwrap(),
            Command::Assign {
                variable: "g".to_string(),
                expr: "f['grp']".to_string(),
            }
        );
        assert!(parser.parse("g =").is_err());
    }

    #[test]
    fn test_parse_bare_expression() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("f['grp'].attrs.units").unwrap(),
            Command::Eval {
                expr: "f['grp'].attrs.units".to_string()
            }
        );
    }

    #[test]
    fn test_parse_empty_is_error() {
        let parser = Parser::new();
        assert!(parser.parse("   ").is_err());
    }
}
