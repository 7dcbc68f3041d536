//! Expression resolver.
//!
//! Resolves base expressions of the form `ident ('[' string ']' | '.' member)*`
//! against the session namespace. This is the shell's stand-in for the host
//! evaluator the completer originally delegated to: it never calls anything
//! (a `(` anywhere aborts resolution) and never mutates the session.

use serde_json::json;

use crate::expr::lexer::{ExprLexer, Token, TokenKind};
use crate::session::{Session, Value};
use crate::tree::NodeRef;

/// Resolution error; completion maps every variant to "no candidates".
pub use crate::error::EvalError;

/// Resolve an expression string against the session.
pub fn resolve(expr: &str, session: &Session) -> Result<Value, EvalError> {
    let tokens = ExprLexer::tokenize(expr);
    Resolver::new(&tokens, session).resolve()
}

/// Member names a value exposes through dot access.
///
/// Groups and datasets expose their API surface; an `.attrs` view exposes the
/// attribute names of the underlying node. Plain values expose nothing.
pub fn member_names(value: &Value) -> Vec<String> {
    match value {
        Value::Node(node) => {
            if node.is_group() {
                vec![
                    "attrs".to_string(),
                    "keys".to_string(),
                    "len".to_string(),
                    "name".to_string(),
                ]
            } else {
                vec![
                    "attrs".to_string(),
                    "dtype".to_string(),
                    "name".to_string(),
                    "shape".to_string(),
                    "size".to_string(),
                ]
            }
        }
        Value::Attrs(node) => node.attr_names(),
        Value::Json(_) => Vec::new(),
    }
}

struct Resolver<'a> {
    tokens: &'a [Token],
    pos: usize,
    session: &'a Session,
}

impl<'a> Resolver<'a> {
    fn new(tokens: &'a [Token], session: &'a Session) -> Self {
        Self {
            tokens,
            pos: 0,
            session,
        }
    }

    fn resolve(mut self) -> Result<Value, EvalError> {
        // Calls are never evaluated, matching the completer's contract.
        if self
            .tokens
            .iter()
            .any(|t| matches!(t.kind, TokenKind::LParen))
        {
            return Err(EvalError::CallNotSupported);
        }

        let name = match self.next() {
            TokenKind::Ident(name) => name.clone(),
            other => {
                return Err(EvalError::SyntaxError(format!(
                    "expected a variable, found {other:?}"
                )));
            }
        };

        let mut value = self
            .session
            .lookup(&name)
            .cloned()
            .ok_or(EvalError::UnknownVariable(name))?;

        loop {
            match self.next() {
                TokenKind::Dot => {
                    let member = match self.next() {
                        TokenKind::Ident(m) => m.clone(),
                        other => {
                            return Err(EvalError::SyntaxError(format!(
                                "expected a member name after '.', found {other:?}"
                            )));
                        }
                    };
                    value = self.access_member(value, &member)?;
                }
                TokenKind::LBracket => {
                    let key = match self.next() {
                        TokenKind::Str {
                            value: key,
                            terminated: true,
                            ..
                        } => key.clone(),
                        TokenKind::Str {
                            terminated: false, ..
                        } => {
                            return Err(EvalError::SyntaxError(
                                "unterminated string in subscript".to_string(),
                            ));
                        }
                        other => {
                            return Err(EvalError::SyntaxError(format!(
                                "subscripts must be quoted strings, found {other:?}"
                            )));
                        }
                    };
                    if !matches!(self.next(), TokenKind::RBracket) {
                        return Err(EvalError::SyntaxError("expected ']'".to_string()));
                    }
                    value = self.subscript(value, &key)?;
                }
                TokenKind::Eof => return Ok(value),
                other => {
                    return Err(EvalError::SyntaxError(format!(
                        "unexpected {other:?} in expression"
                    )));
                }
            }
        }
    }

    fn access_member(&self, value: Value, member: &str) -> Result<Value, EvalError> {
        match value {
            Value::Node(node) => Self::node_member(node, member),
            Value::Attrs(node) => node
                .attr(member)
                .cloned()
                .map(Value::Json)
                .ok_or_else(|| EvalError::NoSuchAttribute(member.to_string())),
            Value::Json(_) => Err(EvalError::NoSuchMember {
                member: member.to_string(),
                on: "value".to_string(),
            }),
        }
    }

    fn node_member(node: NodeRef, member: &str) -> Result<Value, EvalError> {
        match member {
            "attrs" => Ok(Value::Attrs(node)),
            "name" => Ok(Value::Json(json!(node.path()))),
            "keys" if node.is_group() => Ok(Value::Json(json!(node.keys()))),
            "len" if node.is_group() => Ok(Value::Json(json!(node.len()))),
            "shape" if !node.is_group() => Ok(Value::Json(json!(node.shape()))),
            "dtype" if !node.is_group() => Ok(Value::Json(json!(node.dtype()))),
            "size" if !node.is_group() => Ok(Value::Json(json!(node.size()))),
            _ => Err(EvalError::NoSuchMember {
                member: member.to_string(),
                on: node.kind_label().to_string(),
            }),
        }
    }

    fn subscript(&self, value: Value, key: &str) -> Result<Value, EvalError> {
        match value {
            Value::Node(node) => {
                if !node.is_group() {
                    return Err(EvalError::NotSubscriptable("dataset".to_string()));
                }
                node.get(key)
                    .map(Value::Node)
                    .ok_or_else(|| EvalError::NoSuchItem(key.to_string()))
            }
            Value::Attrs(node) => node
                .attr(key)
                .cloned()
                .map(Value::Json)
                .ok_or_else(|| EvalError::NoSuchAttribute(key.to_string())),
            Value::Json(_) => Err(EvalError::NotSubscriptable("value".to_string())),
        }
    }

    fn next(&mut self) -> &TokenKind {
        let kind = self
            .tokens
            .get(self.pos)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof);
        self.pos += 1;
        kind
    }
}
