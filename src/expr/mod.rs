//! Expression lexing and resolution.
//!
//! The lexer is shared between the completion system (cursor-aware token
//! stream) and the resolver (base-expression evaluation against the session).

pub mod eval;
pub mod lexer;

pub use eval::{member_names, resolve};
pub use lexer::{ExprLexer, Token, TokenKind};
