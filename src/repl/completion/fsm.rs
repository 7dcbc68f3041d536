//! Finite State Machine for completion context determination
//!
//! A single O(n) pass over the tokens before the cursor classifies the line:
//! command word, expression, or inside parentheses. The cursor-local patterns
//! (open subscript, member access) are then read off the token stream, so
//! item and attribute completion work no matter how deep the expression is.

use crate::expr::{Token, TokenKind};

use super::context::CompletionContext;
use super::token_stream::TokenStream;

/// FSM states representing different positions in a command
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionState {
    /// Initial state
    Start,

    /// After "show" - should complete subcommands
    ShowCommand,

    /// After "format" - should complete output format names
    FormatCommand,

    /// After "close" - should complete variable names
    CloseCommand,

    /// After "help" - should complete command names
    HelpCommand,

    /// After "open" - file system paths, not completed
    OpenCommand,

    /// After "ls" or "attrs" - an expression is expected next
    ExprStart,

    /// Inside a flag word such as `-l`; the expression is still to come
    Flag,

    /// Inside an expression
    Expr,

    /// Inside parentheses - no completion; calls are never resolved, so
    /// suggesting anything there would only mislead
    InsideParentheses,
}

impl CompletionState {
    /// Perform state transition based on current state and token
    pub fn next(self, token: &Token) -> Self {
        use CompletionState::*;

        match (self, &token.kind) {
            // Parentheses take priority: nothing completes inside a call
            (_, TokenKind::LParen) => InsideParentheses,
            (InsideParentheses, TokenKind::RParen) => Expr,
            (InsideParentheses, _) => InsideParentheses,

            // `=` resets the analysis, so `g = f['x'].` is completed as if
            // the assignment prefix were not there
            (_, TokenKind::Eq) => Start,

            (Start, TokenKind::Ident(word)) => match word.as_str() {
                "show" => ShowCommand,
                "format" => FormatCommand,
                "close" => CloseCommand,
                "help" => HelpCommand,
                "open" => OpenCommand,
                "ls" | "attrs" => ExprStart,
                _ => Expr,
            },

            (ExprStart, TokenKind::Ident(_)) => Expr,
            // A flag lexes as `-` followed by an identifier; neither fills
            // the expression position
            (ExprStart, TokenKind::Unknown('-')) => Flag,
            (Flag, TokenKind::Unknown('-')) => Flag,
            (Flag, TokenKind::Ident(_)) => ExprStart,

            // Default: maintain current state
            (state, _) => state,
        }
    }

    /// Run the FSM on a sequence of tokens
    pub fn run(tokens: &[Token]) -> Self {
        let mut state = CompletionState::Start;

        for token in tokens {
            state = state.next(token);
        }

        state
    }

    /// Convert state to completion context
    pub fn to_context(&self, stream: &TokenStream) -> CompletionContext {
        use CompletionState::*;

        match self {
            InsideParentheses => CompletionContext::None,
            Flag => CompletionContext::None,

            ShowCommand => CompletionContext::show_subcommand(stream.current_prefix()),
            FormatCommand => CompletionContext::format_mode(stream.current_prefix()),
            CloseCommand => CompletionContext::variable(stream.current_prefix()),
            HelpCommand => CompletionContext::command(stream.current_prefix()),
            OpenCommand => CompletionContext::None,

            Start | ExprStart | Expr => {
                // Cursor inside a subscript string: item completion
                if let Some((lbracket, partial)) = stream.open_subscript() {
                    return match stream.base_expr(lbracket) {
                        Some(base) => CompletionContext::item(base, partial),
                        None => CompletionContext::None,
                    };
                }

                // Cursor at a member access: attribute completion
                if let Some((dot, prefix)) = stream.member_access() {
                    return match stream.base_expr(dot) {
                        Some(base) => CompletionContext::attribute(base, prefix),
                        None => CompletionContext::None,
                    };
                }

                let prefix = stream.current_prefix();
                // The first word of the line is a command position even
                // though the FSM has already consumed it
                if stream.prefix_token_index() == Some(0) {
                    return CompletionContext::command(prefix);
                }
                match self {
                    Start if !prefix.is_empty() => CompletionContext::command(prefix),
                    ExprStart => CompletionContext::variable(prefix),
                    Expr if !prefix.is_empty() => CompletionContext::variable(prefix),
                    _ => CompletionContext::None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_for(line: &str) -> CompletionState {
        let stream = TokenStream::new(line, line.len());
        CompletionState::run(stream.tokens_before_cursor())
    }

    fn context_for(line: &str) -> CompletionContext {
        let stream = TokenStream::new(line, line.len());
        CompletionState::run(stream.tokens_before_cursor()).to_context(&stream)
    }

    #[test]
    fn test_state_show() {
        assert_eq!(state_for("show "), CompletionState::ShowCommand);
    }

    #[test]
    fn test_state_expr_commands() {
        assert_eq!(state_for("ls "), CompletionState::ExprStart);
        assert_eq!(state_for("attrs "), CompletionState::ExprStart);
        assert_eq!(state_for("ls f "), CompletionState::Expr);
    }

    #[test]
    fn test_state_flag_keeps_expr_start() {
        assert_eq!(state_for("ls -l "), CompletionState::ExprStart);
        assert_eq!(state_for("ls --long "), CompletionState::ExprStart);
        assert_eq!(state_for("ls -l f "), CompletionState::Expr);
    }

    #[test]
    fn test_state_assignment_resets() {
        assert_eq!(state_for("g = "), CompletionState::Start);
    }

    #[test]
    fn test_state_inside_parens() {
        assert_eq!(state_for("f.keys("), CompletionState::InsideParentheses);
    }

    #[test]
    fn test_context_item_completion() {
        assert_eq!(context_for("f['"), CompletionContext::item("f", ""));
        assert_eq!(
            context_for("ls f['grp/da"),
            CompletionContext::item("f", "grp/da")
        );
    }

    #[test]
    fn test_context_attribute_completion() {
        assert_eq!(
            context_for("f['grp']."),
            CompletionContext::attribute("f['grp']", "")
        );
        assert_eq!(
            context_for("f['grp'].at"),
            CompletionContext::attribute("f['grp']", "at")
        );
    }

    #[test]
    fn test_context_attribute_behind_assignment() {
        assert_eq!(
            context_for("g = f['grp'].attrs."),
            CompletionContext::attribute("f['grp'].attrs", "")
        );
    }

    #[test]
    fn test_context_show_subcommand() {
        assert_eq!(context_for("show "), CompletionContext::show_subcommand(""));
        assert_eq!(
            context_for("show fi"),
            CompletionContext::show_subcommand("fi")
        );
    }

    #[test]
    fn test_context_format_mode() {
        assert_eq!(context_for("format js"), CompletionContext::format_mode("js"));
    }

    #[test]
    fn test_context_close_variable() {
        assert_eq!(context_for("close f"), CompletionContext::variable("f"));
    }

    #[test]
    fn test_context_command_at_line_start() {
        assert_eq!(context_for("sh"), CompletionContext::command("sh"));
    }

    #[test]
    fn test_context_variable_after_ls() {
        assert_eq!(context_for("ls "), CompletionContext::variable(""));
        assert_eq!(context_for("ls fi"), CompletionContext::variable("fi"));
    }

    #[test]
    fn test_context_variable_after_flag() {
        assert_eq!(context_for("ls -l "), CompletionContext::variable(""));
        assert_eq!(context_for("ls -l fi"), CompletionContext::variable("fi"));
    }

    #[test]
    fn test_no_context_inside_parens() {
        assert_eq!(context_for("f.keys(x"), CompletionContext::None);
    }

    #[test]
    fn test_no_context_after_open() {
        assert_eq!(context_for("open dat"), CompletionContext::None);
    }

    #[test]
    fn test_no_context_on_empty_line() {
        assert_eq!(context_for(""), CompletionContext::None);
    }
}
