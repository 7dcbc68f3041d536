//! Token stream with cursor awareness for completion
//!
//! Wraps the expression lexer's tokens and tracks the cursor position, plus
//! the pattern helpers the completion FSM needs: the partial string of an
//! open subscript, a member access around the cursor, and the base
//! expression leading up to either.

use std::ops::Range;

use crate::expr::{ExprLexer, Token, TokenKind};

/// Token stream with cursor position tracking
pub struct TokenStream {
    /// All tokens (including EOF)
    pub tokens: Vec<Token>,
    /// The original input line
    pub line: String,
    /// Cursor position (byte index in the original input)
    pub cursor: usize,
    /// Index of the token at or after the cursor
    pub token_index: usize,
}

impl TokenStream {
    pub fn new(line: &str, cursor: usize) -> Self {
        let cursor = cursor.min(line.len());
        let tokens = ExprLexer::tokenize(line);
        let token_index = Self::find_token_at_cursor(&tokens, cursor);

        Self {
            tokens,
            line: line.to_string(),
            cursor,
            token_index,
        }
    }

    /// Find the token at the cursor position
    fn find_token_at_cursor(tokens: &[Token], cursor: usize) -> usize {
        for (i, token) in tokens.iter().enumerate() {
            let span = &token.span;
            // If cursor is strictly within this token
            if cursor > span.start && cursor < span.end {
                return i;
            }
            // First token starting at or after the cursor; this also covers
            // a cursor sitting in the whitespace between two tokens
            if span.start >= cursor {
                return i;
            }
        }
        // The lexer always ends the stream with an EOF token at the end of
        // the input, so this is only hit on an empty token list
        tokens.len().saturating_sub(1)
    }

    /// Get all tokens before the cursor (excluding the token at cursor)
    pub fn tokens_before_cursor(&self) -> &[Token] {
        &self.tokens[..self.token_index]
    }

    /// Get the current token (the one at or after the cursor)
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.token_index)
    }

    /// Get the identifier prefix being typed at the cursor.
    ///
    /// Covers both the cursor sitting inside an identifier and the cursor
    /// sitting exactly at the end of one.
    pub fn current_prefix(&self) -> String {
        if let Some(token) = self.current_token() {
            let span = &token.span;
            if matches!(token.kind, TokenKind::Ident(_))
                && self.cursor >= span.start
                && self.cursor <= span.end
            {
                return self.line[span.start..self.cursor].to_string();
            }
        }

        // Cursor right after a fully typed identifier (current token is the
        // next one, usually EOF)
        if self.token_index > 0 {
            if let Some(prev) = self.tokens.get(self.token_index - 1) {
                if self.cursor == prev.span.end {
                    if let TokenKind::Ident(ident) = &prev.kind {
                        return ident.clone();
                    }
                }
            }
        }

        String::new()
    }

    /// Index of the identifier token the current prefix comes from.
    pub fn prefix_token_index(&self) -> Option<usize> {
        if let Some(token) = self.current_token() {
            if matches!(token.kind, TokenKind::Ident(_))
                && self.cursor >= token.span.start
                && self.cursor <= token.span.end
            {
                return Some(self.token_index);
            }
        }
        if self.token_index > 0 {
            let prev = &self.tokens[self.token_index - 1];
            if matches!(prev.kind, TokenKind::Ident(_)) && self.cursor == prev.span.end {
                return Some(self.token_index - 1);
            }
        }
        None
    }

    /// Detect a subscript string the cursor sits inside.
    ///
    /// Returns the index of the opening `[` token and the partial item path
    /// typed so far (the text between the opening quote and the cursor).
    pub fn open_subscript(&self) -> Option<(usize, String)> {
        let (str_idx, token) = self.string_at_cursor()?;
        if str_idx == 0 {
            return None;
        }
        if !matches!(self.tokens[str_idx - 1].kind, TokenKind::LBracket) {
            return None;
        }
        // Skip the opening quote (one byte, ' or ")
        let partial = self.line[token.span.start + 1..self.cursor].to_string();
        Some((str_idx - 1, partial))
    }

    /// The string token whose quotes the cursor is between, if any.
    fn string_at_cursor(&self) -> Option<(usize, &Token)> {
        if let Some(token) = self.current_token() {
            if let TokenKind::Str { terminated, .. } = token.kind {
                let span = &token.span;
                let inside = self.cursor > span.start
                    && if terminated {
                        self.cursor < span.end
                    } else {
                        self.cursor <= span.end
                    };
                if inside {
                    return Some((self.token_index, token));
                }
            }
        }

        // Unterminated string running to the end of the line: the cursor sits
        // at its end, so the "current" token is already EOF
        if self.token_index > 0 {
            let idx = self.token_index - 1;
            let prev = &self.tokens[idx];
            if let TokenKind::Str {
                terminated: false, ..
            } = prev.kind
            {
                if self.cursor == prev.span.end {
                    return Some((idx, prev));
                }
            }
        }

        None
    }

    /// Detect a member access at the cursor: `expr.<prefix>` or `expr.`.
    ///
    /// Returns the index of the `.` token and the member prefix typed so far.
    pub fn member_access(&self) -> Option<(usize, String)> {
        // Cursor inside (or at the start of) an identifier preceded by a dot
        if let Some(token) = self.current_token() {
            if matches!(token.kind, TokenKind::Ident(_))
                && self.cursor >= token.span.start
                && self.cursor <= token.span.end
                && self.token_index > 0
                && matches!(self.tokens[self.token_index - 1].kind, TokenKind::Dot)
            {
                let prefix = self.line[token.span.start..self.cursor].to_string();
                return Some((self.token_index - 1, prefix));
            }
        }

        if self.token_index > 0 {
            let prev_idx = self.token_index - 1;
            let prev = &self.tokens[prev_idx];
            if self.cursor == prev.span.end {
                // Cursor right after the dot itself
                if matches!(prev.kind, TokenKind::Dot) {
                    return Some((prev_idx, String::new()));
                }
                // Cursor right after a fully typed member name
                if matches!(prev.kind, TokenKind::Ident(_))
                    && prev_idx > 0
                    && matches!(self.tokens[prev_idx - 1].kind, TokenKind::Dot)
                {
                    if let TokenKind::Ident(ident) = &prev.kind {
                        return Some((prev_idx - 1, ident.clone()));
                    }
                }
            }
        }

        None
    }

    /// Extract the base expression ending just before `end_idx`.
    ///
    /// Walks backwards over subscript and member chains and stops at the
    /// first token that cannot belong to the base. An `=` never joins the
    /// base, so assignment prefixes like `g = f['x'].` fall away naturally.
    pub fn base_expr(&self, end_idx: usize) -> Option<String> {
        if end_idx == 0 {
            return None;
        }

        let mut start = end_idx;
        let mut i = end_idx;
        while i > 0 {
            i -= 1;
            match &self.tokens[i].kind {
                TokenKind::Dot
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Str { .. } => {
                    start = i;
                }
                TokenKind::Ident(_) => {
                    start = i;
                    // An identifier continues the chain only as a member
                    // access; otherwise it is the head of the expression
                    if i == 0 || !matches!(self.tokens[i - 1].kind, TokenKind::Dot) {
                        break;
                    }
                }
                _ => break,
            }
        }

        if !matches!(self.tokens[start].kind, TokenKind::Ident(_)) {
            return None;
        }

        let range: Range<usize> = self.tokens[start].span.start..self.tokens[end_idx - 1].span.end;
        Some(self.line[range].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_before_cursor() {
        // Tokens: Ident("f")(0..1), LBracket(1..2), Str(2..6), EOF
        let stream = TokenStream::new("f['ab", 2);
        assert_eq!(stream.tokens_before_cursor().len(), 2);
    }

    #[test]
    fn test_cursor_in_gap_excludes_later_tokens() {
        // Tokens: Ident("ls")(0..2), Ident("f")(4..5), EOF
        let stream = TokenStream::new("ls  f", 3);
        assert_eq!(stream.tokens_before_cursor().len(), 1);
        assert!(matches!(
            stream.current_token().unwrap().kind,
            TokenKind::Ident(_)
        ));
    }

    #[test]
    fn test_current_prefix_mid_ident() {
        let stream = TokenStream::new("ls foo", 5);
        assert_eq!(stream.current_prefix(), "fo");
    }

    #[test]
    fn test_current_prefix_after_ident() {
        let stream = TokenStream::new("ls foo", 6);
        assert_eq!(stream.current_prefix(), "foo");
    }

    #[test]
    fn test_current_prefix_none_after_space() {
        let stream = TokenStream::new("ls ", 3);
        assert_eq!(stream.current_prefix(), "");
    }

    #[test]
    fn test_open_subscript_empty_partial() {
        let stream = TokenStream::new("f['", 3);
        let (lbracket, partial) = stream.open_subscript().unwrap();
        assert_eq!(lbracket, 1);
        assert_eq!(partial, "");
    }

    #[test]
    fn test_open_subscript_with_partial_path() {
        let line = "ls f['grp/da";
        let stream = TokenStream::new(line, line.len());
        let (_, partial) = stream.open_subscript().unwrap();
        assert_eq!(partial, "grp/da");
    }

    #[test]
    fn test_open_subscript_inside_terminated_string() {
        // Cursor between the quotes of a terminated string
        let stream = TokenStream::new("f['grp']", 6);
        let (lbracket, partial) = stream.open_subscript().unwrap();
        assert_eq!(lbracket, 1);
        assert_eq!(partial, "grp");
    }

    #[test]
    fn test_no_open_subscript_outside_quotes() {
        let stream = TokenStream::new("f['grp']", 8);
        assert!(stream.open_subscript().is_none());

        let stream = TokenStream::new("f[", 2);
        assert!(stream.open_subscript().is_none());
    }

    #[test]
    fn test_member_access_after_dot() {
        let line = "f['grp'].";
        let stream = TokenStream::new(line, line.len());
        let (dot, prefix) = stream.member_access().unwrap();
        assert_eq!(prefix, "");
        assert!(matches!(stream.tokens[dot].kind, TokenKind::Dot));
    }

    #[test]
    fn test_member_access_with_prefix() {
        let line = "f['grp'].at";
        let stream = TokenStream::new(line, line.len());
        let (_, prefix) = stream.member_access().unwrap();
        assert_eq!(prefix, "at");
    }

    #[test]
    fn test_member_access_mid_ident() {
        let stream = TokenStream::new("f.attrs", 4);
        let (_, prefix) = stream.member_access().unwrap();
        assert_eq!(prefix, "at");
    }

    #[test]
    fn test_no_member_access_on_plain_ident() {
        let stream = TokenStream::new("attrs", 5);
        assert!(stream.member_access().is_none());
    }

    #[test]
    fn test_base_expr_simple() {
        let line = "ls f['";
        let stream = TokenStream::new(line, line.len());
        let (lbracket, _) = stream.open_subscript().unwrap();
        assert_eq!(stream.base_expr(lbracket).unwrap(), "f");
    }

    #[test]
    fn test_base_expr_chained() {
        let line = "g = f['grp'].attrs.";
        let stream = TokenStream::new(line, line.len());
        let (dot, _) = stream.member_access().unwrap();
        assert_eq!(stream.base_expr(dot).unwrap(), "f['grp'].attrs");
    }

    #[test]
    fn test_base_expr_stops_at_assignment() {
        let line = "a = b = f['x'].";
        let stream = TokenStream::new(line, line.len());
        let (dot, _) = stream.member_access().unwrap();
        assert_eq!(stream.base_expr(dot).unwrap(), "f['x']");
    }

    #[test]
    fn test_base_expr_rejects_non_ident_head() {
        let line = "1['";
        let stream = TokenStream::new(line, line.len());
        if let Some((lbracket, _)) = stream.open_subscript() {
            assert!(stream.base_expr(lbracket).is_none());
        }
    }
}
