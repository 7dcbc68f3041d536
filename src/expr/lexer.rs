//! Error-tolerant lexer for shell expressions.
//!
//! Handles subscript/member syntax like `f['grp/dset'].attrs.units`. It is
//! extremely forgiving and never panics, making it ideal for autocomplete
//! scenarios where the input is incomplete by definition.
//!
//! # Design Principles
//!
//! - **Never panic** - always return a valid token stream
//! - **Never reject input** - unknown characters become `Unknown` tokens,
//!   unterminated strings become string tokens flagged as open
//! - **Byte-accurate spans** - spans are byte ranges into the original line,
//!   so they compose directly with the line editor's cursor position

use std::ops::Range;

/// Token types for shell expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier (variable, command word, member name)
    Ident(String),
    /// Dot separator
    Dot,
    /// Left bracket
    LBracket,
    /// Right bracket
    RBracket,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Assignment
    Eq,
    /// Comma
    Comma,
    /// String literal; `terminated` is false when the closing quote has not
    /// been typed yet, which is exactly the state item completion fires in
    Str {
        value: String,
        quote: char,
        terminated: bool,
    },
    /// Number literal
    Number(String),
    /// End of input
    Eof,
    /// Unknown character
    Unknown(char),
}

/// Token with byte-span information.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }
}

/// Expression lexer - error-tolerant tokenizer.
pub struct ExprLexer<'a> {
    /// (byte offset, char) pairs of the input
    chars: Vec<(usize, char)>,
    /// Total byte length of the input
    len: usize,
    /// Index into `chars`
    pos: usize,
    input: &'a str,
}

impl<'a> ExprLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().collect(),
            len: input.len(),
            pos: 0,
            input,
        }
    }

    /// Tokenize the entire input, ending with an `Eof` token.
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = ExprLexer::new(input);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token();
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.byte_offset();

        if self.is_at_end() {
            return Token::new(TokenKind::Eof, start..start);
        }

        let ch = self.current_char();

        match ch {
            '.' => self.single(TokenKind::Dot, start),
            '[' => self.single(TokenKind::LBracket, start),
            ']' => self.single(TokenKind::RBracket, start),
            '(' => self.single(TokenKind::LParen, start),
            ')' => self.single(TokenKind::RParen, start),
            '=' => self.single(TokenKind::Eq, start),
            ',' => self.single(TokenKind::Comma, start),
            '\'' | '"' => self.scan_string(ch, start),
            '0'..='9' => self.scan_number(start),
            c if c.is_alphanumeric() || c == '_' => self.scan_identifier(start),
            _ => {
                self.advance();
                Token::new(TokenKind::Unknown(ch), start..self.byte_offset())
            }
        }
    }

    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        self.advance();
        Token::new(kind, start..self.byte_offset())
    }

    /// Scan a string literal. The value is kept raw (escapes untouched): the
    /// completer needs the text exactly as typed, and item names carry no
    /// escape semantics.
    fn scan_string(&mut self, quote: char, start: usize) -> Token {
        self.advance(); // opening quote

        let mut value = String::new();
        let mut terminated = false;

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch == quote {
                self.advance();
                terminated = true;
                break;
            }
            if ch == '\\' {
                value.push(ch);
                self.advance();
                if !self.is_at_end() {
                    value.push(self.current_char());
                    self.advance();
                }
                continue;
            }
            value.push(ch);
            self.advance();
        }

        Token::new(
            TokenKind::Str {
                value,
                quote,
                terminated,
            },
            start..self.byte_offset(),
        )
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut value = String::new();

        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            value.push(self.current_char());
            self.advance();
        }

        if self.current_char() == '.' && self.peek_char().is_ascii_digit() {
            value.push('.');
            self.advance();
            while !self.is_at_end() && self.current_char().is_ascii_digit() {
                value.push(self.current_char());
                self.advance();
            }
        }

        Token::new(TokenKind::Number(value), start..self.byte_offset())
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Ident(value), start..self.byte_offset())
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Byte offset of the current position.
    fn byte_offset(&self) -> usize {
        if self.is_at_end() {
            self.len
        } else {
            self.chars[self.pos].0
        }
    }

    fn current_char(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos].1
        }
    }

    fn peek_char(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1].1
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    #[allow(dead_code)]
    pub fn source(&self) -> &'a str {
        self.input
    }
}
