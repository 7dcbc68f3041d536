//! Syntax highlighter for shell commands and item expressions

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

/// Highlights command words, member names, strings, and punctuation
pub struct SyntaxHighlighter {
    enabled: bool,
}

/// Shell command words
const KEYWORDS: &[&str] = &[
    "attrs", "close", "exit", "format", "help", "ls", "open", "quit", "show", "as",
];

/// Member names valid after a dot
const MEMBERS: &[&str] = &[
    "attrs", "dtype", "keys", "len", "name", "shape", "size",
];

impl SyntaxHighlighter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn style_for_word(word: &str, after_dot: bool) -> Style {
        if after_dot {
            if MEMBERS.contains(&word) {
                Color::Green.into()
            } else {
                Style::default()
            }
        } else if KEYWORDS.contains(&word) {
            Color::Blue.bold().into()
        } else {
            Style::default()
        }
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let mut current_word = String::new();
        let mut string_buffer = String::new();
        let mut in_string = false;
        let mut string_delimiter = ' ';
        let mut escape_next = false;
        let mut after_dot = false;

        for ch in line.chars() {
            if in_string {
                if escape_next {
                    string_buffer.push(ch);
                    escape_next = false;
                    continue;
                }
                if ch == '\\' {
                    string_buffer.push(ch);
                    escape_next = true;
                    continue;
                }
                string_buffer.push(ch);
                if ch == string_delimiter {
                    styled.push((Color::Yellow.into(), string_buffer.clone()));
                    string_buffer.clear();
                    in_string = false;
                }
                continue;
            }

            if ch == '"' || ch == '\'' {
                if !current_word.is_empty() {
                    styled.push((
                        Self::style_for_word(&current_word, after_dot),
                        current_word.clone(),
                    ));
                    current_word.clear();
                }
                in_string = true;
                string_delimiter = ch;
                string_buffer.push(ch);
                continue;
            }

            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                current_word.push(ch);
                continue;
            }

            if !current_word.is_empty() {
                styled.push((
                    Self::style_for_word(&current_word, after_dot),
                    current_word.clone(),
                ));
                current_word.clear();
            }

            let style: Style = match ch {
                '[' | ']' | '(' | ')' => Color::Cyan.into(),
                '.' | ',' => Color::DarkGray.into(),
                '=' | '/' => Color::Magenta.into(),
                _ => Style::default(),
            };
            after_dot = ch == '.';
            styled.push((style, ch.to_string()));
        }

        // Flush trailing word or open string
        if !current_word.is_empty() {
            styled.push((
                Self::style_for_word(&current_word, after_dot),
                current_word,
            ));
        }
        if !string_buffer.is_empty() {
            styled.push((Color::Yellow.into(), string_buffer));
        }

        styled
    }
}
