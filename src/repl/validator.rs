//! Validator for reedline - validates line completeness

use reedline::{ValidationResult, Validator};

/// h5sh validator for reedline
///
/// Lines with unbalanced brackets or an open string are treated as
/// incomplete so a stray Enter does not fire a half-typed expression.
pub struct H5Validator;

impl H5Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check if input has balanced brackets outside of string literals
    fn is_balanced(&self, input: &str) -> bool {
        let mut paren_count = 0i32;
        let mut bracket_count = 0i32;
        let mut in_string = false;
        let mut escape_next = false;
        let mut string_char = ' ';

        for ch in input.chars() {
            if escape_next {
                escape_next = false;
                continue;
            }

            if ch == '\\' {
                escape_next = true;
                continue;
            }

            if ch == '"' || ch == '\'' {
                if in_string && ch == string_char {
                    in_string = false;
                } else if !in_string {
                    in_string = true;
                    string_char = ch;
                }
                continue;
            }

            if in_string {
                continue;
            }

            match ch {
                '(' => paren_count += 1,
                ')' => paren_count -= 1,
                '[' => bracket_count += 1,
                ']' => bracket_count -= 1,
                _ => {}
            }
        }

        !in_string && paren_count == 0 && bracket_count == 0
    }
}

impl Default for H5Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for H5Validator {
    fn validate(&self, line: &str) -> ValidationResult {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return ValidationResult::Complete;
        }

        if !self.is_balanced(trimmed) {
            return ValidationResult::Incomplete;
        }

        ValidationResult::Complete
    }
}
