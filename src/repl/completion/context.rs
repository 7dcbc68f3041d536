//! Completion context definitions
//!
//! The completion context is the standardized representation of what kind of
//! candidates the cursor position calls for.

/// Represents the type of completion needed based on the current context
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionContext {
    /// Complete item names inside a subscript string: `expr['partial`
    Item {
        /// Base expression before the `[`
        base: String,
        /// Partial item path typed inside the quotes (may contain `/`)
        partial: String,
    },

    /// Complete member names after a dot: `expr.prefix`
    Attribute {
        /// Base expression before the `.`
        base: String,
        /// Prefix to filter members
        prefix: String,
    },

    /// Complete session variable names
    Variable {
        /// Prefix to filter variables
        prefix: String,
    },

    /// Complete "show" subcommands (files, vars, format)
    ShowSubcommand {
        /// Prefix to filter subcommands
        prefix: String,
    },

    /// Complete output format names after "format"
    FormatMode {
        /// Prefix to filter modes
        prefix: String,
    },

    /// Complete top-level commands and variables at the start of a line
    Command {
        /// Prefix to filter commands
        prefix: String,
    },

    /// No completion available
    None,
}

impl CompletionContext {
    pub fn item(base: impl Into<String>, partial: impl Into<String>) -> Self {
        Self::Item {
            base: base.into(),
            partial: partial.into(),
        }
    }

    pub fn attribute(base: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::Attribute {
            base: base.into(),
            prefix: prefix.into(),
        }
    }

    pub fn variable(prefix: impl Into<String>) -> Self {
        Self::Variable {
            prefix: prefix.into(),
        }
    }

    pub fn show_subcommand(prefix: impl Into<String>) -> Self {
        Self::ShowSubcommand {
            prefix: prefix.into(),
        }
    }

    pub fn format_mode(prefix: impl Into<String>) -> Self {
        Self::FormatMode {
            prefix: prefix.into(),
        }
    }

    pub fn command(prefix: impl Into<String>) -> Self {
        Self::Command {
            prefix: prefix.into(),
        }
    }

    /// The text the completion replaces; its byte length positions the
    /// replacement span.
    pub fn prefix(&self) -> &str {
        match self {
            Self::Item { partial, .. } => partial,
            Self::Attribute { prefix, .. } => prefix,
            Self::Variable { prefix } => prefix,
            Self::ShowSubcommand { prefix } => prefix,
            Self::FormatMode { prefix } => prefix,
            Self::Command { prefix } => prefix,
            Self::None => "",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_context() {
        let ctx = CompletionContext::item("f", "grp/da");
        assert_eq!(ctx.prefix(), "grp/da");
        assert!(!ctx.is_none());

        if let CompletionContext::Item { base, partial } = ctx {
            assert_eq!(base, "f");
            assert_eq!(partial, "grp/da");
        } else {
            panic!("Expected Item context");
        }
    }

    #[test]
    fn test_attribute_context() {
        let ctx = CompletionContext::attribute("f['grp']", "at");
        assert_eq!(ctx.prefix(), "at");

        if let CompletionContext::Attribute { base, prefix } = ctx {
            assert_eq!(base, "f['grp']");
            assert_eq!(prefix, "at");
        } else {
            panic!("Expected Attribute context");
        }
    }

    #[test]
    fn test_none_context() {
        let ctx = CompletionContext::None;
        assert_eq!(ctx.prefix(), "");
        assert!(ctx.is_none());
    }

    #[test]
    fn test_context_equality() {
        assert_eq!(
            CompletionContext::variable("f"),
            CompletionContext::variable("f")
        );
        assert_ne!(
            CompletionContext::variable("f"),
            CompletionContext::variable("g")
        );
    }
}
