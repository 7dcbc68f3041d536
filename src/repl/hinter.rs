//! Hinter for reedline - provides inline hints based on history

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

/// History-based hinter showing the rest of the closest past command
pub struct H5Hinter {
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
}

impl H5Hinter {
    pub fn new() -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }
}

impl Default for H5Hinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Hinter for H5Hinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        // Only hint at the end of a non-empty line
        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let search_result = history
            .search(reedline::SearchQuery::last_with_prefix(
                line.to_string(),
                None,
            ))
            .ok()
            .and_then(|results| results.into_iter().next());

        if let Some(history_item) = search_result {
            let history_line = history_item.command_line.as_str();

            if history_line.len() > line.len() && history_line.starts_with(line) {
                let hint = &history_line[line.len()..];
                self.current_hint = hint.to_string();

                if use_ansi_coloring {
                    return self.style.paint(hint).to_string();
                } else {
                    return hint.to_string();
                }
            }
        }

        String::new()
    }

    fn next_hint_token(&self) -> String {
        String::new()
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }
}
