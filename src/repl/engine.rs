//! REPL engine for interactive command execution

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use crate::config::Config;
use crate::error::{H5shError, Result};
use crate::executor::Executor;
use crate::formatter::{Colorizer, Formatter};
use crate::parser::{Command, Parser};

use super::completer::H5Completer;
use super::highlighter::SyntaxHighlighter;
use super::hinter::H5Hinter;
use super::prompt::H5Prompt;
use super::shared_state::SharedState;
use super::validator::H5Validator;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive command execution
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Shared state between editor components and the executor
    shared_state: SharedState,

    /// Parser for command parsing
    parser: Parser,

    /// Executor running parsed commands against the session
    executor: Executor,
}

impl ReplEngine {
    /// Create a new REPL engine with shared state.
    pub fn new(shared_state: SharedState, config: &Config) -> Result<Self> {
        let completer = H5Completer::new(
            shared_state.clone(),
            config.completion.hide_underscore_attrs,
        );

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        // TAB opens the menu, then cycles through candidates
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let history = if config.history.persist {
            FileBackedHistory::with_file(config.history.max_size, config.history.file_path.clone())
        } else {
            FileBackedHistory::new(config.history.max_size)
        }
        .map_err(|e| H5shError::Generic(format!("History setup failed: {e}")))?;

        let editor = Reedline::create()
            .with_completer(Box::new(completer))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_history(Box::new(history))
            .with_hinter(Box::new(H5Hinter::new()))
            .with_highlighter(Box::new(SyntaxHighlighter::new(
                config.display.syntax_highlighting,
            )))
            .with_validator(Box::new(H5Validator::new()));

        let executor = Executor::new(shared_state.clone());

        Ok(Self {
            editor,
            shared_state,
            parser: Parser::new(),
            executor,
        })
    }

    /// Run the read-eval-print loop until exit or EOF.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let prompt = self.generate_prompt();

            match self.editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    if !self.handle_input(input) {
                        break;
                    }
                }
                Signal::CtrlC => {
                    // Discard the current line and re-prompt
                    continue;
                }
                Signal::CtrlD => {
                    println!("bye");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Parse, execute, and print one line. Returns false on `exit`.
    fn handle_input(&mut self, input: &str) -> bool {
        let colorizer = Colorizer::new(self.shared_state.colors());

        let command = match self.parser.parse(input) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{}", colorizer.error(&err.to_string()));
                return true;
            }
        };

        if matches!(command, Command::Exit) {
            println!("bye");
            return false;
        }

        debug!(%input, "executing command");
        let result = self.executor.execute(command);

        let formatter = Formatter::new(self.shared_state.format(), self.shared_state.colors());
        match formatter.format(&result) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
            }
            Err(err) => eprintln!("{}", colorizer.error(&err.to_string())),
        }

        true
    }

    /// Build the prompt from the currently open files.
    fn generate_prompt(&self) -> H5Prompt {
        let variables: Vec<String> = {
            let session = self
                .shared_state
                .session
                .read()
                .unwrap_or_else(|e| e.into_inner());
            session.files().iter().map(|f| f.variable.clone()).collect()
        };
        H5Prompt::new(H5Prompt::label_for(&variables))
    }
}
