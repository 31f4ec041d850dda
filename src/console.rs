//! Line input for the interactive parts of the program.
//!
//! The menu and the playback loop only need "give me the next line". In
//! the terminal that is a rustyline editor; in tests it is a script.

use anyhow::{Context, Result};
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// A source of user input lines.
pub trait LineSource {
    /// Show `prompt` and read one line, without the trailing newline.
    /// `None` means the user is done (Ctrl-C, Ctrl-D, end of script).
    ///
    /// # Errors
    ///
    /// The underlying terminal failed.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => {
                remember(self, &line);
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e).context("Failed to read terminal input"),
        }
    }
}

/// Adds non-blank lines to the editor history.
fn remember(editor: &mut DefaultEditor, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    if let Err(e) = editor.add_history_entry(line) {
        debug!("Could not add '{line}' to input history: {e}");
    }
}

/// Opens the terminal editor used by `menu` and `play`.
///
/// # Errors
///
/// The terminal could not be set up.
pub fn terminal() -> Result<DefaultEditor> {
    DefaultEditor::new().context("Failed to initialize terminal input")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rustyline::history::History;
    use std::collections::VecDeque;

    /// Pre-recorded input. Remembers every prompt it was shown.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct ScriptedInput {
        lines: VecDeque<String>,
        prompts: Vec<String>,
    }

    impl ScriptedInput {
        pub(crate) fn new<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                lines: lines.into_iter().map(Into::into).collect(),
                prompts: Vec::new(),
            }
        }

        pub(crate) fn prompts(&self) -> &[String] {
            &self.prompts
        }

        /// Lines not consumed yet.
        pub(crate) fn remaining(&self) -> usize {
            self.lines.len()
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.lines.pop_front())
        }
    }

    #[test]
    fn test_history_keeps_non_blank_lines() -> Result<()> {
        let mut editor = DefaultEditor::new()?;
        remember(&mut editor, "2");
        remember(&mut editor, "   ");
        remember(&mut editor, "");
        remember(&mut editor, "play some pop");
        assert_eq!(editor.history().len(), 2);
        Ok(())
    }

    #[test]
    fn test_scripted_input_replays_in_order() -> Result<()> {
        let mut input = ScriptedInput::new(["1", "Hello"]);
        assert_eq!(input.read_line("a: ")?.as_deref(), Some("1"));
        assert_eq!(input.read_line("b: ")?.as_deref(), Some("Hello"));
        assert_eq!(input.read_line("c: ")?, None);
        assert_eq!(input.prompts(), ["a: ", "b: ", "c: "]);
        assert_eq!(input.remaining(), 0);
        Ok(())
    }
}
