//! Terminal interaction for the menu: clearing the screen, reading a choice and
//! waiting for a key press.

use crate::error::Result;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};

/// The terminal operations the menu loop needs.
///
/// Implementations must report Ctrl+C as an error for which
/// [`AppError::is_interrupt`](crate::error::AppError::is_interrupt) returns `true`.
pub trait Prompter {
    /// Clears the visible output area.
    fn clear_screen(&self) -> Result<()>;

    /// Reads one line of input, already trimmed.
    fn read_choice(&self, prompt: &str) -> Result<String>;

    /// Prints `message` and blocks until any key is pressed.
    fn pause(&self, message: &str) -> Result<()>;
}

/// [`Prompter`] backed by the real terminal (`dialoguer` + `console`).
pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            theme: ColorfulTheme::default(),
        }
    }

    /// Restores the cursor, which `dialoguer` hides while a prompt is active.
    pub fn restore(&self) {
        let _ = self.term.show_cursor();
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn clear_screen(&self) -> Result<()> {
        self.term.clear_screen()?;
        Ok(())
    }

    fn read_choice(&self, prompt: &str) -> Result<String> {
        let input: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(input.trim().to_string())
    }

    fn pause(&self, message: &str) -> Result<()> {
        self.term.write_line(message)?;
        // Raw-mode read: Ctrl+C comes back as an `Interrupted` error.
        self.term.read_key()?;
        Ok(())
    }
}
