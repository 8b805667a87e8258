use inquire::Text;

use crate::error::Result;

/// Source of interactive answers for fields left off the command line
pub trait Prompt {
    /// Ask for a single line of text
    fn text(&self, message: &str) -> Result<String>;
}

/// Terminal prompt backed by `inquire`
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn text(&self, message: &str) -> Result<String> {
        Ok(Text::new(message).prompt()?)
    }
}

/// Use `value` when it is non-blank, otherwise ask for it. The result is trimmed.
pub fn value_or_prompt(prompt: &impl Prompt, value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Ok(prompt.text(message)?.trim().to_string()),
    }
}
