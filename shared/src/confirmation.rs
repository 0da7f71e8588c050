use dialoguer::Confirm;
use crate::types::Result;

/// Standardized confirmation prompt used across commands.
pub fn ask_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let choice = Confirm::new()
        .with_prompt(prompt)
        .default(default_yes)
        .show_default(true)
        .interact()?;
    Ok(choice)
}

/// Skips the prompt entirely when the caller already passed `--yes`.
pub fn confirm_unless_assumed(assume_yes: bool, prompt: &str) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    ask_confirmation(prompt, false)
}
