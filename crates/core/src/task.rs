//! Field validation for task pads and tasks.

use crate::error::CoreError;

/// Maximum length (in characters) of a pad or task title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length (in characters) of a task's text body.
pub const MAX_TASK_TEXT_LEN: usize = 2000;

/// Accepted values for the optional task priority.
pub const PRIORITIES: &[&str] = &["low", "medium", "high"];

/// Validate a pad or task title: not blank, at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_text("title", title, MAX_TITLE_LEN)
}

/// Validate a task's text: not blank, at most [`MAX_TASK_TEXT_LEN`] characters.
pub fn validate_task_text(text: &str) -> Result<(), CoreError> {
    validate_text("taskText", text, MAX_TASK_TEXT_LEN)
}

/// Validate a priority against [`PRIORITIES`].
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority '{priority}'. Must be one of: {}",
            PRIORITIES.join(", ")
        )))
    }
}

/// Derive a title from task text when the client only sends the text.
///
/// The text is trimmed and cut to [`MAX_TITLE_LEN`] characters.
pub fn title_from_text(text: &str) -> String {
    text.trim().chars().take(MAX_TITLE_LEN).collect()
}

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters, got {len}"
        )));
    }
    Ok(())
}
