// Failure Diagnostic Value

use serde::{Deserialize, Serialize};

/// Structured explanation of a failed repair.
///
/// `command` holds the exact command line that was running when the failure
/// was classified, so the user can reproduce it in a terminal verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub title: String,
    pub message: String,
    pub command: String,
    pub output: String,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        command: impl Into<String>,
        output: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            command: command.into(),
            output: output.into(),
            suggestions,
        }
    }
}
