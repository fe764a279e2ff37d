// Repair Outcome

use serde::{Deserialize, Serialize};

use super::diagnostic::Diagnostic;

/// Terminal result of one repair attempt. Never retried automatically.
///
/// A `Diagnostic` exists if and only if the outcome is `Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepairOutcome {
    Success,
    Failure(Diagnostic),
}

impl RepairOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RepairOutcome::Success)
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            RepairOutcome::Success => None,
            RepairOutcome::Failure(d) => Some(d),
        }
    }
}
