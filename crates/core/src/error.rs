// Central Error Type for the Engine

use thiserror::Error;

/// Engine-level error type
///
/// External command failures are NOT errors: they travel as data inside
/// `RepairOutcome`. Errors here are caller contract violations and lane
/// lifecycle conditions only.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repair lane closed before the outcome was delivered")]
    LaneClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
