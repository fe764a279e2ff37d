// Trust Assessment Values

use serde::{Deserialize, Serialize};

/// Gatekeeper's verdict on a bundle after repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustStatus {
    /// The system accepts the bundle for execution
    Clean,
    /// The system rejects the bundle and the quarantine marker is confirmed present
    Blocked,
    /// The system rejected the bundle but the marker's presence could not be confirmed
    Unknown,
}

impl std::fmt::Display for TrustStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustStatus::Clean => write!(f, "CLEAN"),
            TrustStatus::Blocked => write!(f, "BLOCKED"),
            TrustStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Tri-state trust classification plus the diagnostic transcript that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustAssessment {
    pub status: TrustStatus,
    pub details: String,
}

impl TrustAssessment {
    pub fn new(status: TrustStatus, details: impl Into<String>) -> Self {
        Self {
            status,
            details: details.into(),
        }
    }
}
