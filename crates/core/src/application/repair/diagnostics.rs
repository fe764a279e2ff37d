// Diagnostic construction for each failure class

use crate::domain::{CommandInvocation, CommandResult, Diagnostic, TrustAssessment};

/// The attribute strip itself failed; the workflow halted before assessment.
pub fn strip_failed(invocation: &CommandInvocation, result: &CommandResult) -> Diagnostic {
    Diagnostic::new(
        "Removing extended attributes failed",
        "Running xattr -cr on the bundle returned an error.",
        invocation.render(),
        result.detail_text(),
        vec![
            "Grant Unseal Full Disk Access in System Settings.".to_string(),
            "Verify that the application path is correct.".to_string(),
            "Re-download the application and try the repair again.".to_string(),
        ],
    )
}

/// Gatekeeper still rejects the bundle and the quarantine marker is
/// confirmed present. The user can override this through system settings.
pub fn trust_blocked(invocation: &CommandInvocation, assessment: &TrustAssessment) -> Diagnostic {
    Diagnostic::new(
        "Gatekeeper assessment failed",
        "The system still considers this application unsafe.",
        invocation.render(),
        assessment.details.clone(),
        vec![
            "Re-download the application or ask the publisher for a new build.".to_string(),
            "Allow the application under Privacy & Security in System Settings.".to_string(),
            "Only run applications from sources you trust.".to_string(),
        ],
    )
}

/// Assessment was rejected but the marker could not be confirmed. A
/// security override will not help here, so the advice is different.
pub fn trust_unknown(invocation: &CommandInvocation, assessment: &TrustAssessment) -> Diagnostic {
    Diagnostic::new(
        "Assessment status unknown",
        "The application's status could not be confirmed after the repair. Verify it manually.",
        invocation.render(),
        assessment.details.clone(),
        vec![
            "Run the command above in a terminal and inspect its output.".to_string(),
            "Check the system logs for more information.".to_string(),
            "If the problem persists, contact Apple Support.".to_string(),
        ],
    )
}
