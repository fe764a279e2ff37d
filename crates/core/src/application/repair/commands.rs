// Gatekeeper command lines (no magic values)

use crate::domain::CommandInvocation;

/// Extended-attribute management binary
pub const XATTR_BIN: &str = "/usr/bin/xattr";

/// Execution-policy assessment binary
pub const SPCTL_BIN: &str = "/usr/sbin/spctl";

/// The quarantine marker attribute Gatekeeper acts on
pub const QUARANTINE_ATTR: &str = "com.apple.quarantine";

/// Recursively clear all extended attributes on the bundle, quarantine
/// marker included.
pub fn strip(bundle_path: &str) -> CommandInvocation {
    CommandInvocation::new(XATTR_BIN, vec!["-cr".to_string(), bundle_path.to_string()])
}

/// Ask Gatekeeper whether the bundle is currently allowed to execute.
pub fn assess(bundle_path: &str) -> CommandInvocation {
    CommandInvocation::new(
        SPCTL_BIN,
        vec![
            "--assess".to_string(),
            "--type".to_string(),
            "execute".to_string(),
            bundle_path.to_string(),
        ],
    )
}

/// Read the quarantine attribute; exit 0 means the marker exists.
pub fn probe(bundle_path: &str) -> CommandInvocation {
    CommandInvocation::new(
        XATTR_BIN,
        vec![
            "-p".to_string(),
            QUARANTINE_ATTR.to_string(),
            bundle_path.to_string(),
        ],
    )
}
