// Domain Layer - Pure values, no side effects

pub mod assessment;
pub mod command;
pub mod diagnostic;
pub mod outcome;

// Re-exports
pub use assessment::{TrustAssessment, TrustStatus};
pub use command::{CommandInvocation, CommandResult, CommandStatus};
pub use diagnostic::Diagnostic;
pub use outcome::RepairOutcome;
