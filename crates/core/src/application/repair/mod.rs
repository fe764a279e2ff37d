// Repair Engine - strip, assess, probe

pub mod commands;
mod diagnostics;

use crate::domain::{CommandInvocation, RepairOutcome, TrustAssessment, TrustStatus};
use crate::error::{CoreError, Result};
use crate::port::CommandRunner;
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrates the quarantine repair workflow on top of a `CommandRunner`.
///
/// Stateless between invocations: each `repair` call performs exactly one
/// strip -> assess (-> probe) pass and returns a terminal `RepairOutcome`.
/// Retrying is the caller's decision.
pub struct RepairEngine {
    runner: Arc<dyn CommandRunner>,
}

impl RepairEngine {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Repair one bundle.
    ///
    /// Every external-command failure becomes data inside the outcome.
    /// `Err` is reserved for caller contract violations (empty path).
    ///
    /// # Errors
    /// - `CoreError::Validation` if `bundle_path` is empty or contains NUL
    pub async fn repair(&self, bundle_path: &str) -> Result<RepairOutcome> {
        validate_bundle_path(bundle_path)?;

        info!(bundle_path = %bundle_path, "Starting quarantine repair");

        // Step 1: strip. Failure halts the workflow; assessment never runs.
        let strip = commands::strip(bundle_path);
        let strip_result = self.runner.run(&strip).await;

        if !strip_result.succeeded() {
            warn!(
                bundle_path = %bundle_path,
                status = ?strip_result.status,
                "Attribute strip failed, halting repair"
            );
            return Ok(RepairOutcome::Failure(diagnostics::strip_failed(
                &strip,
                &strip_result,
            )));
        }

        // Step 2 (+3): assess, probing on rejection to split blocked/unknown
        let assess = commands::assess(bundle_path);
        let assessment = self.assess_with(bundle_path, &assess).await;

        let outcome = match assessment.status {
            TrustStatus::Clean => RepairOutcome::Success,
            TrustStatus::Blocked => {
                RepairOutcome::Failure(diagnostics::trust_blocked(&assess, &assessment))
            }
            TrustStatus::Unknown => {
                RepairOutcome::Failure(diagnostics::trust_unknown(&assess, &assessment))
            }
        };

        info!(
            bundle_path = %bundle_path,
            trust_status = %assessment.status,
            success = %outcome.is_success(),
            "Quarantine repair finished"
        );

        Ok(outcome)
    }

    /// Standalone trust assessment, without stripping anything first.
    ///
    /// # Errors
    /// - `CoreError::Validation` if `bundle_path` is empty or contains NUL
    pub async fn assess(&self, bundle_path: &str) -> Result<TrustAssessment> {
        validate_bundle_path(bundle_path)?;
        let assess = commands::assess(bundle_path);
        Ok(self.assess_with(bundle_path, &assess).await)
    }

    /// Run the assessment command and classify the verdict.
    ///
    /// `Blocked` requires both a rejected assessment AND a confirmed
    /// quarantine marker; a rejection with an unconfirmed marker is
    /// `Unknown`. Collapsing the two would send users chasing security
    /// overrides that cannot help.
    async fn assess_with(
        &self,
        bundle_path: &str,
        assess: &CommandInvocation,
    ) -> TrustAssessment {
        let result = self.runner.run(assess).await;

        if result.succeeded() {
            return TrustAssessment::new(TrustStatus::Clean, result.stdout);
        }

        let details = result.detail_text().to_string();
        if self.has_quarantine_marker(bundle_path).await {
            TrustAssessment::new(TrustStatus::Blocked, details)
        } else {
            TrustAssessment::new(TrustStatus::Unknown, details)
        }
    }

    /// Probe for the quarantine attribute; exit 0 means it is still there.
    async fn has_quarantine_marker(&self, bundle_path: &str) -> bool {
        let probe = commands::probe(bundle_path);
        self.runner.run(&probe).await.succeeded()
    }
}

fn validate_bundle_path(bundle_path: &str) -> Result<()> {
    if bundle_path.is_empty() {
        return Err(CoreError::Validation("bundle path is empty".to_string()));
    }
    if bundle_path.contains('\0') {
        return Err(CoreError::Validation(
            "bundle path contains NUL byte".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommandResult;
    use crate::port::command_runner::mocks::ScriptedRunner;

    const APP: &str = "/Applications/Foo.app";

    fn engine_with(results: Vec<CommandResult>) -> (RepairEngine, Arc<ScriptedRunner>) {
        let runner = Arc::new(ScriptedRunner::new(results));
        (RepairEngine::new(runner.clone()), runner)
    }

    #[tokio::test]
    async fn test_repair_succeeds_when_strip_and_assess_succeed() {
        // Scenario A
        let (engine, runner) = engine_with(vec![
            CommandResult::exited(0, "", ""),         // xattr -cr
            CommandResult::exited(0, "accepted", ""), // spctl
        ]);

        let outcome = engine.repair(APP).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(runner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_repair_halts_when_strip_fails() {
        // Scenario B: assessment and probe must never run
        let (engine, runner) = engine_with(vec![CommandResult::exited(
            1,
            "",
            "Permission denied",
        )]);

        let outcome = engine.repair(APP).await.unwrap();

        let diag = outcome.diagnostic().expect("expected failure");
        assert!(diag.command.contains("xattr"));
        assert_eq!(diag.output, "Permission denied");
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repair_reports_blocked_when_marker_confirmed() {
        // Scenario C
        let (engine, runner) = engine_with(vec![
            CommandResult::exited(0, "", ""),                           // xattr -cr
            CommandResult::exited(1, "", "rejected"),                   // spctl
            CommandResult::exited(0, "0081;00000000;Gatekeeper;", ""), // xattr -p
        ]);

        let outcome = engine.repair(APP).await.unwrap();

        let diag = outcome.diagnostic().expect("expected failure");
        assert!(diag.title.contains("Gatekeeper"));
        assert!(diag.command.contains("spctl"));
        assert_eq!(diag.output, "rejected");
        assert_eq!(runner.call_count(), 3);
    }

    #[tokio::test]
    async fn test_repair_reports_unknown_when_marker_unconfirmed() {
        // Scenario D
        let (engine, _runner) = engine_with(vec![
            CommandResult::exited(0, "", ""),
            CommandResult::exited(1, "", "rejected"),
            CommandResult::exited(1, "", ""), // probe fails: marker absent
        ]);

        let outcome = engine.repair(APP).await.unwrap();

        let diag = outcome.diagnostic().expect("expected failure");
        assert!(diag.title.contains("unknown"));
        assert_eq!(diag.output, "rejected");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_classified_like_command_failure() {
        let (engine, runner) = engine_with(vec![CommandResult::spawn_failed(
            "No such file or directory (os error 2)",
        )]);

        let outcome = engine.repair(APP).await.unwrap();

        let diag = outcome.diagnostic().expect("expected failure");
        assert!(diag.command.contains("xattr"));
        assert!(diag.output.contains("No such file"));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_assess_rejection_with_marker_probe_spawn_failure_is_unknown() {
        // A probe that cannot even spawn cannot confirm the marker
        let (engine, _runner) = engine_with(vec![
            CommandResult::exited(0, "", ""),
            CommandResult::exited(1, "", "rejected"),
            CommandResult::spawn_failed("binary missing"),
        ]);

        let outcome = engine.repair(APP).await.unwrap();
        assert!(outcome.diagnostic().unwrap().title.contains("unknown"));
    }

    #[tokio::test]
    async fn test_repair_is_idempotent_on_clean_state() {
        let (engine, runner) = engine_with(vec![
            CommandResult::exited(0, "", ""),
            CommandResult::exited(0, "accepted", ""),
        ]);

        assert!(engine.repair(APP).await.unwrap().is_success());

        runner.extend(vec![
            CommandResult::exited(0, "", ""),
            CommandResult::exited(0, "accepted", ""),
        ]);
        assert!(engine.repair(APP).await.unwrap().is_success());

        // Exactly two commands per pass, no extra side effects
        assert_eq!(runner.call_count(), 4);
    }

    #[tokio::test]
    async fn test_diagnostic_output_falls_back_to_stdout() {
        let (engine, _runner) = engine_with(vec![CommandResult::exited(
            1,
            "only stdout text",
            "",
        )]);

        let outcome = engine.repair(APP).await.unwrap();
        assert_eq!(outcome.diagnostic().unwrap().output, "only stdout text");
    }

    #[tokio::test]
    async fn test_diagnostic_command_carries_full_command_line() {
        let (engine, _runner) = engine_with(vec![CommandResult::exited(1, "", "denied")]);

        let outcome = engine.repair("/Applications/Foo.app").await.unwrap();
        assert_eq!(
            outcome.diagnostic().unwrap().command,
            "/usr/bin/xattr -cr /Applications/Foo.app"
        );
    }

    #[tokio::test]
    async fn test_repair_rejects_empty_path() {
        let (engine, runner) = engine_with(vec![]);

        let err = engine.repair("").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_standalone_assess_clean() {
        let (engine, runner) = engine_with(vec![CommandResult::exited(0, "accepted", "")]);

        let assessment = engine.assess(APP).await.unwrap();

        assert_eq!(assessment.status, TrustStatus::Clean);
        assert_eq!(assessment.details, "accepted");
        // Clean verdict needs no probe
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_standalone_assess_blocked() {
        let (engine, _runner) = engine_with(vec![
            CommandResult::exited(3, "", "rejected"),
            CommandResult::exited(0, "0081;", ""),
        ]);

        let assessment = engine.assess(APP).await.unwrap();
        assert_eq!(assessment.status, TrustStatus::Blocked);
        assert_eq!(assessment.details, "rejected");
    }
}
