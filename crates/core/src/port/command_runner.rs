// Command Runner Port
// Abstraction over spawning external executables

use crate::domain::{CommandInvocation, CommandResult};
use async_trait::async_trait;

/// Command runner trait
///
/// Implementations:
/// - SystemCommandRunner (unseal-infra-system): spawns a real OS process
/// - mocks::ScriptedRunner: replays a pre-programmed result sequence in tests
///
/// A runner never returns an error. Spawn failures (missing binary,
/// permission denied) come back as a `CommandResult` with
/// `CommandStatus::SpawnFailed` and the spawn error's description in stderr,
/// so the engine treats them exactly like an ordinary non-zero exit.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command, wait for termination, capture both output streams
    /// to completion.
    async fn run(&self, invocation: &CommandInvocation) -> CommandResult;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted runner for tests: returns pre-programmed results in order
    /// and records every invocation it receives.
    ///
    /// The lock makes the script safe to share across the lane worker and
    /// the test thread.
    pub struct ScriptedRunner {
        script: Mutex<VecDeque<CommandResult>>,
        invocations: Mutex<Vec<CommandInvocation>>,
    }

    impl ScriptedRunner {
        pub fn new(results: Vec<CommandResult>) -> Self {
            Self {
                script: Mutex::new(results.into()),
                invocations: Mutex::new(Vec::new()),
            }
        }

        /// Number of commands the engine actually ran.
        pub fn call_count(&self) -> usize {
            self.invocations.lock().unwrap().len()
        }

        /// Every invocation received so far, in order.
        pub fn invocations(&self) -> Vec<CommandInvocation> {
            self.invocations.lock().unwrap().clone()
        }

        /// Append more results to the script (for multi-call tests).
        pub fn extend(&self, results: Vec<CommandResult>) {
            self.script.lock().unwrap().extend(results);
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, invocation: &CommandInvocation) -> CommandResult {
            self.invocations.lock().unwrap().push(invocation.clone());

            match self.script.lock().unwrap().pop_front() {
                Some(result) => result,
                // Exhausted script fails loudly rather than faking success
                None => CommandResult::exited(1, "", "ScriptedRunner: no scripted result left"),
            }
        }
    }

}
