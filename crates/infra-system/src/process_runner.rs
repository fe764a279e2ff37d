// System command runner implementation

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{info, warn};

use unseal_core::domain::{CommandInvocation, CommandResult};
use unseal_core::port::time_provider::SystemTimeProvider;
use unseal_core::port::{CommandRunner, TimeProvider};

/// Runs commands as real OS processes.
///
/// Arguments are handed to the OS as a discrete list; nothing ever passes
/// through a shell. Both output streams are captured to completion. No
/// timeout is applied here: bounding wait time is the caller's concern.
pub struct SystemCommandRunner {
    time_provider: Arc<dyn TimeProvider>,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self {
            time_provider: Arc::new(SystemTimeProvider),
        }
    }

    pub fn with_time_provider(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { time_provider }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, invocation: &CommandInvocation) -> CommandResult {
        let start = self.time_provider.now_millis();

        info!(
            program = %invocation.program,
            args = ?invocation.args,
            "Spawning command"
        );

        let child = match Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!(program = %invocation.program, error = %e, "Spawn failed");
                return CommandResult::spawn_failed(e.to_string());
            }
        };

        let result = match child.wait_with_output().await {
            Ok(output) => {
                // Signal-terminated processes carry no exit code; report -1
                let code = output.status.code().unwrap_or(-1);
                CommandResult::exited(
                    code,
                    String::from_utf8_lossy(&output.stdout).to_string(),
                    String::from_utf8_lossy(&output.stderr).to_string(),
                )
            }
            Err(e) => {
                warn!(program = %invocation.program, error = %e, "Wait failed");
                CommandResult::spawn_failed(e.to_string())
            }
        };

        info!(
            program = %invocation.program,
            duration_ms = %(self.time_provider.now_millis() - start),
            status = ?result.status,
            "Command finished"
        );

        result
    }
}
