// External Command Values

use serde::{Deserialize, Serialize};

/// One external command to run: executable path plus ordered arguments.
///
/// Arguments are always passed through as a discrete list. They are never
/// joined into a shell string, so no shell interpretation can occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandInvocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Human-readable command line, for diagnostics and logs only.
    pub fn render(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl std::fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// How a spawned command ended.
///
/// Spawn failure is its own variant rather than a sentinel exit code, so a
/// genuine process exit of -1 can never be confused with "the binary was
/// missing or not permitted".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandStatus {
    /// Process ran to completion with this exit code
    Exited(i32),
    /// Process could not be started at all
    SpawnFailed,
}

/// Captured result of one external command.
///
/// Owned by whoever received it; never shared or mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn new(status: CommandStatus, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Convenience constructor for a normal process exit.
    pub fn exited(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::new(CommandStatus::Exited(code), stdout, stderr)
    }

    /// Result representing a process that could not be spawned.
    pub fn spawn_failed(error: impl Into<String>) -> Self {
        Self::new(CommandStatus::SpawnFailed, "", error)
    }

    pub fn succeeded(&self) -> bool {
        self.status == CommandStatus::Exited(0)
    }

    /// Stderr if non-empty, otherwise stdout. Diagnostic transcripts prefer
    /// the error stream but fall back to whatever the command printed.
    pub fn detail_text(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}
