//! Types for running external commands.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Ambient settings for external commands.
///
/// Every command runs in `workdir`. When `timeout` is set the command is
/// killed once it elapses; dropping an in-flight call kills it as well.
#[derive(Debug, Clone)]
pub struct ExecContext {
  pub workdir: PathBuf,
  pub timeout: Option<Duration>,
}

impl Default for ExecContext {
  fn default() -> Self {
    Self {
      workdir: PathBuf::from("."),
      timeout: None,
    }
  }
}

impl ExecContext {
  pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
    self.workdir = workdir.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }
}

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
  /// The process could not be started.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The process ran and exited unsuccessfully.
  #[error("{program} failed with {}{}", exit_status(.code), stderr_suffix(.stderr))]
  Failed {
    program: String,
    code: Option<i32>,
    stderr: String,
  },

  /// The process outlived the context's timeout and was killed.
  #[error("{program} timed out after {timeout:?}")]
  TimedOut { program: String, timeout: Duration },
}

fn exit_status(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "signal".to_string(),
  }
}

fn stderr_suffix(stderr: &str) -> String {
  if stderr.is_empty() {
    String::new()
  } else {
    format!(": {}", stderr)
  }
}
