//! Types for the environment stack.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exec::ExecError;

/// Error returned by a readiness check.
pub type ReadyError = Box<dyn std::error::Error + Send + Sync>;

/// How to reach the stack tool and what to deploy with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
  /// Program that runs the stack tool.
  pub program: String,
  /// Arguments placed before every `stack` subcommand.
  pub base_args: Vec<String>,
  /// Stack version to deploy.
  pub version: String,
  /// Deployment profile.
  pub profile: String,
  /// Services brought up by `stack up`.
  pub services: Vec<String>,
}

impl Default for StackConfig {
  fn default() -> Self {
    Self {
      program: "go".to_string(),
      base_args: vec!["run".to_string(), "github.com/elastic/elastic-package".to_string()],
      version: "8.3.0".to_string(),
      profile: "default".to_string(),
      services: vec![
        "elasticsearch".to_string(),
        "fleet-server".to_string(),
        "kibana".to_string(),
      ],
    }
  }
}

impl StackConfig {
  /// Services as the comma-separated list the tool expects.
  pub fn services_arg(&self) -> String {
    self.services.join(",")
  }

  pub fn up_args(&self) -> Vec<String> {
    let services = self.services_arg();
    let mut args = self.base_args.clone();
    args.extend(
      [
        "stack",
        "up",
        "--daemon",
        "--verbose",
        "--version",
        self.version.as_str(),
        "--services",
        services.as_str(),
        "-p",
        self.profile.as_str(),
      ]
      .map(String::from),
    );
    args
  }

  pub fn down_args(&self) -> Vec<String> {
    let mut args = self.base_args.clone();
    args.extend(["stack", "down", "--verbose", "-p", self.profile.as_str()].map(String::from));
    args
  }
}

/// Errors from bringing the stack up or down.
#[derive(Debug, Error)]
pub enum StackError {
  /// The stack tool exited unsuccessfully.
  #[error("stack tool failed: {0}")]
  Exec(#[from] ExecError),

  /// The stack came up but the readiness check failed.
  #[error("stack is not ready: {0}")]
  NotReady(#[source] ReadyError),
}
