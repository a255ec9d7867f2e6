//! Types for the build driver.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exec::ExecError;

/// The external toolchain that compiles the binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
  pub program: String,
}

impl Default for Toolchain {
  fn default() -> Self {
    Self {
      program: "go".to_string(),
    }
  }
}

/// Arguments for one binary build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
  /// Name of the produced binary.
  pub name: String,
  /// Package or directory to build.
  pub input: String,
  pub output_dir: PathBuf,
  /// Extra flags passed to the build subcommand.
  pub flags: Vec<String>,
  /// Linker flags, emitted ahead of the `-X` variable assignments.
  pub ldflags: Vec<String>,
  /// Link-time variables, rendered as `-X key=value`.
  pub vars: BTreeMap<String, String>,
  /// Environment overlay for the build process.
  pub env: BTreeMap<String, String>,
}

impl Default for BuildArgs {
  fn default() -> Self {
    Self {
      name: "elastic-agent".to_string(),
      input: ".".to_string(),
      output_dir: PathBuf::from("build"),
      flags: vec!["-trimpath".to_string()],
      ldflags: vec!["-s".to_string()],
      vars: BTreeMap::new(),
      env: BTreeMap::new(),
    }
  }
}

impl BuildArgs {
  /// Path of the produced binary.
  pub fn output_path(&self) -> PathBuf {
    self.output_dir.join(&self.name)
  }

  /// Combined `-ldflags` value.
  pub fn ldflags_arg(&self) -> String {
    let mut parts = self.ldflags.clone();
    parts.extend(self.vars.iter().map(|(k, v)| format!("-X {}={}", k, v)));
    parts.join(" ")
  }

  /// Arguments for the toolchain's build subcommand.
  pub fn command_args(&self) -> Vec<String> {
    let mut args = vec![
      "build".to_string(),
      "-o".to_string(),
      self.output_path().display().to_string(),
    ];
    args.extend(self.flags.iter().cloned());
    args.push("-ldflags".to_string());
    args.push(self.ldflags_arg());
    args.push(self.input.clone());
    args
  }
}

/// Errors from the build sequence.
#[derive(Debug, Error)]
pub enum DriverError {
  #[error("failed to create directory: {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy {from} to {to}: {source}")]
  CopyConfig {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A toolchain diagnostic probe failed.
  #[error("toolchain check failed: {0}")]
  Toolchain(#[source] ExecError),

  #[error("build failed: {0}")]
  Build(#[source] ExecError),

  #[error("failed to remove {path}: {source}")]
  Clean {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}
