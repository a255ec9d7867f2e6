//! Settings types.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PACKAGE_SPEC_FILE;
use crate::driver::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_OUTPUT_DIR, Toolchain};
use crate::exec::ExecContext;
use crate::spec::MergePolicy;
use crate::stack::StackConfig;

/// All pkgplan settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub exec: ExecSettings,
  pub stack: StackConfig,
  pub build: BuildSettings,
  pub packaging: PackagingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecSettings {
  /// Kill external commands that run longer than this many seconds.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
  pub output_dir: PathBuf,
  pub config_template: PathBuf,
  pub toolchain: Toolchain,
}

impl Default for BuildSettings {
  fn default() -> Self {
    Self {
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      config_template: PathBuf::from(DEFAULT_CONFIG_TEMPLATE),
      toolchain: Toolchain::default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingSettings {
  /// Spec file, relative to the project root.
  pub spec_file: String,
  pub merge_policy: MergePolicy,
}

impl Default for PackagingSettings {
  fn default() -> Self {
    Self {
      spec_file: PACKAGE_SPEC_FILE.to_string(),
      merge_policy: MergePolicy::default(),
    }
  }
}

impl Settings {
  /// Execution context rooted at `workdir` with the configured timeout.
  pub fn exec_context(&self, workdir: impl Into<PathBuf>) -> ExecContext {
    let ctx = ExecContext::default().with_workdir(workdir);
    match self.exec.timeout_secs {
      Some(secs) => ctx.with_timeout(Duration::from_secs(secs)),
      None => ctx,
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config file '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("failed to serialize default settings: {0}")]
  Serialize(#[from] toml::ser::Error),

  #[error("invalid settings: {0}")]
  Deserialize(#[source] toml::de::Error),
}
