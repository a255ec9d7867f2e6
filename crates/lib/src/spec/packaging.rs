//! Well-known packaging profiles.
//!
//! A profile names one or more specs from the project's packaging spec file.
//! Profiles made of several specs resolve them one after another, so the plan
//! lists packages in the order the specs are named here.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use super::plan::BuildPlan;
use super::types::{MergePolicy, SpecError};
use crate::consts::{LOCAL_SPEC_FILE, PACKAGE_SPEC_FILE};
use crate::platform::paths::{RootError, project_root};

/// Errors that leave the build plan incomplete.
#[derive(Debug, Error)]
pub enum PackagingError {
  /// The project root, which spec files are relative to, was not found.
  #[error(transparent)]
  Root(#[from] RootError),

  /// A named spec could not be resolved.
  #[error(transparent)]
  Spec(#[from] SpecError),
}

/// A packaging configuration and the specs it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
  /// Packages for a community-maintained project.
  Community,
  /// Binaries that get packed into the agent.
  AgentBinaries,
  /// Agent binaries for docker-based tests.
  AgentDockerTest,
  /// Agent binaries for demo purposes.
  AgentDemo,
  /// Apache 2.0 licensed packages only.
  Oss,
  /// Packages under the commercial license.
  Licensed,
  /// Commercially licensed packages reduced for agent use.
  LicensedReduced,
  /// OSS packages plus licensed packages built from separate binaries.
  Dual,
  /// OSS packages plus licensed packages that reuse the OSS binaries.
  DualSharedBinaries,
}

impl Packaging {
  pub const ALL: [Packaging; 9] = [
    Self::Community,
    Self::AgentBinaries,
    Self::AgentDockerTest,
    Self::AgentDemo,
    Self::Oss,
    Self::Licensed,
    Self::LicensedReduced,
    Self::Dual,
    Self::DualSharedBinaries,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Community => "community",
      Self::AgentBinaries => "agent",
      Self::AgentDockerTest => "agent-docker-test",
      Self::AgentDemo => "agent-demo",
      Self::Oss => "oss",
      Self::Licensed => "licensed",
      Self::LicensedReduced => "licensed-reduced",
      Self::Dual => "dual",
      Self::DualSharedBinaries => "dual-shared-binaries",
    }
  }

  /// Spec names resolved by this profile, in resolution order.
  pub fn spec_names(&self) -> &'static [&'static str] {
    match self {
      Self::Community => &["community_beat"],
      Self::AgentBinaries => &["elastic_beat_agent_binaries"],
      Self::AgentDockerTest => &["elastic_beat_agent_docker_test_binaries"],
      Self::AgentDemo => &["elastic_beat_agent_demo_binaries"],
      Self::Oss => &["elastic_beat_oss"],
      Self::Licensed => &["elastic_beat_xpack"],
      Self::LicensedReduced => &["elastic_beat_xpack_reduced"],
      Self::Dual => &["elastic_beat_oss", "elastic_beat_xpack_separate_binaries"],
      Self::DualSharedBinaries => &["elastic_beat_oss", "elastic_beat_xpack"],
    }
  }

  /// Resolves every spec of this profile from `spec_file` (relative to `root`) into `plan`.
  pub fn apply(
    &self,
    plan: &mut BuildPlan,
    root: &Path,
    spec_file: &str,
    policy: MergePolicy,
  ) -> Result<(), PackagingError> {
    for name in self.spec_names() {
      use_packaging_with(plan, root, name, spec_file, policy)?;
    }
    Ok(())
  }
}

impl fmt::Display for Packaging {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Packaging {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|p| p.as_str() == s)
      .ok_or_else(|| format!("unknown packaging profile: {}", s))
  }
}

/// Loads the spec `spec_name` from `spec_file`, which is relative to `root`.
pub fn use_packaging(plan: &mut BuildPlan, root: &Path, spec_name: &str, spec_file: &str) -> Result<(), PackagingError> {
  use_packaging_with(plan, root, spec_name, spec_file, MergePolicy::default())
}

/// Like [`use_packaging`], combining spec files with `policy`.
pub fn use_packaging_with(
  plan: &mut BuildPlan,
  root: &Path,
  spec_name: &str,
  spec_file: &str,
  policy: MergePolicy,
) -> Result<(), PackagingError> {
  plan.load_named_spec_with(spec_name, &[root.join(spec_file)], policy)?;
  Ok(())
}

/// Discovers the project root, then loads `spec_name` from `spec_file`.
///
/// Callers should treat an error as fatal for the run: the plan can't be
/// trusted once a required spec is missing.
pub fn must_use_packaging(plan: &mut BuildPlan, spec_name: &str, spec_file: &str) -> Result<(), PackagingError> {
  let root = project_root()?;
  use_packaging(plan, &root, spec_name, spec_file)
}

/// Loads `name` from the project spec file combined with `packages.yml` in `cwd`.
pub fn load_local_named_spec(plan: &mut BuildPlan, root: &Path, cwd: &Path, name: &str) -> Result<(), PackagingError> {
  plan.load_named_spec(name, &[root.join(PACKAGE_SPEC_FILE), cwd.join(LOCAL_SPEC_FILE)])?;
  Ok(())
}
