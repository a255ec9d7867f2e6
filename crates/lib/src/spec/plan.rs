//! The build plan: packages accumulated from resolved specs.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::load::load_specs_with;
use super::types::{MergePolicy, PackageBuildArgs, SpecError};

/// Ordered list of packages the packaging stage will build.
///
/// The plan only grows: each resolved spec appends its records and nothing is
/// removed during a run. Resolving the same spec twice therefore lists its
/// packages twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildPlan {
  packages: Vec<PackageBuildArgs>,
}

impl BuildPlan {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn packages(&self) -> &[PackageBuildArgs] {
    &self.packages
  }

  pub fn len(&self) -> usize {
    self.packages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.packages.is_empty()
  }

  /// Loads the spec called `name` from `files` and appends its packages.
  ///
  /// `name` must be a key under `specs`. If it is missing, or the files can't
  /// be loaded, the plan is left untouched.
  pub fn load_named_spec<P: AsRef<Path>>(&mut self, name: &str, files: &[P]) -> Result<(), SpecError> {
    self.load_named_spec_with(name, files, MergePolicy::default())
  }

  /// Like [`BuildPlan::load_named_spec`], combining the files with `policy`.
  pub fn load_named_spec_with<P: AsRef<Path>>(
    &mut self,
    name: &str,
    files: &[P],
    policy: MergePolicy,
  ) -> Result<(), SpecError> {
    let mut specs = load_specs_with(files, policy).map_err(|e| SpecError::Load(Box::new(e)))?;

    let packages = specs.remove(name).ok_or_else(|| SpecError::NotFound(name.to_string()))?;

    let sources: Vec<String> = files.iter().map(|f| f.as_ref().display().to_string()).collect();
    info!(spec = name, count = packages.len(), "{} package spec loaded from {:?}", name, sources);

    self.packages.extend(packages);
    Ok(())
  }
}

impl<'a> IntoIterator for &'a BuildPlan {
  type Item = &'a PackageBuildArgs;
  type IntoIter = std::slice::Iter<'a, PackageBuildArgs>;

  fn into_iter(self) -> Self::IntoIter {
    self.packages.iter()
  }
}
