//! Project root discovery.
//!
//! Packaging spec files are addressed relative to the project root. The root
//! is taken from `PKGPLAN_ROOT` when set, otherwise it is the nearest ancestor
//! of the working directory that contains either a `.git` entry or the
//! packaging spec file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::{PACKAGE_SPEC_FILE, ROOT_ENV};

#[derive(Debug, Error)]
pub enum RootError {
  /// The working directory could not be determined.
  #[error("failed to determine current directory: {0}")]
  CurrentDir(#[source] std::io::Error),

  /// `PKGPLAN_ROOT` points somewhere that is not a directory.
  #[error("{ROOT_ENV} is set to '{0}', which is not a directory")]
  InvalidOverride(PathBuf),

  /// No ancestor looked like a project root.
  #[error("no project root found above {0}")]
  NotFound(PathBuf),
}

/// Returns the project root for the current process.
pub fn project_root() -> Result<PathBuf, RootError> {
  if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
    let root = PathBuf::from(root);
    if !root.is_dir() {
      return Err(RootError::InvalidOverride(root));
    }
    debug!(root = %root.display(), "project root from environment");
    return Ok(dunce::canonicalize(&root).unwrap_or(root));
  }

  let cwd = std::env::current_dir().map_err(RootError::CurrentDir)?;
  find_project_root(&cwd)
}

/// Walks up from `start` looking for a directory that marks a project root.
pub fn find_project_root(start: &Path) -> Result<PathBuf, RootError> {
  for dir in start.ancestors() {
    if dir.join(".git").exists() || dir.join(PACKAGE_SPEC_FILE).is_file() {
      debug!(root = %dir.display(), "project root discovered");
      return Ok(dir.to_path_buf());
    }
  }
  Err(RootError::NotFound(start.to_path_buf()))
}
