//! Types for packaging specifications.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Build arguments for one package.
///
/// The record's schema belongs to the packaging stage, so it is kept as a raw
/// YAML mapping and only checked for being a mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageBuildArgs(pub serde_yaml::Mapping);

impl PackageBuildArgs {
  /// Returns a string field of the record, if present.
  pub fn get_str(&self, key: &str) -> Option<&str> {
    self.0.get(key).and_then(serde_yaml::Value::as_str)
  }

  pub fn as_mapping(&self) -> &serde_yaml::Mapping {
    &self.0
  }
}

/// Spec name to the ordered package records it expands to.
pub type PackageSpecSet = BTreeMap<String, Vec<PackageBuildArgs>>;

/// On-disk shape of a spec file.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SpecDocument {
  #[serde(default)]
  pub specs: PackageSpecSet,
}

/// How the contents of several spec files are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
  /// Join raw file contents with a newline and parse the result once.
  #[default]
  Concatenate,
  /// Parse files separately; a later file's spec replaces an earlier one.
  LastWins,
  /// Parse files separately; a spec defined twice is an error.
  ErrorOnConflict,
  /// Parse files separately; same-name specs have their lists appended.
  Union,
}

impl MergePolicy {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Concatenate => "concatenate",
      Self::LastWins => "last-wins",
      Self::ErrorOnConflict => "error-on-conflict",
      Self::Union => "union",
    }
  }
}

impl fmt::Display for MergePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for MergePolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "concatenate" => Ok(Self::Concatenate),
      "last-wins" => Ok(Self::LastWins),
      "error-on-conflict" => Ok(Self::ErrorOnConflict),
      "union" => Ok(Self::Union),
      other => Err(format!("unknown merge policy: {}", other)),
    }
  }
}

/// Errors from loading and resolving spec files.
#[derive(Debug, Error)]
pub enum SpecError {
  /// A spec file could not be read.
  #[error("failed to read from spec file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The combined content is not a valid spec document.
  #[error("failed to unmarshal spec data: {0}")]
  Parse(#[source] serde_yaml::Error),

  /// A spec name appears in more than one file under `ErrorOnConflict`.
  #[error("spec '{name}' is defined in both {first} and {second}")]
  Conflict { name: String, first: PathBuf, second: PathBuf },

  /// Resolving the files failed while loading a named spec.
  #[error("failed to load spec file: {0}")]
  Load(#[source] Box<SpecError>),

  /// The requested spec is not defined in any of the files.
  #[error("{0} not found in package specs")]
  NotFound(String),
}
