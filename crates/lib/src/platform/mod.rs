//! Target platforms and project layout.

pub mod arch;
pub mod os;
pub mod paths;

use std::fmt;
use std::str::FromStr;

use arch::Arch;
use os::Os;
use thiserror::Error;

/// Errors from parsing platform identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
  #[error("unknown operating system: {0}")]
  UnknownOs(String),

  #[error("unknown architecture: {0}")]
  UnknownArch(String),

  #[error("invalid platform '{0}', expected os/arch")]
  Malformed(String),
}

/// A build target in `os/arch` form (e.g., "linux/amd64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      os: Os::current()?,
      arch: Arch::current()?,
    })
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.os, self.arch)
  }
}

impl FromStr for Platform {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (os, arch) = s.split_once('/').ok_or_else(|| PlatformError::Malformed(s.to_string()))?;
    Ok(Self::new(os.parse()?, arch.parse()?))
  }
}

/// Ordered, de-duplicated list of target platforms.
///
/// Parsed from the `PLATFORMS` variable, which separates entries with
/// whitespace or commas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformList(Vec<Platform>);

impl PlatformList {
  pub fn parse(list: &str) -> Result<Self, PlatformError> {
    let mut platforms = Vec::new();
    for entry in list.split(|c: char| c == ',' || c.is_whitespace()).filter(|e| !e.is_empty()) {
      let platform: Platform = entry.parse()?;
      if !platforms.contains(&platform) {
        platforms.push(platform);
      }
    }
    Ok(Self(platforms))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Platform> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl fmt::Display for PlatformList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
    write!(f, "{}", joined.join(" "))
  }
}
