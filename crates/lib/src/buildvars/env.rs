//! Packaging settings shared with sub-processes through the environment.

use std::env;

use tracing::info;

use super::parse_bool;
use crate::consts::{DEV_ENV, EXTERNAL_ENV, PACKAGES_ENV, PLATFORMS_ENV, SNAPSHOT_ENV, VERSION_ENVS};
use crate::platform::{PlatformError, PlatformList};

/// Settings the packaging stage reads from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingEnv {
  pub version: String,
  pub platforms: PlatformList,
  /// Package kinds to produce (e.g., "DOCKER").
  pub packages: String,
  pub snapshot: bool,
  pub external: bool,
  pub dev: bool,
}

impl PackagingEnv {
  /// Settings for staging a linux/amd64 docker image from a dev snapshot.
  pub fn image_defaults() -> Self {
    Self {
      version: version_from_env(),
      platforms: PlatformList::parse("linux/amd64").unwrap_or_default(),
      packages: "DOCKER".to_string(),
      snapshot: true,
      external: true,
      dev: true,
    }
  }

  /// Reads the settings from the current environment.
  ///
  /// Boolean flags that are missing or unparsable read as false.
  pub fn from_env() -> Result<Self, PlatformError> {
    let flag = |name: &str| env::var(name).ok().as_deref().and_then(parse_bool).unwrap_or(false);

    Ok(Self {
      version: version_from_env(),
      platforms: PlatformList::parse(&env::var(PLATFORMS_ENV).unwrap_or_default())?,
      packages: env::var(PACKAGES_ENV).unwrap_or_default(),
      snapshot: flag(SNAPSHOT_ENV),
      external: flag(EXTERNAL_ENV),
      dev: flag(DEV_ENV),
    })
  }

  /// The variables these settings are exported as.
  pub fn vars(&self) -> Vec<(&'static str, String)> {
    vec![
      (PLATFORMS_ENV, self.platforms.to_string()),
      (PACKAGES_ENV, self.packages.clone()),
      (SNAPSHOT_ENV, self.snapshot.to_string()),
      (EXTERNAL_ENV, self.external.to_string()),
      (DEV_ENV, self.dev.to_string()),
    ]
  }

  /// Exports the settings into the process environment so later
  /// sub-processes see them.
  ///
  /// Must only be called while configuring, before any other threads read
  /// the environment.
  pub fn apply(&self) {
    for (key, value) in self.vars() {
      info!(key, value = %value, "setting packaging variable");
      // SAFETY: configuration runs before any worker threads are started.
      unsafe { env::set_var(key, value) };
    }
  }
}

/// Version from `BEAT_VERSION` or `PKGPLAN_VERSION`, else this crate's version.
pub fn version_from_env() -> String {
  VERSION_ENVS
    .iter()
    .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
    .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
}
