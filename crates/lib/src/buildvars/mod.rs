//! Link-time build variables derived from the environment.
//!
//! Every build is marked as a snapshot. Development builds, selected with a
//! true `DEV` variable, additionally allow empty signatures and upgrades. A
//! missing or unparsable `DEV` simply leaves those two out.

pub mod env;

use std::collections::BTreeMap;

use crate::consts::{DEV_ENV, RELEASE_PACKAGE};

pub use env::PackagingEnv;

/// Returns the build variables for the current environment.
pub fn build_vars() -> BTreeMap<String, String> {
  build_vars_from(std::env::var(DEV_ENV).ok().as_deref())
}

/// Returns the build variables given the raw value of the `DEV` flag.
pub fn build_vars_from(dev_flag: Option<&str>) -> BTreeMap<String, String> {
  let mut vars = BTreeMap::new();
  vars.insert(release_var("snapshot"), "true".to_string());

  if dev_flag.and_then(parse_bool) == Some(true) {
    vars.insert(release_var("allowEmptyPgp"), "true".to_string());
    vars.insert(release_var("allowUpgrade"), "true".to_string());
  }

  vars
}

/// Merges the current build variables into `vars`, replacing existing keys.
pub fn inject_build_vars(vars: &mut BTreeMap<String, String>) {
  vars.extend(build_vars());
}

fn release_var(name: &str) -> String {
  format!("{}.{}", RELEASE_PACKAGE, name)
}

/// Parses a boolean flag in the spellings the toolchain accepts.
pub fn parse_bool(value: &str) -> Option<bool> {
  match value {
    "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
    "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn snapshot_key() -> String {
    release_var("snapshot")
  }

  #[test]
  fn snapshot_marker_always_present() {
    for flag in [None, Some("false"), Some("garbage"), Some("true")] {
      let vars = build_vars_from(flag);
      assert_eq!(vars.get(&snapshot_key()).map(String::as_str), Some("true"));
    }
  }

  #[test]
  fn dev_vars_only_when_flag_is_true() {
    assert_eq!(build_vars_from(None).len(), 1);
    assert_eq!(build_vars_from(Some("0")).len(), 1);
    assert_eq!(build_vars_from(Some("yes")).len(), 1);

    let dev = build_vars_from(Some("T"));
    assert_eq!(dev.len(), 3);
    assert_eq!(dev[&release_var("allowEmptyPgp")], "true");
    assert_eq!(dev[&release_var("allowUpgrade")], "true");
  }

  #[test]
  #[serial]
  fn build_vars_reads_dev_from_environment() {
    temp_env::with_var(DEV_ENV, Some("true"), || {
      assert_eq!(build_vars().len(), 3);
    });
    temp_env::with_var(DEV_ENV, None::<&str>, || {
      assert_eq!(build_vars().len(), 1);
    });
  }

  #[test]
  #[serial]
  fn inject_overwrites_existing_keys() {
    let mut vars = BTreeMap::new();
    vars.insert(snapshot_key(), "false".to_string());
    vars.insert("main.commit".to_string(), "abc123".to_string());

    temp_env::with_var(DEV_ENV, None::<&str>, || inject_build_vars(&mut vars));

    assert_eq!(vars[&snapshot_key()], "true");
    assert_eq!(vars["main.commit"], "abc123");
  }

  #[test]
  fn parse_bool_rejects_mixed_case_oddities() {
    assert_eq!(parse_bool("tRUE"), None);
    assert_eq!(parse_bool(""), None);
    assert_eq!(parse_bool("False"), Some(false));
  }
}
