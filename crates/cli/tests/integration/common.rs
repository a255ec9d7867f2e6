//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Project-relative location of the packaging spec file.
pub const SPEC_FILE: &str = "dev-tools/packaging/packages.yml";

pub const SPECS: &str = r#"
specs:
  elastic_beat_oss:
    - name: oss-linux-x64
      os: linux
    - name: oss-darwin-arm64
      os: darwin
  elastic_beat_xpack:
    - name: licensed-linux-x64
  elastic_beat_xpack_separate_binaries:
    - name: separate-linux-x64
"#;

/// Isolated project directory.
///
/// Each test gets its own temporary root with a `.git` marker, so project
/// root discovery never escapes it.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Project with the standard spec file.
  pub fn with_specs() -> Self {
    let env = Self::empty();
    env.write_file(SPEC_FILE, SPECS);
    env
  }

  /// Project with nothing but the root marker.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    Self { temp }
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write an executable shell script relative to the project root.
  #[cfg(unix)]
  pub fn write_script(&self, relative_path: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.write_file(relative_path, &format!("#!/bin/sh\n{}", body));
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path)).unwrap_or_default()
  }

  /// A pkgplan command running inside the project.
  pub fn cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("pkgplan");
    cmd
      .current_dir(self.root())
      .env_remove("PKGPLAN_ROOT")
      .env_remove("DEV");
    cmd
  }
}
