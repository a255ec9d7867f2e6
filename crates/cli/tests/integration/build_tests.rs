//! Build driver through the CLI.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn clean_without_output_succeeds() {
  let env = TestEnv::empty();

  env.cmd().arg("clean").assert().success();
  assert!(!env.root().join("testing/hello").exists());
}

#[test]
fn clean_removes_output_dir() {
  let env = TestEnv::empty();
  env.write_file("testing/hello/elastic-agent", "binary");

  env.cmd().arg("clean").assert().success();

  assert!(!env.root().join("testing/hello").exists());
}

#[cfg(unix)]
#[test]
fn build_runs_toolchain_and_copies_config() {
  let env = TestEnv::empty();
  env.write_file("_meta/elastic-agent.yml", "outputs: {}\n");
  let toolchain = env.write_script("bin/fake-go", "echo \"$*\" >> toolchain.log\n");
  env.write_file(
    "pkgplan.toml",
    &format!("[build.toolchain]\nprogram = \"{}\"\n", toolchain.display()),
  );

  env
    .cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete!"));

  assert!(env.root().join("testing/hello/elastic-agent.yml").is_file());
  let log = env.read_file("toolchain.log");
  let calls: Vec<&str> = log.lines().collect();
  assert_eq!(calls[0], "version");
  assert_eq!(calls[1], "env");
  assert!(calls[2].starts_with("build -o "));
  assert!(calls[2].contains("release.snapshot=true"));
}

#[cfg(unix)]
#[test]
fn build_stops_when_toolchain_probe_fails() {
  let env = TestEnv::empty();
  env.write_file("_meta/elastic-agent.yml", "outputs: {}\n");
  let toolchain = env.write_script("bin/fake-go", "echo \"$*\" >> toolchain.log\nexit 1\n");
  env.write_file(
    "pkgplan.toml",
    &format!("[build.toolchain]\nprogram = \"{}\"\n", toolchain.display()),
  );

  env
    .cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("toolchain check failed"));

  assert_eq!(env.read_file("toolchain.log").lines().count(), 1);
}
