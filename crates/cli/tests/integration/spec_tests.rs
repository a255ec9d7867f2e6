//! Spec resolution through the CLI.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn list_shows_specs_with_counts() {
  let env = TestEnv::with_specs();

  env
    .cmd()
    .args(["specs", "list"])
    .assert()
    .success()
    .stdout(predicate::str::contains("elastic_beat_oss"))
    .stdout(predicate::str::contains("2 package(s)"));
}

#[test]
fn show_prints_packages_as_json() {
  let env = TestEnv::with_specs();

  let output = env
    .cmd()
    .args(["specs", "show", "elastic_beat_oss", "--output", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let plan: serde_json::Value = serde_json::from_slice(&output).unwrap();
  let names: Vec<&str> = plan["packages"]
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, vec!["oss-linux-x64", "oss-darwin-arm64"]);
}

#[test]
fn show_unknown_spec_fails() {
  let env = TestEnv::with_specs();

  env
    .cmd()
    .args(["specs", "show", "enterprise"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("enterprise not found in package specs"));
}

#[test]
fn explicit_files_merge_with_policy() {
  let env = TestEnv::with_specs();
  let extra = env.write_file("extra.yml", "specs:\n  elastic_beat_oss:\n    - name: extra\n");
  let base = env.root().join(super::common::SPEC_FILE);

  env
    .cmd()
    .args(["specs", "show", "elastic_beat_oss", "--merge", "union"])
    .arg(&base)
    .arg(&extra)
    .assert()
    .success()
    .stdout(predicate::str::contains("3 package(s)"));

  env
    .cmd()
    .args(["specs", "show", "elastic_beat_oss"])
    .arg(&base)
    .arg(&extra)
    .assert()
    .success()
    .stdout(predicate::str::contains("1 package(s)"))
    .stdout(predicate::str::contains("extra"));
}

#[test]
fn plan_applies_profiles_in_order() {
  let env = TestEnv::with_specs();

  let output = env
    .cmd()
    .args(["plan", "dual", "oss", "--output", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let plan: serde_json::Value = serde_json::from_slice(&output).unwrap();
  let names: Vec<&str> = plan["packages"]
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["name"].as_str().unwrap())
    .collect();
  assert_eq!(
    names,
    vec![
      "oss-linux-x64",
      "oss-darwin-arm64",
      "separate-linux-x64",
      "oss-linux-x64",
      "oss-darwin-arm64"
    ]
  );
}

#[test]
fn plan_reads_configured_spec_file() {
  let env = TestEnv::with_specs();
  env.write_file(
    "packaging/custom.yml",
    "specs:\n  elastic_beat_oss:\n    - name: custom-linux-x64\n",
  );
  env.write_file(
    "pkgplan.toml",
    "[packaging]\nspec_file = \"packaging/custom.yml\"\nmerge_policy = \"error-on-conflict\"\n",
  );

  let output = env
    .cmd()
    .args(["plan", "oss", "--output", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let plan: serde_json::Value = serde_json::from_slice(&output).unwrap();
  let names: Vec<&str> = plan["packages"]
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, vec!["custom-linux-x64"]);
}

#[test]
fn plan_with_missing_spec_file_fails() {
  let env = TestEnv::empty();

  env
    .cmd()
    .args(["plan", "oss"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to load spec file"));
}
