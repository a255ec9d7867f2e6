//! Stack lifecycle through the CLI.

#![cfg(unix)]

use predicates::prelude::*;

use super::common::TestEnv;

fn stack_env(exit_code: i32) -> TestEnv {
  let env = TestEnv::empty();
  let tool = env.write_script(
    "bin/fake-stack",
    &format!(
      "echo \"$* image=${{ELASTIC_AGENT_IMAGE_REF_OVERRIDE:-none}}\" >> stack.log\nexit {}\n",
      exit_code
    ),
  );
  env.write_file(
    "pkgplan.toml",
    &format!(
      "[stack]\nprogram = \"{}\"\nbase_args = []\nprofile = \"ci\"\n",
      tool.display()
    ),
  );
  env
}

#[test]
fn up_starts_stack_with_image_override() {
  let env = stack_env(0);

  env
    .cmd()
    .args(["stack", "up", "--version", "8.3.0", "--image-ref", "registry/agent:8.3.0-SNAPSHOT"])
    .assert()
    .success()
    .stdout(predicate::str::contains("8.3.0-SNAPSHOT"));

  assert_eq!(
    env.read_file("stack.log").trim(),
    "stack up --daemon --verbose --version 8.3.0 --services elasticsearch,fleet-server,kibana -p ci \
     image=registry/agent:8.3.0-SNAPSHOT"
  );
}

#[test]
fn down_stops_stack() {
  let env = stack_env(0);

  env.cmd().args(["stack", "down"]).assert().success();

  assert_eq!(env.read_file("stack.log").trim(), "stack down --verbose -p ci image=none");
}

#[test]
fn tool_failure_is_reported() {
  let env = stack_env(4);

  env
    .cmd()
    .args(["stack", "down"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("exit code 4"));
}
