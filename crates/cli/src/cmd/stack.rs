//! Implementation of the `pkgplan stack` commands.

use anyhow::{Context, Result};

use pkgplan_lib::buildvars::env::version_from_env;
use pkgplan_lib::stack::{StackService, down, up};

use super::Project;
use crate::output::{print_stat, print_success};

fn service(project: &Project) -> StackService {
  StackService::new(
    project.settings.stack.clone(),
    project.settings.exec_context(&project.root),
  )
}

pub fn cmd_stack_up(project: &Project, version: Option<String>, image: &str, image_ref: Option<&str>) -> Result<()> {
  let service = service(project);
  let version = version.unwrap_or_else(version_from_env);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let tagged = rt
    .block_on(up(&service, &version, image, image_ref))
    .context("Failed to bring the stack up")?;

  print_success("Stack has been deployed");
  print_stat("Agent version", &tagged);
  print_stat("Stack version", &service.config.version);
  print_stat("Profile", &service.config.profile);
  Ok(())
}

pub fn cmd_stack_down(project: &Project) -> Result<()> {
  let service = service(project);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(down(&service)).context("Failed to tear the stack down")?;

  print_success("Stack has been destroyed");
  Ok(())
}
