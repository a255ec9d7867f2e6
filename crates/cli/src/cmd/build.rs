//! Implementation of the `pkgplan build` and `pkgplan clean` commands.

use std::time::Instant;

use anyhow::{Context, Result};

use pkgplan_lib::driver::BuildDriver;

use super::Project;
use crate::output::{format_duration, print_stat, print_success};

fn driver(project: &Project) -> BuildDriver {
  let build = &project.settings.build;
  BuildDriver::new(
    &build.output_dir,
    &build.config_template,
    build.toolchain.clone(),
    project.settings.exec_context(&project.root),
  )
}

pub fn cmd_build(project: &Project) -> Result<()> {
  let start = Instant::now();
  let driver = driver(project);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let args = rt.block_on(driver.build()).context("Build failed")?;

  print_success("Build complete!");
  print_stat("Binary", &args.output_path().display().to_string());
  print_stat("Build vars", &args.vars.len().to_string());
  print_stat("Duration", &format_duration(start.elapsed()));
  Ok(())
}

pub fn cmd_clean(project: &Project) -> Result<()> {
  let driver = driver(project);
  driver.clean().context("Clean failed")?;
  print_success(&format!("Removed {}", driver.output_path().display()));
  Ok(())
}
