//! Implementation of the `pkgplan plan` command.
//!
//! Applies packaging profiles in order and prints the resulting build plan.
//! Any resolution failure aborts the command: a partial plan is never shown.

use anyhow::{Context, Result};

use pkgplan_lib::spec::{BuildPlan, Packaging};

use super::Project;
use crate::output::{OutputFormat, print_info, print_item, print_json, print_success};

pub fn cmd_plan(project: &Project, profiles: &[Packaging], output: OutputFormat) -> Result<()> {
  let packaging = &project.settings.packaging;
  let mut plan = BuildPlan::new();

  for profile in profiles {
    profile
      .apply(&mut plan, &project.root, &packaging.spec_file, packaging.merge_policy)
      .with_context(|| format!("Failed to apply packaging profile '{}'", profile))?;
  }

  if output.is_json() {
    return print_json(&plan);
  }

  if plan.is_empty() {
    print_info("Build plan is empty");
    return Ok(());
  }

  print_success(&format!("Build plan: {} package(s)", plan.len()));
  for package in &plan {
    print_item(&serde_json::to_string(package)?);
  }
  Ok(())
}
