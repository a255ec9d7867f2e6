//! Implementation of the `pkgplan specs` commands.
//!
//! `list` shows which specs a set of files defines; `show` resolves one spec
//! into a fresh build plan and prints its packages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use pkgplan_lib::spec::{BuildPlan, MergePolicy, load_specs_with};

use super::Project;
use crate::output::{OutputFormat, print_info, print_item, print_json, print_stat};

#[derive(Serialize)]
struct SpecSummary {
  name: String,
  packages: usize,
}

pub fn cmd_specs_list(
  project: &Project,
  files: Vec<PathBuf>,
  merge: Option<MergePolicy>,
  output: OutputFormat,
) -> Result<()> {
  let files = project.spec_files(files);
  let policy = merge.unwrap_or(project.settings.packaging.merge_policy);

  let specs = load_specs_with(&files, policy).context("Failed to load spec files")?;

  let summary: Vec<SpecSummary> = specs
    .iter()
    .map(|(name, packages)| SpecSummary {
      name: name.clone(),
      packages: packages.len(),
    })
    .collect();

  if output.is_json() {
    return print_json(&summary);
  }

  if summary.is_empty() {
    print_info("No specs defined");
    return Ok(());
  }
  for spec in &summary {
    print_stat(&spec.name, &format!("{} package(s)", spec.packages));
  }
  Ok(())
}

pub fn cmd_specs_show(
  project: &Project,
  name: &str,
  files: Vec<PathBuf>,
  merge: Option<MergePolicy>,
  output: OutputFormat,
) -> Result<()> {
  let files = project.spec_files(files);
  let policy = merge.unwrap_or(project.settings.packaging.merge_policy);

  let mut plan = BuildPlan::new();
  plan
    .load_named_spec_with(name, &files, policy)
    .with_context(|| format!("Failed to resolve spec '{}'", name))?;

  if output.is_json() {
    return print_json(&plan);
  }

  print_info(&format!("{}: {} package(s)", name, plan.len()));
  for package in &plan {
    print_item(&serde_json::to_string(package)?);
  }
  Ok(())
}
