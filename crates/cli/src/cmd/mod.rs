mod build;
mod env;
mod plan;
mod specs;
mod stack;
mod vars;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use pkgplan_lib::config::Settings;
use pkgplan_lib::platform::paths::project_root;

pub use build::{cmd_build, cmd_clean};
pub use env::cmd_env_defaults;
pub use plan::cmd_plan;
pub use specs::{cmd_specs_list, cmd_specs_show};
pub use stack::{cmd_stack_down, cmd_stack_up};
pub use vars::cmd_vars;

/// The project a command operates on.
pub struct Project {
  pub root: PathBuf,
  pub settings: Settings,
}

impl Project {
  /// Resolves the project root (explicit or discovered) and loads its settings.
  pub fn load(root: Option<PathBuf>) -> Result<Self> {
    let root = match root {
      Some(root) => root,
      None => project_root().context("Failed to locate project root")?,
    };
    debug!(root = %root.display(), "using project root");
    let settings = Settings::load(&root).with_context(|| format!("Failed to load settings for {}", root.display()))?;
    Ok(Self { root, settings })
  }

  /// Spec files given on the command line, or the configured project spec file.
  pub fn spec_files(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
    if files.is_empty() {
      vec![self.root.join(&self.settings.packaging.spec_file)]
    } else {
      files
    }
  }
}
