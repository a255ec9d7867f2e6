//! The binary build sequence.
//!
//! [`BuildDriver::build`] runs these stages, stopping at the first failure:
//!
//! 1. create the output directory
//! 2. copy the runtime config template into it
//! 3. print the toolchain version and environment
//! 4. assemble build arguments with the injected build variables
//! 5. hand the arguments to the [`Builder`]
//!
//! [`BuildDriver::clean`] undoes stage 1 and is safe to call at any time.

pub mod types;

use std::fs;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::buildvars::inject_build_vars;
use crate::exec::{ExecContext, execute, run_verbose};

pub use types::{BuildArgs, DriverError, Toolchain};

/// Default output directory for built binaries.
pub const DEFAULT_OUTPUT_DIR: &str = "testing/hello";

/// Default runtime config copied next to the binary.
pub const DEFAULT_CONFIG_TEMPLATE: &str = "_meta/elastic-agent.yml";

/// Performs the actual compile step.
pub trait Builder {
  fn build(&self, args: &BuildArgs) -> impl Future<Output = Result<(), DriverError>>;
}

/// Builds by invoking the toolchain's `build` subcommand.
#[derive(Debug, Clone, Default)]
pub struct ToolchainBuilder {
  pub toolchain: Toolchain,
  pub ctx: ExecContext,
}

impl Builder for ToolchainBuilder {
  async fn build(&self, args: &BuildArgs) -> Result<(), DriverError> {
    let command_args = args.command_args();
    info!(output = %args.output_path().display(), "building binary");
    execute(&self.ctx, &self.toolchain.program, &command_args, &args.env)
      .await
      .map_err(DriverError::Build)?;
    Ok(())
  }
}

/// Prepares inputs and drives a [`Builder`].
///
/// Relative paths are resolved against the context's working directory.
#[derive(Debug, Clone)]
pub struct BuildDriver<B = ToolchainBuilder> {
  pub output_dir: PathBuf,
  pub config_template: PathBuf,
  pub toolchain: Toolchain,
  pub ctx: ExecContext,
  pub builder: B,
}

impl BuildDriver<ToolchainBuilder> {
  pub fn new(output_dir: impl Into<PathBuf>, config_template: impl Into<PathBuf>, toolchain: Toolchain, ctx: ExecContext) -> Self {
    let builder = ToolchainBuilder {
      toolchain: toolchain.clone(),
      ctx: ctx.clone(),
    };
    Self {
      output_dir: output_dir.into(),
      config_template: config_template.into(),
      toolchain,
      ctx,
      builder,
    }
  }
}

impl<B: Builder> BuildDriver<B> {
  /// Replaces the compile step.
  pub fn with_builder<C: Builder>(self, builder: C) -> BuildDriver<C> {
    BuildDriver {
      output_dir: self.output_dir,
      config_template: self.config_template,
      toolchain: self.toolchain,
      ctx: self.ctx,
      builder,
    }
  }

  /// Resolved output directory.
  pub fn output_path(&self) -> PathBuf {
    self.ctx.workdir.join(&self.output_dir)
  }

  /// Runs the full build sequence.
  pub async fn build(&self) -> Result<BuildArgs, DriverError> {
    let start = Instant::now();
    let result = self.run_stages().await;
    info!(elapsed = ?start.elapsed(), success = result.is_ok(), "build binary ran");
    result
  }

  async fn run_stages(&self) -> Result<BuildArgs, DriverError> {
    let output_dir = self.output_path();
    create_output_dir(&output_dir)?;
    self.generate_config(&output_dir)?;

    for probe in ["version", "env"] {
      run_verbose(&self.ctx, &self.toolchain.program, &[probe.to_string()])
        .await
        .map_err(DriverError::Toolchain)?;
    }

    let args = self.build_args();
    self.builder.build(&args).await?;
    Ok(args)
  }

  /// Default build arguments targeting the output directory, with the
  /// current build variables injected.
  pub fn build_args(&self) -> BuildArgs {
    let mut args = BuildArgs {
      output_dir: self.output_path(),
      ..BuildArgs::default()
    };
    inject_build_vars(&mut args.vars);
    args
  }

  fn generate_config(&self, output_dir: &Path) -> Result<(), DriverError> {
    let from = self.ctx.workdir.join(&self.config_template);
    let copy_err = |to: PathBuf, source: io::Error| DriverError::CopyConfig {
      from: from.clone(),
      to,
      source,
    };

    let file_name = from.file_name().ok_or_else(|| {
      copy_err(
        output_dir.to_path_buf(),
        io::Error::new(io::ErrorKind::InvalidInput, "config template has no file name"),
      )
    })?;
    let to = output_dir.join(file_name);

    fs::copy(&from, &to).map_err(|e| copy_err(to.clone(), e))?;
    debug!(from = %from.display(), to = %to.display(), "copied runtime config");
    Ok(())
  }

  /// Removes the output directory tree. A missing directory is not an error.
  pub fn clean(&self) -> Result<(), DriverError> {
    let path = self.output_path();
    match fs::remove_dir_all(&path) {
      Ok(()) => {
        info!(path = %path.display(), "removed output directory");
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(source) => Err(DriverError::Clean { path, source }),
    }
  }
}

fn create_output_dir(path: &Path) -> Result<(), DriverError> {
  let mut builder = fs::DirBuilder::new();
  builder.recursive(true);
  #[cfg(unix)]
  {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(0o700);
  }
  builder.create(path).map_err(|source| DriverError::CreateDir {
    path: path.to_path_buf(),
    source,
  })
}
