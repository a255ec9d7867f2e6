//! Bringing an external multi-service environment up and down.
//!
//! Each operation issues exactly one command to the stack tool. The tool does
//! its own orchestration; nothing here polls, retries, or probes readiness
//! beyond the caller-supplied check run after a successful start.

pub mod types;

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{Instrument, info, info_span};

use crate::consts::IMAGE_REF_OVERRIDE_ENV;
use crate::exec::{ExecContext, execute};

pub use types::{ReadyError, StackConfig, StackError};

/// Directory holding built distribution archives.
pub const DISTRIBUTIONS_DIR: &str = "build/distributions";

/// Start/stop capability of an external environment.
pub trait Lifecycle {
  /// Brings the environment up, then runs `ready`.
  ///
  /// A failing `ready` check fails the start.
  fn start<F>(&self, env: &BTreeMap<String, String>, ready: F) -> impl Future<Output = Result<(), StackError>>
  where
    F: FnOnce() -> Result<(), ReadyError>;

  /// Tears the environment down.
  fn stop(&self, env: &BTreeMap<String, String>) -> impl Future<Output = Result<(), StackError>>;
}

/// Lifecycle backed by the elastic-package stack tool.
#[derive(Debug, Clone, Default)]
pub struct StackService {
  pub config: StackConfig,
  pub ctx: ExecContext,
}

impl StackService {
  pub fn new(config: StackConfig, ctx: ExecContext) -> Self {
    Self { config, ctx }
  }
}

impl Lifecycle for StackService {
  async fn start<F>(&self, env: &BTreeMap<String, String>, ready: F) -> Result<(), StackError>
  where
    F: FnOnce() -> Result<(), ReadyError>,
  {
    let args = self.config.up_args();
    let span = info_span!(
      "stack.manifest.bootstrap",
      otel.name = "Bootstrapping stack deployment",
      args = ?args,
      profile = %self.config.profile,
      services = %self.config.services_arg(),
      stack_version = %self.config.version,
    );

    async {
      execute(&self.ctx, &self.config.program, &args, env).await?;
      ready().map_err(StackError::NotReady)
    }
    .instrument(span)
    .await
  }

  async fn stop(&self, env: &BTreeMap<String, String>) -> Result<(), StackError> {
    let args = self.config.down_args();
    let span = info_span!(
      "stack.manifest.destroy",
      otel.name = "Destroying stack deployment",
      profile = %self.config.profile,
    );

    execute(&self.ctx, &self.config.program, &args, env)
      .instrument(span)
      .await?;
    Ok(())
  }
}

/// Deploys the stack for a locally built agent image.
///
/// `image_archive` names an archive under `build/distributions`. When
/// `image_ref` is given it is passed to the stack tool as the agent image
/// override. Returns the snapshot version the image is tagged with.
pub async fn up<L: Lifecycle>(
  service: &L,
  version: &str,
  image_archive: &str,
  image_ref: Option<&str>,
) -> Result<String, StackError> {
  let archive = image_archive_path(image_archive);
  info!(archive = %archive.display(), "loading agent image");

  let tagged = format!("{}-SNAPSHOT", version);
  info!(version = %tagged, "tagging agent image");

  let mut env = BTreeMap::new();
  if let Some(image_ref) = image_ref {
    env.insert(IMAGE_REF_OVERRIDE_ENV.to_string(), image_ref.to_string());
  }

  service
    .start(&env, || {
      info!("stack has been deployed");
      Ok(())
    })
    .await?;

  Ok(tagged)
}

/// Tears the stack down with no environment overlay.
pub async fn down<L: Lifecycle>(service: &L) -> Result<(), StackError> {
  service.stop(&BTreeMap::new()).await
}

fn image_archive_path(image_archive: &str) -> PathBuf {
  let relative = Path::new(DISTRIBUTIONS_DIR).join(image_archive);
  std::path::absolute(&relative).unwrap_or(relative)
}
