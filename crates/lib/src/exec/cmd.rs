//! Running a single external command.

use std::collections::BTreeMap;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{Instrument, debug, info, info_span};

use super::types::{ExecContext, ExecError};

/// Runs `program` with `args` and returns its trimmed standard output.
///
/// The child inherits the current environment; keys in `env` are added on
/// top, replacing inherited values of the same name. Standard output and
/// standard error are captured separately. A non-zero exit yields
/// [`ExecError::Failed`] carrying the trimmed standard error, and no output.
///
/// The call runs inside a `shell.command.execute` span labelled with the
/// working directory, command, arguments and environment overlay.
pub async fn execute(
  ctx: &ExecContext,
  program: &str,
  args: &[String],
  env: &BTreeMap<String, String>,
) -> Result<String, ExecError> {
  let span = info_span!(
    "shell.command.execute",
    otel.name = "Executing shell command",
    workspace = %ctx.workdir.display(),
    command = program,
    arguments = ?args,
    environment = ?env,
  );

  run(ctx, program, args, env).instrument(span).await
}

/// Runs a diagnostic command and logs each line of its output.
pub async fn run_verbose(ctx: &ExecContext, program: &str, args: &[String]) -> Result<String, ExecError> {
  let output = execute(ctx, program, args, &BTreeMap::new()).await?;
  for line in output.lines() {
    info!(command = program, "{}", line);
  }
  Ok(output)
}

async fn run(
  ctx: &ExecContext,
  program: &str,
  args: &[String],
  env: &BTreeMap<String, String>,
) -> Result<String, ExecError> {
  let mut command = Command::new(program);
  command
    .args(args)
    .current_dir(&ctx.workdir)
    .stdin(Stdio::null())
    .kill_on_drop(true);

  if !env.is_empty() {
    command.envs(env);
  }

  debug!("spawning process");

  let output = match ctx.timeout {
    Some(timeout) => tokio::time::timeout(timeout, command.output())
      .await
      .map_err(|_| ExecError::TimedOut {
        program: program.to_string(),
        timeout,
      })?,
    None => command.output().await,
  }
  .map_err(|source| ExecError::Spawn {
    program: program.to_string(),
    source,
  })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }
    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }

    return Err(ExecError::Failed {
      program: program.to_string(),
      code: output.status.code(),
      stderr,
    });
  }

  let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

  if !stdout.is_empty() {
    debug!(stdout = %stdout, "command output");
  }

  Ok(stdout)
}
