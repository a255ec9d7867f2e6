//! Implementation of the `pkgplan env defaults` command.
//!
//! Exports the settings for staging a docker image and prints them in a form
//! a shell can `eval`.

use anyhow::Result;

use pkgplan_lib::buildvars::PackagingEnv;

use crate::output::{OutputFormat, print_json};

pub fn cmd_env_defaults(output: OutputFormat) -> Result<()> {
  let settings = PackagingEnv::image_defaults();
  settings.apply();

  let vars = settings.vars();
  if output.is_json() {
    let map: std::collections::BTreeMap<_, _> = vars.into_iter().collect();
    return print_json(&map);
  }

  println!("# version {}", settings.version);
  for (key, value) in vars {
    println!("export {}=\"{}\"", key, value);
  }
  Ok(())
}
