use anyhow::Result;

use pkgplan_lib::buildvars::build_vars;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_vars(output: OutputFormat) -> Result<()> {
  let vars = build_vars();

  if output.is_json() {
    return print_json(&vars);
  }

  for (key, value) in &vars {
    print_stat(key, value);
  }
  Ok(())
}
