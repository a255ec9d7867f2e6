//! Settings for pkgplan.
//!
//! Settings are layered: built-in defaults, then `pkgplan.toml` at the project
//! root if it exists, then `PKGPLAN__SECTION__KEY` environment variables.
//!
//! ```toml
//! [exec]
//! timeout_secs = 600
//!
//! [stack]
//! version = "8.3.0"
//! services = ["elasticsearch", "kibana"]
//!
//! [build]
//! output_dir = "testing/hello"
//!
//! [packaging]
//! merge_policy = "union"
//! ```

mod env;
mod types;

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::consts::{CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, CONFIG_FILENAME};

pub use types::{BuildSettings, ConfigError, ExecSettings, PackagingSettings, Settings};

impl Settings {
  /// Loads settings for the project at `root`.
  pub fn load(root: &Path) -> Result<Self, ConfigError> {
    let defaults = toml::Value::try_from(Settings::default())?;
    let mut merged = match defaults {
      toml::Value::Table(table) => table,
      _ => toml::Table::new(),
    };

    let path = root.join(CONFIG_FILENAME);
    match fs::read_to_string(&path) {
      Ok(contents) => {
        let table: toml::Table = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
          path: path.clone(),
          source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        env::deep_merge(&mut merged, table);
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(source) => return Err(ConfigError::Read { path, source }),
    }

    env::apply_env_overrides(&mut merged, CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR);

    toml::Value::Table(merged).try_into().map_err(ConfigError::Deserialize)
  }
}
