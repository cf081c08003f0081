//! Loader configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings for one load run, read from an optional `config.toml` overlaid
/// with `CASELOAD_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
  /// Path of the SQLite database file to (re)load.
  #[serde(default = "default_db_path")]
  pub db_path:      PathBuf,
  /// Commit the running transaction every this many cases. Bounds the work
  /// lost on an abrupt failure.
  #[serde(default = "default_commit_every")]
  pub commit_every: u64,
}

fn default_db_path() -> PathBuf {
  PathBuf::from("caseload.db")
}

fn default_commit_every() -> u64 {
  100
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self {
      db_path:      default_db_path(),
      commit_every: default_commit_every(),
    }
  }
}

impl LoaderConfig {
  /// Load from `path` (if present) merged with the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("CASELOAD"))
      .build()?
      .try_deserialize()
  }
}
