//! Error type for `caseload-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Failure while dropping and recreating the tables. Fatal before any
  /// data is loaded.
  #[error("schema setup failed: {0}")]
  Schema(tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
