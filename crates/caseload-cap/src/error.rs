//! Error types for the caseload-cap codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error reading record stream: {0}")]
  Io(#[from] std::io::Error),

  /// A record that failed to decode, with its 1-based input line number.
  #[error("malformed record on line {line}: {source}")]
  Decode {
    line:   u64,
    #[source]
    source: serde_json::Error,
  },

  #[error("malformed record: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
