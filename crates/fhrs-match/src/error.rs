//! Error type for `fhrs-match`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Data row `row` (1-based, header excluded) has only `len` columns.
  #[error("row {row} has {len} columns, expected at least {needed}")]
  MalformedRow {
    row:    usize,
    len:    usize,
    needed: usize,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("io error at {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
