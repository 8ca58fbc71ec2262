//! Error type for `fhrs-ingest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid api version header value: {0:?}")]
  InvalidApiVersion(String),

  #[error("xml error: {0}")]
  Xml(String),

  #[error("feed has no EstablishmentCollection")]
  MissingCollection,

  /// Establishment number `detail` (1-based) lacks a required element.
  #[error("establishment {detail} is missing <{element}>")]
  MissingElement {
    element: &'static str,
    detail:  usize,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
