//! The `EstablishmentStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `fhrs-store-sqlite`).
//! The ingester and the matcher depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{establishment::EstablishmentRecord, search::TextSearch};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`EstablishmentStore::find`].
///
/// Both predicates must hold: `postcode` by exact equality, `name` by
/// full-text search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstablishmentQuery {
  /// Normalized postcode. An empty value matches nothing.
  pub postcode: String,
  pub name:     TextSearch,
}

// ─── Bulk insert report ──────────────────────────────────────────────────────

/// Result of [`EstablishmentStore::insert_many`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertReport {
  pub inserted: usize,
  /// Ids already present in the store, in input order.
  pub skipped:  Vec<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an establishment store backend.
///
/// Records are immutable once written. The only bulk mutations are
/// conflict-skipping inserts and wiping the whole store ahead of a rebuild.
pub trait EstablishmentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert every record whose id is not yet present. A duplicate id is
  /// skipped and reported, never an error.
  fn insert_many(
    &self,
    records: Vec<EstablishmentRecord>,
  ) -> impl Future<Output = Result<InsertReport, Self::Error>> + Send + '_;

  /// All records satisfying `query`, ordered by id.
  fn find<'a>(
    &'a self,
    query: &'a EstablishmentQuery,
  ) -> impl Future<Output = Result<Vec<EstablishmentRecord>, Self::Error>> + Send + 'a;

  /// Number of stored establishments.
  fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Remove every establishment and its index entries.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
