//! The match resolver: one store query per restaurant, three-way outcome.

use fhrs_core::{
  EstablishmentQuery, EstablishmentStore, MatchOutcome, QueryRecord, TextSearch,
};

/// Classifies how many stored establishments correspond to a restaurant.
///
/// Holds its store handle explicitly; cloning a cheap store handle and
/// building several resolvers is fine.
pub struct Resolver<S> {
  store: S,
}

impl<S: EstablishmentStore> Resolver<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Resolve a raw (name, postcode) pair.
  ///
  /// The postcode must match exactly after normalization; the name goes
  /// through case- and diacritic-insensitive full-text search. Zero or
  /// several hits are outcomes, not errors. Only store failures are errors.
  pub async fn resolve(&self, name: &str, postcode: &str) -> Result<MatchOutcome, S::Error> {
    self.resolve_record(&QueryRecord::new(name, postcode)).await
  }

  pub async fn resolve_record(&self, record: &QueryRecord) -> Result<MatchOutcome, S::Error> {
    let query = EstablishmentQuery {
      postcode: record.normalized_postcode(),
      name:     TextSearch::insensitive(record.search_name()),
    };
    let mut hits = self.store.find(&query).await?;

    Ok(match hits.len() {
      0 => MatchOutcome::NoMatch,
      1 => {
        let hit = hits.remove(0);
        MatchOutcome::SingleMatch {
          rating:      hit.rating,
          rating_date: hit.rating_date,
          id:          hit.id,
        }
      }
      _ => MatchOutcome::AmbiguousMatch,
    })
  }
}
