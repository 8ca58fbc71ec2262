//! The reconciliation driver: resolve every input row, in order.

use fhrs_core::{EstablishmentStore, MatchOutcome, QueryRecord};

use crate::{Error, Resolver, Result};

/// Positions of the columns the resolver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
  pub name:     usize,
  pub postcode: usize,
}

impl Default for Columns {
  fn default() -> Self { Self { name: 1, postcode: 5 } }
}

impl Columns {
  /// Minimum row length that contains both columns.
  pub fn needed(&self) -> usize { self.name.max(self.postcode) + 1 }
}

/// Per-outcome tallies for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
  pub no_match: usize,
  pub multiple: usize,
  pub single:   usize,
}

impl Summary {
  fn record(&mut self, outcome: &MatchOutcome) {
    match outcome {
      MatchOutcome::NoMatch => self.no_match += 1,
      MatchOutcome::AmbiguousMatch => self.multiple += 1,
      MatchOutcome::SingleMatch { .. } => self.single += 1,
    }
  }

  pub fn total(&self) -> usize { self.no_match + self.multiple + self.single }
}

/// Output rows, one per input row and in the same order, plus tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
  pub rows:    Vec<Vec<String>>,
  pub summary: Summary,
}

/// Resolve each row and append its outcome columns.
///
/// Every row is checked for the name and postcode columns before the first
/// store query; one short row fails the whole run. A store failure aborts
/// the run as well.
pub async fn reconcile<S: EstablishmentStore>(
  resolver: &Resolver<S>,
  rows: Vec<Vec<String>>,
  columns: Columns,
) -> Result<Reconciliation> {
  let needed = columns.needed();
  if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() < needed) {
    return Err(Error::MalformedRow { row: i + 1, len: row.len(), needed });
  }

  let mut out = Reconciliation { rows: Vec::with_capacity(rows.len()), ..Default::default() };
  for (i, mut row) in rows.into_iter().enumerate() {
    let query = QueryRecord::new(row[columns.name].as_str(), row[columns.postcode].as_str());
    tracing::debug!(
      row = i + 1,
      name = %query.name,
      postcode = %query.normalized_postcode(),
      "processing"
    );

    let outcome = resolver
      .resolve_record(&query)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    out.summary.record(&outcome);
    row.extend(outcome.labels());
    out.rows.push(row);
  }

  tracing::info!(
    rows = out.summary.total(),
    single = out.summary.single,
    multiple = out.summary.multiple,
    no_match = out.summary.no_match,
    "reconciliation finished"
  );
  Ok(out)
}
