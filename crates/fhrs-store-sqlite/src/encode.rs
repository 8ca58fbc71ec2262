//! Conversions between domain types and SQLite rows or FTS5 queries.

use fhrs_core::{EstablishmentRecord, TextSearch};

/// Column list shared by every establishment `SELECT`, in
/// [`establishment_from_row`] order.
pub const ESTABLISHMENT_COLUMNS: &str = "e.fhrs_id, e.name, e.rating, e.rating_date, \
   e.address_line1, e.address_line2, e.address_line3, e.address_line4, e.postcode";

pub fn establishment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EstablishmentRecord> {
  Ok(EstablishmentRecord {
    id:            row.get(0)?,
    name:          row.get(1)?,
    rating:        row.get(2)?,
    rating_date:   row.get(3)?,
    address_line1: row.get(4)?,
    address_line2: row.get(5)?,
    address_line3: row.get(6)?,
    address_line4: row.get(7)?,
    postcode:      row.get(8)?,
  })
}

/// Build an FTS5 `MATCH` expression that hits any of the search terms.
///
/// Each term is a quoted string so FTS5 operators in user input are inert.
/// Returns `None` when the phrase has no terms.
pub fn fts_match_expression(search: &TextSearch) -> Option<String> {
  let terms = search.terms();
  if terms.is_empty() {
    return None;
  }
  Some(
    terms
      .iter()
      .map(|t| format!("\"{}\"", t.replace('"', "\"\"")))
      .collect::<Vec<_>>()
      .join(" OR "),
  )
}
