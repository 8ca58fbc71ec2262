//! [`SqliteStore`] — the SQLite implementation of [`EstablishmentStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use fhrs_core::{
  EstablishmentQuery, EstablishmentRecord, EstablishmentStore, InsertReport,
};

use crate::{
  Error, Result,
  encode::{ESTABLISHMENT_COLUMNS, establishment_from_row, fts_match_expression},
  schema::{DROP, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An establishment store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch one establishment by its FHRS id.
  pub async fn get(&self, id: &str) -> Result<Option<EstablishmentRecord>> {
    let id = id.to_owned();
    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ESTABLISHMENT_COLUMNS} FROM establishments e WHERE e.fhrs_id = ?1"
              ),
              rusqlite::params![id],
              establishment_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(record)
  }
}

// ─── EstablishmentStore impl ─────────────────────────────────────────────────

impl EstablishmentStore for SqliteStore {
  type Error = Error;

  async fn insert_many(&self, records: Vec<EstablishmentRecord>) -> Result<InsertReport> {
    let report = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = InsertReport::default();
        {
          let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO establishments (
               fhrs_id, name, rating, rating_date,
               address_line1, address_line2, address_line3, address_line4,
               postcode
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          )?;
          for record in records {
            let changed = stmt.execute(rusqlite::params![
              record.id,
              record.name,
              record.rating,
              record.rating_date,
              record.address_line1,
              record.address_line2,
              record.address_line3,
              record.address_line4,
              record.postcode,
            ])?;
            if changed == 0 {
              report.skipped.push(record.id);
            } else {
              report.inserted += 1;
            }
          }
        }
        tx.commit()?;
        Ok(report)
      })
      .await?;

    tracing::debug!(
      inserted = report.inserted,
      skipped = report.skipped.len(),
      "bulk insert finished"
    );
    Ok(report)
  }

  async fn find(&self, query: &EstablishmentQuery) -> Result<Vec<EstablishmentRecord>> {
    // Stored postcodes are never empty, and a phrase with no terms has
    // nothing to match; neither needs a round trip.
    if query.postcode.is_empty() {
      return Ok(Vec::new());
    }
    let Some(expression) = fts_match_expression(&query.name) else {
      return Ok(Vec::new());
    };
    let postcode = query.postcode.clone();

    let mut records: Vec<EstablishmentRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ESTABLISHMENT_COLUMNS}
           FROM establishments_fts
           JOIN establishments e ON e.row_id = establishments_fts.rowid
           WHERE e.postcode = ?1
             AND establishments_fts MATCH ?2
           ORDER BY e.fhrs_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![postcode, expression], establishment_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    records.retain(|r| query.name.admits(&r.name));
    Ok(records)
  }

  async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM establishments", [], |r| r.get(0))?)
      })
      .await?;
    usize::try_from(n).map_err(|_| Error::Count(n))
  }

  async fn clear(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::info!("establishment store cleared");
    Ok(())
  }
}
