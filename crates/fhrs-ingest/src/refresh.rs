//! The full rebuild pipeline: wipe, download, parse, load.
//!
//! There is no incremental refresh. A store is either rebuilt from scratch
//! or left as it is.

use std::path::{Path, PathBuf};

use fhrs_core::EstablishmentStore;

use crate::{
  AuthorityClient, Error, Result,
  feed_dir::{clear_feed_dir, list_feed_files},
  parse::parse_feed,
};

/// Outcome of loading a feed directory into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
  /// Feed files found in the directory.
  pub files:          usize,
  /// Feed files that could not be parsed and were left out.
  pub files_failed:   Vec<PathBuf>,
  /// Records parsed from the remaining files.
  pub parsed:         usize,
  /// Establishment details left out for lacking a required element.
  pub details_failed: usize,
  pub inserted:       usize,
  /// Ids that were already in the store.
  pub skipped:        Vec<String>,
}

/// Outcome of a full [`refresh`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
  /// Authorities listed by the API.
  pub feeds: usize,
  pub load:  LoadReport,
}

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::Store(Box::new(e))
}

/// Parse every feed in `feed_dir` and bulk-insert the records.
///
/// A feed that fails to parse is logged and skipped; the other feeds still
/// load. So is a single incomplete establishment within a feed. Duplicate
/// ids are logged and skipped.
pub async fn load_feed_dir<S: EstablishmentStore>(store: &S, feed_dir: &Path) -> Result<LoadReport> {
  let files = list_feed_files(feed_dir).await?;
  let mut report = LoadReport { files: files.len(), ..LoadReport::default() };
  let mut records = Vec::new();

  for path in files {
    tracing::info!(file = %path.display(), "parsing feed");
    let bytes = tokio::fs::read(&path).await?;
    match parse_feed(&bytes) {
      Ok(parsed) => {
        for e in &parsed.rejected {
          tracing::warn!(file = %path.display(), error = %e, "skipping establishment");
        }
        report.details_failed += parsed.rejected.len();
        records.extend(parsed.records);
      }
      Err(e) => {
        tracing::warn!(file = %path.display(), error = %e, "failed to parse feed");
        report.files_failed.push(path);
      }
    }
  }
  report.parsed = records.len();

  tracing::info!(records = report.parsed, "loading establishments");
  let inserted = store.insert_many(records).await.map_err(store_err)?;
  for id in &inserted.skipped {
    tracing::warn!(%id, "already exists");
  }
  report.inserted = inserted.inserted;
  report.skipped = inserted.skipped;

  tracing::info!(
    inserted = report.inserted,
    skipped = report.skipped.len(),
    failed_details = report.details_failed,
    failed_files = report.files_failed.len(),
    "feed directory loaded"
  );
  Ok(report)
}

/// Clear the store, then [`load_feed_dir`] from feeds already on disk.
pub async fn rebuild_from_feed_dir<S: EstablishmentStore>(
  store: &S,
  feed_dir: &Path,
) -> Result<LoadReport> {
  tracing::info!("dropping existing establishments");
  store.clear().await.map_err(store_err)?;
  load_feed_dir(store, feed_dir).await
}

/// Rebuild the store from freshly downloaded feeds.
///
/// Order: clear the store, delete old feed files, fetch the authority list,
/// download every feed, then load the directory.
pub async fn refresh<S: EstablishmentStore>(
  store: &S,
  client: &AuthorityClient,
  feed_dir: &Path,
) -> Result<RefreshReport> {
  tracing::info!("refreshing hygiene rating data, this will take a while");

  tracing::info!("dropping existing establishments");
  store.clear().await.map_err(store_err)?;

  clear_feed_dir(feed_dir).await?;

  let feeds = client.list_feeds().await?;
  client.download_all(&feeds, feed_dir).await?;

  let load = load_feed_dir(store, feed_dir).await?;
  Ok(RefreshReport { feeds: feeds.len(), load })
}
