//! Housekeeping for the directory that holds downloaded feeds.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use crate::Result;

fn is_feed_file(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext == "xml")
}

/// `*.xml` files directly inside `dir`, sorted by file name.
///
/// A missing directory has no feeds.
pub async fn list_feed_files(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut entries = match tokio::fs::read_dir(dir).await {
    Ok(entries) => entries,
    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
    Err(e) => return Err(e.into()),
  };

  let mut files = Vec::new();
  while let Some(entry) = entries.next_entry().await? {
    let path = entry.path();
    if entry.file_type().await?.is_file() && is_feed_file(&path) {
      files.push(path);
    }
  }
  files.sort();
  Ok(files)
}

/// Delete every feed file in `dir`, leaving anything else alone. Returns the
/// number of files removed.
pub async fn clear_feed_dir(dir: &Path) -> Result<usize> {
  let files = list_feed_files(dir).await?;
  for file in &files {
    tokio::fs::remove_file(file).await?;
  }
  tracing::info!(dir = %dir.display(), removed = files.len(), "cleared feed directory");
  Ok(files.len())
}
