//! Runtime settings: an optional TOML file layered under `FHRS_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use fhrs_ingest::authority::{DEFAULT_API_VERSION, DEFAULT_AUTHORITIES_URL};
use fhrs_match::Columns;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub store_path:      PathBuf,
  pub feed_dir:        PathBuf,
  pub input_file:      PathBuf,
  pub output_file:     PathBuf,
  pub authorities_url: String,
  pub api_version:     String,
  pub name_column:     usize,
  pub postcode_column: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path:      "fhrs.sqlite3".into(),
      feed_dir:        "files".into(),
      input_file:      "input/input.csv".into(),
      output_file:     "input/output.csv".into(),
      authorities_url: DEFAULT_AUTHORITIES_URL.into(),
      api_version:     DEFAULT_API_VERSION.into(),
      name_column:     1,
      postcode_column: 5,
    }
  }
}

impl Settings {
  /// Read `path` if it exists, then apply `FHRS_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FHRS").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise Settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }

  pub fn columns(&self) -> Columns {
    Columns { name: self.name_column, postcode: self.postcode_column }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
