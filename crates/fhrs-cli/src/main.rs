//! `fhrs`: attach food hygiene ratings to a list of restaurants.
//!
//! Reads `fhrs.toml` (or the path given with `--config`), opens the SQLite
//! establishment store, and either rebuilds it from the national dataset or
//! reconciles an input CSV against it.
//!
//! # Usage
//!
//! ```
//! fhrs refresh                      # download every authority feed and rebuild
//! fhrs reconcile -i in.csv -o out.csv
//! fhrs run --refresh                # both, in that order
//! fhrs lookup "The Ship Inn" "SW1A 1AA"
//! ```

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use fhrs_ingest::AuthorityClient;
use fhrs_match::{Resolver, reconcile, table};
use fhrs_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "fhrs", author, version, about = "Match restaurants against food hygiene ratings")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "fhrs.toml")]
  config: PathBuf,

  /// Path to the SQLite establishment store (overrides `store_path`).
  #[arg(long, global = true, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Download every authority feed and rebuild the store from scratch.
  Refresh,
  /// Rebuild the store from feed files already in the feed directory.
  Load,
  /// Reconcile the input CSV and write the output CSV.
  Reconcile(ReconcileArgs),
  /// Optionally refresh, then reconcile.
  Run {
    /// Rebuild the store before reconciling.
    #[arg(long)]
    refresh: bool,
    #[command(flatten)]
    files:   ReconcileArgs,
  },
  /// Resolve a single restaurant and print the outcome.
  Lookup {
    name:     String,
    postcode: String,
  },
}

#[derive(Args)]
struct ReconcileArgs {
  /// Input CSV (overrides `input_file`).
  #[arg(short, long, value_name = "FILE")]
  input:  Option<PathBuf>,
  /// Output CSV (overrides `output_file`).
  #[arg(short, long, value_name = "FILE")]
  output: Option<PathBuf>,
}

impl ReconcileArgs {
  fn apply(self, settings: &mut Settings) {
    if let Some(input) = self.input {
      settings.input_file = input;
    }
    if let Some(output) = self.output {
      settings.output_file = output;
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = cli.store {
    settings.store_path = store;
  }

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;

  match cli.command {
    Command::Refresh => refresh(&store, &settings).await?,
    Command::Load => {
      fhrs_ingest::rebuild_from_feed_dir(&store, &settings.feed_dir)
        .await
        .context("failed to load feed directory")?;
    }
    Command::Reconcile(files) => {
      files.apply(&mut settings);
      reconcile_files(store, &settings).await?;
    }
    Command::Run { refresh: do_refresh, files } => {
      files.apply(&mut settings);
      if do_refresh {
        refresh(&store, &settings).await?;
      }
      reconcile_files(store, &settings).await?;
    }
    Command::Lookup { name, postcode } => {
      let outcome = Resolver::new(store)
        .resolve(&name, &postcode)
        .await
        .context("lookup failed")?;
      println!("{}", outcome.labels().join(", "));
    }
  }

  tracing::info!("finished");
  Ok(())
}

async fn refresh(store: &SqliteStore, settings: &Settings) -> anyhow::Result<()> {
  let client = AuthorityClient::new(settings.authorities_url.as_str(), &settings.api_version)
    .context("failed to build HTTP client")?;
  let report = fhrs_ingest::refresh(store, &client, &settings.feed_dir)
    .await
    .context("refresh failed")?;
  tracing::info!(
    feeds = report.feeds,
    inserted = report.load.inserted,
    skipped = report.load.skipped.len(),
    failed_details = report.load.details_failed,
    failed_files = report.load.files_failed.len(),
    "refresh complete"
  );
  Ok(())
}

async fn reconcile_files(store: SqliteStore, settings: &Settings) -> anyhow::Result<()> {
  let rows = table::read_rows_from_path(&settings.input_file)
    .with_context(|| format!("failed to read {}", settings.input_file.display()))?;
  tracing::info!(rows = rows.len(), file = %settings.input_file.display(), "processing restaurants");

  let resolver = Resolver::new(store);
  let result = reconcile(&resolver, rows, settings.columns())
    .await
    .context("reconciliation failed")?;

  tracing::info!(file = %settings.output_file.display(), "writing results");
  table::write_rows_to_path(&settings.output_file, &result.rows)
    .with_context(|| format!("failed to write {}", settings.output_file.display()))?;
  Ok(())
}
