//! caseload loader binary.
//!
//! Recreates the relational schema and streams a bulk case-law metadata
//! export into it, one case per input line. The run is all-or-abort: any
//! unexpected storage error stops the process with a nonzero exit after
//! dumping the offending record.

use std::path::PathBuf;

use anyhow::Context as _;
use caseload_core::store::CaseStore;
use caseload_import::{ImportError, Importer, LoaderConfig};
use caseload_store_sqlite::SqliteStore;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Normalizing bulk loader for case-law metadata"
)]
struct Cli {
  /// Input export: one JSON record per line; `.gz` files are decompressed
  /// on the fly.
  input: PathBuf,

  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Database file; overrides the configured path.
  #[arg(long)]
  db: Option<PathBuf>,
}

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

  let mut cfg =
    LoaderConfig::load(&cli.config).context("failed to read config file")?;
  if let Some(db) = cli.db {
    cfg.db_path = db;
  }

  let store = SqliteStore::open(&cfg.db_path)
    .await
    .with_context(|| format!("failed to open database at {:?}", cfg.db_path))?;

  tracing::info!(db = ?cfg.db_path, "preparing tables");
  store.reset_schema().await.context("schema setup failed")?;

  let records = caseload_cap::open_records(&cli.input)
    .with_context(|| format!("failed to open input {:?}", cli.input))?;

  let mut importer = Importer::new(store.clone(), cfg.commit_every);
  importer
    .begin()
    .await
    .context("failed to open the first batch transaction")?;

  tracing::info!(input = ?cli.input, commit_every = cfg.commit_every, "loading records");
  for item in records {
    let (line, record) = match item {
      Ok(entry) => entry,
      Err(err) => {
        tracing::error!(error = %err, "aborting: undecodable input record");
        return Err(err).context("record decoding failed");
      }
    };

    match importer.import(record).await {
      Ok(case_id) => {
        tracing::info!(count = importer.imported(), case_id, "case loaded");
      }
      Err(ImportError::Case { source, row }) => {
        // Dump the assembled row: it is the fastest way to see which field
        // the schema rejected.
        let dump = serde_json::to_string_pretty(&row)
          .unwrap_or_else(|_| format!("{row:#?}"));
        tracing::error!(line, error = %source, "aborting: case row rejected\n{dump}");
        return Err(source).context("case write failed");
      }
      Err(ImportError::Store(source)) => {
        tracing::error!(line, error = %source, "aborting: storage failure");
        return Err(source).context("storage failure");
      }
    }
  }

  let total = importer.finish().await.context("final commit failed")?;

  let counts = store.counts().await.context("failed to read row counts")?;
  tracing::info!(
    cases = counts.us_case,
    citations = counts.citation,
    citation_types = counts.citation_type,
    citation_links = counts.citation_case_rel,
    courts = counts.court,
    jurisdictions = counts.jurisdiction,
    reporters = counts.reporter,
    volumes = counts.volume,
    total,
    "load complete"
  );

  Ok(())
}
