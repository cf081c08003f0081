//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use caseload_core::{
  entity::{
    AnalysisId, AnalysisRow, CaseRow, CitationCaseRel, CitationId,
    CitationRow, CitationTypeId, CitationTypeRow, CourtRow, JurisdictionRow,
    ProvenanceId, ProvenanceRow, ReporterRow, VolumeRow,
  },
  store::{CaseStore, InsertOutcome, TableCounts},
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Whether `err` is a primary-key/uniqueness conflict — the one storage
/// error the key-keyed insert path absorbs. Everything else propagates.
fn is_duplicate_key(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        || f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

fn table_count(
  conn: &rusqlite::Connection,
  table: &str,
) -> rusqlite::Result<i64> {
  conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
    row.get(0)
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A caseload store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and every
/// clone talks to the same dedicated database thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`. The schema is not touched; call
  /// [`reset_schema`](Self::reset_schema) to start a load.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self { conn })
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Ok(Self { conn })
  }

  /// Drop and recreate every table. Destructive by design: the loader does
  /// full reloads only.
  pub async fn reset_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::Schema)
  }
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = Error;

  // ── Always-fresh rows ─────────────────────────────────────────────────

  async fn insert_analysis(&self, row: AnalysisRow) -> Result<AnalysisId> {
    Ok(
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO analysis (
               cardinality, char_count, ocr_confidence,
               pagerank_percentile, pagerank_raw,
               random_bucket, random_id, sha256, simhash, word_count
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
              row.cardinality,
              row.char_count,
              row.ocr_confidence,
              row.pagerank_percentile,
              row.pagerank_raw,
              row.random_bucket,
              row.random_id,
              row.sha256,
              row.simhash,
              row.word_count,
            ],
          )?;
          Ok(conn.last_insert_rowid())
        })
        .await?,
    )
  }

  async fn insert_provenance(
    &self,
    row: ProvenanceRow,
  ) -> Result<ProvenanceId> {
    Ok(
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO provenance (batch, date_added, source)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.batch, row.date_added, row.source],
          )?;
          Ok(conn.last_insert_rowid())
        })
        .await?,
    )
  }

  // ── Value-keyed deduplication ─────────────────────────────────────────
  //
  // SELECT-then-INSERT runs inside one `call` closure, which serializes it
  // on the connection thread. Ingestion is single-threaded anyway; a
  // concurrent caller would need per-table serialization right here.

  async fn resolve_citation_type(
    &self,
    row: CitationTypeRow,
  ) -> Result<CitationTypeId> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let existing: Option<i64> = conn
            .query_row(
              "SELECT ct_id FROM citation_type WHERE type = ?1",
              rusqlite::params![row.label],
              |r| r.get(0),
            )
            .optional()?;

          if let Some(id) = existing {
            return Ok(id);
          }

          conn.execute(
            "INSERT INTO citation_type (type) VALUES (?1)",
            rusqlite::params![row.label],
          )?;
          Ok(conn.last_insert_rowid())
        })
        .await?,
    )
  }

  async fn resolve_citation(&self, row: CitationRow) -> Result<CitationId> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let existing: Option<i64> = conn
            .query_row(
              "SELECT citation_id FROM citation
               WHERE ct_id = ?1 AND cite = ?2",
              rusqlite::params![row.ct_id, row.cite],
              |r| r.get(0),
            )
            .optional()?;

          if let Some(id) = existing {
            return Ok(id);
          }

          conn.execute(
            "INSERT INTO citation (ct_id, cite) VALUES (?1, ?2)",
            rusqlite::params![row.ct_id, row.cite],
          )?;
          Ok(conn.last_insert_rowid())
        })
        .await?,
    )
  }

  // ── Citation ↔ case linkage ───────────────────────────────────────────

  async fn insert_citation_link(&self, link: CitationCaseRel) -> Result<()> {
    Ok(
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO citation_case_rel (citation_id, case_id)
             VALUES (?1, ?2)",
            rusqlite::params![link.citation_id, link.case_id],
          )?;
          Ok(())
        })
        .await?,
    )
  }

  // ── Key-keyed, insert-or-ignore ───────────────────────────────────────
  //
  // The identity is externally supplied, so the insert is unconditional; a
  // duplicate key means some earlier record already brought the entity in,
  // and the stored values win.

  async fn ensure_court(&self, row: CourtRow) -> Result<InsertOutcome> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let result = conn.execute(
            "INSERT INTO court (court_id, name, name_abbreviation, slug, url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
              row.court_id,
              row.name,
              row.name_abbreviation,
              row.slug,
              row.url,
            ],
          );
          match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Existing),
            Err(e) => Err(e.into()),
          }
        })
        .await?,
    )
  }

  async fn ensure_jurisdiction(
    &self,
    row: JurisdictionRow,
  ) -> Result<InsertOutcome> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let result = conn.execute(
            "INSERT INTO jurisdiction
               (jurisdiction_id, name, name_long, slug, url, whitelisted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
              row.jurisdiction_id,
              row.name,
              row.name_long,
              row.slug,
              row.url,
              row.whitelisted,
            ],
          );
          match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Existing),
            Err(e) => Err(e.into()),
          }
        })
        .await?,
    )
  }

  async fn ensure_reporter(&self, row: ReporterRow) -> Result<InsertOutcome> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let result = conn.execute(
            "INSERT INTO reporter (reporter_id, full_name, url)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.reporter_id, row.full_name, row.url],
          );
          match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Existing),
            Err(e) => Err(e.into()),
          }
        })
        .await?,
    )
  }

  async fn ensure_volume(&self, row: VolumeRow) -> Result<InsertOutcome> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let result = conn.execute(
            "INSERT INTO volume (barcode, url, volume_number)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.barcode, row.url, row.volume_number],
          );
          match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Existing),
            Err(e) => Err(e.into()),
          }
        })
        .await?,
    )
  }

  // ── Case rows ─────────────────────────────────────────────────────────

  async fn insert_case(&self, row: &CaseRow) -> Result<()> {
    let row = row.clone();
    Ok(
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO us_case (
               us_case_id, analysis_id, court_id, decision_date,
               docket_number, first_page, frontend_pdf_url, frontend_url,
               jurisdiction_id, last_page, last_updated, name,
               name_abbreviation, provenance_id, reporter_id, url, volume_id
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                       ?13, ?14, ?15, ?16, ?17)",
            rusqlite::params![
              row.us_case_id,
              row.analysis_id,
              row.court_id,
              row.decision_date,
              row.docket_number,
              row.first_page,
              row.frontend_pdf_url,
              row.frontend_url,
              row.jurisdiction_id,
              row.last_page,
              row.last_updated,
              row.name,
              row.name_abbreviation,
              row.provenance_id,
              row.reporter_id,
              row.url,
              row.volume_id,
            ],
          )?;
          Ok(())
        })
        .await?,
    )
  }

  // ── Batch transaction control ─────────────────────────────────────────

  async fn begin(&self) -> Result<()> {
    Ok(
      self
        .conn
        .call(|conn| {
          conn.execute_batch("BEGIN")?;
          Ok(())
        })
        .await?,
    )
  }

  async fn commit(&self) -> Result<()> {
    Ok(
      self
        .conn
        .call(|conn| {
          conn.execute_batch("COMMIT")?;
          Ok(())
        })
        .await?,
    )
  }

  // ── Diagnostics ───────────────────────────────────────────────────────

  async fn counts(&self) -> Result<TableCounts> {
    Ok(
      self
        .conn
        .call(|conn| {
          Ok(TableCounts {
            analysis:          table_count(conn, "analysis")?,
            citation_type:     table_count(conn, "citation_type")?,
            citation:          table_count(conn, "citation")?,
            citation_case_rel: table_count(conn, "citation_case_rel")?,
            court:             table_count(conn, "court")?,
            jurisdiction:      table_count(conn, "jurisdiction")?,
            provenance:        table_count(conn, "provenance")?,
            reporter:          table_count(conn, "reporter")?,
            volume:            table_count(conn, "volume")?,
            us_case:           table_count(conn, "us_case")?,
          })
        })
        .await?,
    )
  }
}
