//! Case assembly and batch writing for caseload.
//!
//! [`Importer`] drives one decoded record at a time: every embedded
//! sub-entity is normalized and resolved to its identity, the citation
//! linkage rows are emitted, and the flattened case row is written last so
//! each foreign key it carries already exists. A batch transaction is
//! committed every `commit_every` cases and once more at the end.

mod config;

pub use config::LoaderConfig;

use caseload_cap::{CaseRecord, fix_date};
use caseload_core::{
  CaseStore,
  entity::{CaseId, CaseRow, CitationCaseRel, CitationRow, CitationTypeRow},
};
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ImportError<E: std::error::Error + 'static> {
  /// The final case-row write failed. Carries the fully assembled row so
  /// the caller can dump it for diagnosis before aborting.
  #[error("failed to store case {id}: {source}", id = .row.us_case_id)]
  Case {
    source: E,
    row:    Box<CaseRow>,
  },

  /// Any other storage failure. Always fatal; duplicate keys on the
  /// key-keyed paths never surface here.
  #[error(transparent)]
  Store(#[from] E),
}

// ─── Importer ────────────────────────────────────────────────────────────────

/// Assembles and persists one case per input record.
///
/// The store handle is injected; the importer owns nothing but the
/// batch-commit cadence. Strictly sequential: a record is fully resolved
/// and written before the next one is taken.
pub struct Importer<S> {
  store:        S,
  commit_every: u64,
  imported:     u64,
}

impl<S: CaseStore> Importer<S> {
  pub fn new(store: S, commit_every: u64) -> Self {
    Self {
      store,
      commit_every: commit_every.max(1),
      imported: 0,
    }
  }

  /// Number of case rows written so far.
  pub fn imported(&self) -> u64 {
    self.imported
  }

  /// Open the first batch transaction. Call once, before the first
  /// [`import`](Self::import).
  pub async fn begin(&self) -> Result<(), ImportError<S::Error>> {
    self.store.begin().await?;
    Ok(())
  }

  /// Decompose `record`, resolve every embedded sub-entity, and write the
  /// flattened case row.
  ///
  /// Sub-entities are handled in a fixed order: analysis, citations, court,
  /// date fix-up, jurisdiction, provenance, reporter, volume.
  pub async fn import(
    &mut self,
    record: CaseRecord,
  ) -> Result<CaseId, ImportError<S::Error>> {
    let case_id = record.id;

    let analysis_id =
      self.store.insert_analysis(record.analysis.flatten()).await?;

    // A case can reference many citations and a citation can be referenced
    // by many cases; each pair gets one linkage row against the case's
    // external id.
    for citation in record.citations {
      let ct_id = self
        .store
        .resolve_citation_type(CitationTypeRow {
          label: citation.kind,
        })
        .await?;
      let citation_id = self
        .store
        .resolve_citation(CitationRow {
          ct_id,
          cite: citation.cite,
        })
        .await?;
      self
        .store
        .insert_citation_link(CitationCaseRel {
          citation_id,
          case_id,
        })
        .await?;
    }

    let court_id = record.court.id;
    self.store.ensure_court(record.court.into_row()).await?;

    let decision_date = fix_date(&record.decision_date);

    let jurisdiction_id = record.jurisdiction.id;
    self
      .store
      .ensure_jurisdiction(record.jurisdiction.into_row())
      .await?;

    let provenance_id = self
      .store
      .insert_provenance(record.provenance.into_row())
      .await?;

    let reporter_id = record.reporter.id;
    self.store.ensure_reporter(record.reporter.into_row()).await?;

    let volume_id = record.volume.barcode.clone();
    self.store.ensure_volume(record.volume.into_row()).await?;

    let row = CaseRow {
      us_case_id: case_id,
      analysis_id,
      court_id,
      decision_date,
      docket_number: record.docket_number,
      first_page: record.first_page,
      frontend_pdf_url: record.frontend_pdf_url,
      frontend_url: record.frontend_url,
      jurisdiction_id,
      last_page: record.last_page,
      last_updated: record.last_updated,
      name: record.name,
      name_abbreviation: record.name_abbreviation,
      provenance_id,
      reporter_id,
      url: record.url,
      volume_id,
    };

    self
      .store
      .insert_case(&row)
      .await
      .map_err(|source| ImportError::Case {
        source,
        row: Box::new(row),
      })?;

    self.imported += 1;
    if self.imported % self.commit_every == 0 {
      self.store.commit().await?;
      self.store.begin().await?;
    }

    Ok(case_id)
  }

  /// Commit whatever remains of the current batch. Call once, after the
  /// stream is exhausted. Returns the total number of cases written.
  pub async fn finish(self) -> Result<u64, ImportError<S::Error>> {
    self.store.commit().await?;
    Ok(self.imported)
  }
}

#[cfg(test)]
mod tests;
