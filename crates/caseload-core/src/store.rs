//! The `CaseStore` trait and supporting result types.
//!
//! The trait is implemented by storage backends (e.g.
//! `caseload-store-sqlite`). The importer depends on this abstraction, not
//! on any concrete backend, and the handle is passed explicitly — there is
//! no process-wide connection state.

use std::future::Future;

use crate::entity::{
  AnalysisId, AnalysisRow, CaseRow, CitationCaseRel, CitationId, CitationRow,
  CitationTypeId, CitationTypeRow, CourtRow, JurisdictionRow, ProvenanceId,
  ProvenanceRow, ReporterRow, VolumeRow,
};

// ─── Insert outcome ──────────────────────────────────────────────────────────

/// Result of a key-keyed insert for entities that carry their own identity.
///
/// Re-encountering the same external key across records is the expected,
/// common case; it is a result, not an error. Any storage failure other than
/// a duplicate key stays an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
  /// The row was inserted.
  Created,
  /// A row with this key already exists; stored values are not re-checked
  /// against the new row.
  Existing,
}

// ─── Table counts ────────────────────────────────────────────────────────────

/// Per-relation row counts, used for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
  pub analysis:          i64,
  pub citation_type:     i64,
  pub citation:          i64,
  pub citation_case_rel: i64,
  pub court:             i64,
  pub jurisdiction:      i64,
  pub provenance:        i64,
  pub reporter:          i64,
  pub volume:            i64,
  pub us_case:           i64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the relational store the importer writes into.
///
/// Three identity policies are exposed:
/// - `insert_*` — always-fresh rows with store-generated identities
///   (analysis, provenance) or externally supplied ones (case, linkage);
/// - `resolve_*` — value-keyed find-or-insert (citation types, citations):
///   equal values anywhere in the input yield the same identity;
/// - `ensure_*` — key-keyed insert-or-ignore (court, jurisdiction, reporter,
///   volume): the identity is already known, a duplicate key is a no-op.
///
/// All methods return `Send` futures so the trait composes with a
/// multi-threaded async runtime, even though ingestion itself is strictly
/// sequential.
pub trait CaseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Always-fresh rows ─────────────────────────────────────────────────

  /// Insert an analysis row and return the store-assigned identity.
  fn insert_analysis(
    &self,
    row: AnalysisRow,
  ) -> impl Future<Output = Result<AnalysisId, Self::Error>> + Send + '_;

  /// Insert a provenance row and return the store-assigned identity.
  fn insert_provenance(
    &self,
    row: ProvenanceRow,
  ) -> impl Future<Output = Result<ProvenanceId, Self::Error>> + Send + '_;

  // ── Value-keyed deduplication ─────────────────────────────────────────

  /// Return the identity of an equal citation-type row, inserting it first
  /// if none exists.
  fn resolve_citation_type(
    &self,
    row: CitationTypeRow,
  ) -> impl Future<Output = Result<CitationTypeId, Self::Error>> + Send + '_;

  /// Return the identity of a citation row equal in every field, inserting
  /// it first if none exists.
  fn resolve_citation(
    &self,
    row: CitationRow,
  ) -> impl Future<Output = Result<CitationId, Self::Error>> + Send + '_;

  // ── Citation ↔ case linkage ───────────────────────────────────────────

  /// Insert one many-to-many linkage row.
  fn insert_citation_link(
    &self,
    link: CitationCaseRel,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Key-keyed, insert-or-ignore ───────────────────────────────────────

  fn ensure_court(
    &self,
    row: CourtRow,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  fn ensure_jurisdiction(
    &self,
    row: JurisdictionRow,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  fn ensure_reporter(
    &self,
    row: ReporterRow,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  fn ensure_volume(
    &self,
    row: VolumeRow,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  // ── Case rows ─────────────────────────────────────────────────────────

  /// Write the flattened case row. Every foreign key it carries must have
  /// been resolved beforehand.
  fn insert_case<'a>(
    &'a self,
    row: &'a CaseRow,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Batch transaction control ─────────────────────────────────────────

  /// Open a batch transaction.
  fn begin(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Commit the open batch transaction, making everything written since the
  /// last [`begin`](Self::begin) durable.
  fn commit(&self)
  -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Diagnostics ───────────────────────────────────────────────────────

  /// Row counts for every relation.
  fn counts(
    &self,
  ) -> impl Future<Output = Result<TableCounts, Self::Error>> + Send + '_;
}
