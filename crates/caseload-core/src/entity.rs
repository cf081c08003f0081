//! Flat row types for every relation in the load schema.
//!
//! Each struct mirrors one table. The importer builds them from decoded
//! records and hands them to a [`CaseStore`](crate::store::CaseStore)
//! implementation. Identity fields distinguish externally supplied keys
//! (courts, jurisdictions, reporters, volume barcodes, case ids) from
//! store-generated sequence values (everything else).

use serde::Serialize;

// ─── Identity aliases ────────────────────────────────────────────────────────

pub type AnalysisId = i64;
pub type CitationTypeId = i64;
pub type CitationId = i64;
pub type CourtId = i64;
pub type JurisdictionId = i64;
pub type ProvenanceId = i64;
pub type ReporterId = i64;
pub type CaseId = i64;

// ─── Per-case rows (never deduplicated) ──────────────────────────────────────

/// OCR/content statistics for one case. Always inserted fresh, even when the
/// contents are identical across cases; the identity is a store-generated
/// sequence value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRow {
  pub cardinality:         i64,
  pub char_count:          i64,
  pub ocr_confidence:      Option<f64>,
  /// Flattened from the optional nested `pagerank` sub-structure; 0.0 when
  /// the source record carries none.
  pub pagerank_percentile: f64,
  pub pagerank_raw:        f64,
  pub random_bucket:       i64,
  pub random_id:           i64,
  pub sha256:              String,
  pub simhash:             String,
  pub word_count:          i64,
}

/// Batch/source metadata for one case. Always inserted fresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvenanceRow {
  pub batch:      String,
  pub date_added: String,
  pub source:     String,
}

// ─── Value-keyed rows ────────────────────────────────────────────────────────

/// An open-ended citation category ("official", "parallel", …), deduplicated
/// by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationTypeRow {
  pub label: String,
}

/// A citation, deduplicated by full value equality: the same (type, cite)
/// pair anywhere in the input resolves to one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationRow {
  pub ct_id: CitationTypeId,
  pub cite:  String,
}

/// The many-to-many join between citations and cases. Composite key, no
/// independent identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CitationCaseRel {
  pub citation_id: CitationId,
  pub case_id:     CaseId,
}

// ─── Key-keyed reference rows ────────────────────────────────────────────────

/// A court, keyed by its externally supplied id. The first occurrence wins;
/// later occurrences are accepted without re-validating the stored values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourtRow {
  pub court_id:          CourtId,
  pub name:              String,
  pub name_abbreviation: Option<String>,
  pub slug:              String,
  pub url:               String,
}

/// A jurisdiction, keyed by its externally supplied id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JurisdictionRow {
  pub jurisdiction_id: JurisdictionId,
  pub name:            String,
  pub name_long:       String,
  pub slug:            String,
  pub url:             String,
  pub whitelisted:     bool,
}

/// A reporter, keyed by its externally supplied id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporterRow {
  pub reporter_id: ReporterId,
  pub full_name:   Option<String>,
  pub url:         Option<String>,
}

/// A volume, keyed by its library barcode rather than a generated integer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeRow {
  pub barcode:       String,
  pub url:           String,
  pub volume_number: i64,
}

// ─── The case row ────────────────────────────────────────────────────────────

/// One row per input record, written exactly once after every embedded
/// sub-entity has been resolved to the foreign key stored here. Never
/// updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRow {
  pub us_case_id:        CaseId,
  pub analysis_id:       AnalysisId,
  pub court_id:          CourtId,
  /// Already fixed up: year-only and year-month dates arrive here extended
  /// to a full `YYYY-MM-DD`.
  pub decision_date:     String,
  pub docket_number:     String,
  pub first_page:        String,
  pub frontend_pdf_url:  Option<String>,
  pub frontend_url:      String,
  pub jurisdiction_id:   JurisdictionId,
  pub last_page:         String,
  pub last_updated:      Option<String>,
  pub name:              String,
  pub name_abbreviation: Option<String>,
  pub provenance_id:     ProvenanceId,
  pub reporter_id:       ReporterId,
  pub url:               String,
  pub volume_id:         String,
}
