//! Serde types mirroring the nested shape of one input record.
//!
//! These are deliberately separate from the flat row types in
//! [`caseload_core::entity`]: a record is what the export gives us, a row is
//! what the schema stores. The conversions live in [`crate::normalize`].
//!
//! Unknown fields are ignored by serde's default behavior, which is how
//! `cites_to` (an auxiliary cross-reference list) and `preview` (a binary
//! blob) are dropped: neither has a storage destination.

use serde::Deserialize;

// ─── Sub-entity records ──────────────────────────────────────────────────────

/// The optional page-rank sub-structure inside an analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct PagerankRecord {
  pub percentile: f64,
  pub raw:        f64,
}

/// OCR/content statistics as they appear in the export.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRecord {
  pub cardinality:    i64,
  pub char_count:     i64,
  #[serde(default)]
  pub ocr_confidence: Option<f64>,
  #[serde(default)]
  pub pagerank:       Option<PagerankRecord>,
  pub random_bucket:  i64,
  pub random_id:      i64,
  pub sha256:         String,
  pub simhash:        String,
  pub word_count:     i64,
}

/// One entry of a record's citation list.
#[derive(Debug, Clone, Deserialize)]
pub struct CitationRecord {
  /// The literal category string ("official", "parallel", …). The importer
  /// swaps it for a resolved citation-type identity.
  #[serde(rename = "type")]
  pub kind: String,
  pub cite: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourtRecord {
  pub id:                i64,
  pub name:              String,
  #[serde(default)]
  pub name_abbreviation: Option<String>,
  pub slug:              String,
  pub url:               String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionRecord {
  pub id:          i64,
  pub name:        String,
  pub name_long:   String,
  pub slug:        String,
  pub url:         String,
  pub whitelisted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvenanceRecord {
  pub batch:      String,
  pub date_added: String,
  pub source:     String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReporterRecord {
  pub id:        i64,
  #[serde(default)]
  pub full_name: Option<String>,
  #[serde(default)]
  pub url:       Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeRecord {
  pub barcode:       String,
  pub url:           String,
  pub volume_number: i64,
}

// ─── The record ──────────────────────────────────────────────────────────────

/// One self-contained case with all its embedded sub-entities, as decoded
/// from a single input line.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseRecord {
  pub id:                i64,
  pub analysis:          AnalysisRecord,
  pub citations:         Vec<CitationRecord>,
  pub court:             CourtRecord,
  pub decision_date:     String,
  pub docket_number:     String,
  pub first_page:        String,
  #[serde(default)]
  pub frontend_pdf_url:  Option<String>,
  pub frontend_url:      String,
  pub jurisdiction:      JurisdictionRecord,
  pub last_page:         String,
  #[serde(default)]
  pub last_updated:      Option<String>,
  pub name:              String,
  #[serde(default)]
  pub name_abbreviation: Option<String>,
  pub provenance:        ProvenanceRecord,
  pub reporter:          ReporterRecord,
  pub url:               String,
  pub volume:            VolumeRecord,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
