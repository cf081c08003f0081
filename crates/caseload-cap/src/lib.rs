//! Bulk-metadata record codec for caseload.
//!
//! Decodes one line of a case-law metadata export into a [`CaseRecord`] and
//! normalizes its embedded sub-entities into the flat rows defined in
//! [`caseload_core`]. Pure synchronous; no database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! let line = r#"{"id": 1, "name": "…", "…": "…"}"#;
//! let record = caseload_cap::parse_record(line).unwrap();
//! println!("case {} with {} citations", record.id, record.citations.len());
//! ```

pub mod error;
mod normalize;
mod reader;
mod record;

pub use error::{Error, Result};
pub use normalize::fix_date;
pub use reader::{RecordLines, open_records};
pub use record::{
  AnalysisRecord, CaseRecord, CitationRecord, CourtRecord, JurisdictionRecord,
  PagerankRecord, ProvenanceRecord, ReporterRecord, VolumeRecord,
};

/// Decode a single input line into a [`CaseRecord`].
///
/// Fields with no storage destination (`cites_to`, `preview`, and anything
/// else the schema does not know) are dropped here by not being declared on
/// the record types.
pub fn parse_record(line: &str) -> Result<CaseRecord> {
  Ok(serde_json::from_str(line)?)
}

// ─── Shared test data ────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_data {
  /// One complete export line, including the `cites_to` and `preview` fields
  /// the codec drops.
  pub(crate) const SAMPLE_LINE: &str = r#"{"id": 435800, "name": "William Dixon v. The People of the State of Illinois", "name_abbreviation": "Dixon v. People", "decision_date": "1897-05-08", "docket_number": "", "first_page": "179", "last_page": "194", "citations": [{"type": "official", "cite": "168 Ill. 179"}], "court": {"id": 8772, "name": "Illinois Supreme Court", "name_abbreviation": "Ill.", "slug": "ill", "url": "https://api.case.law/v1/courts/ill/"}, "jurisdiction": {"id": 29, "name": "Ill.", "name_long": "Illinois", "slug": "ill", "url": "https://api.case.law/v1/jurisdictions/ill/", "whitelisted": false}, "cites_to": [{"cite": "21 Ill. 601", "case_ids": [436641]}], "frontend_url": "https://cite.case.law/ill/168/179/", "frontend_pdf_url": "https://cite.case.law/pdf/435800/Dixon.pdf", "preview": [], "analysis": {"cardinality": 1249, "char_count": 30699, "ocr_confidence": 0.594, "pagerank": {"raw": 3.09e-08, "percentile": 0.864}, "random_bucket": 461, "random_id": 6776315836857476, "sha256": "1c4ee5fca1f2f55f6f44e1cfe676a0ba9a14d9bd", "simhash": "1:95e47e6d32b1e8c3", "word_count": 5495}, "last_updated": "2023-07-14T15:31:00.813633+00:00", "provenance": {"date_added": "2023-07-14", "source": "Harvard", "batch": "2023.07"}, "reporter": {"id": 409, "full_name": "Illinois Reports", "url": "https://api.case.law/v1/reporters/409/"}, "url": "https://api.case.law/v1/cases/435800/", "volume": {"barcode": "32044057891608", "url": "https://api.case.law/v1/volumes/32044057891608/", "volume_number": 168}}"#;
}
