//! Per-entity normalization from nested records into flat rows.
//!
//! Each conversion is the explicit, typed form of one transform the schema
//! needs: the page-rank flatten with its 0.0 default, the rename of each
//! externally supplied `id` to the relation's primary-key field, and the
//! partial-date fix-up. Citations are the one kind not convertible here —
//! swapping the literal type string for a citation-type identity needs the
//! store, so the importer does it.

use caseload_core::entity::{
  AnalysisRow, CourtRow, JurisdictionRow, ProvenanceRow, ReporterRow,
  VolumeRow,
};

use crate::record::{
  AnalysisRecord, CourtRecord, JurisdictionRecord, ProvenanceRecord,
  ReporterRecord, VolumeRecord,
};

// ─── Conversions ─────────────────────────────────────────────────────────────

impl AnalysisRecord {
  /// Project the optional `pagerank` sub-structure into the two stored
  /// columns. A record without one stores 0.0 for both.
  pub fn flatten(self) -> AnalysisRow {
    let (pagerank_percentile, pagerank_raw) = match self.pagerank {
      Some(p) => (p.percentile, p.raw),
      None => (0.0, 0.0),
    };

    AnalysisRow {
      cardinality: self.cardinality,
      char_count: self.char_count,
      ocr_confidence: self.ocr_confidence,
      pagerank_percentile,
      pagerank_raw,
      random_bucket: self.random_bucket,
      random_id: self.random_id,
      sha256: self.sha256,
      simhash: self.simhash,
      word_count: self.word_count,
    }
  }
}

impl CourtRecord {
  /// The export's `id` becomes the `court_id` primary key.
  pub fn into_row(self) -> CourtRow {
    CourtRow {
      court_id: self.id,
      name: self.name,
      name_abbreviation: self.name_abbreviation,
      slug: self.slug,
      url: self.url,
    }
  }
}

impl JurisdictionRecord {
  /// The export's `id` becomes the `jurisdiction_id` primary key.
  pub fn into_row(self) -> JurisdictionRow {
    JurisdictionRow {
      jurisdiction_id: self.id,
      name: self.name,
      name_long: self.name_long,
      slug: self.slug,
      url: self.url,
      whitelisted: self.whitelisted,
    }
  }
}

impl ReporterRecord {
  /// The export's `id` becomes the `reporter_id` primary key.
  pub fn into_row(self) -> ReporterRow {
    ReporterRow {
      reporter_id: self.id,
      full_name: self.full_name,
      url: self.url,
    }
  }
}

impl VolumeRecord {
  /// Field-for-field; the barcode already is the key.
  pub fn into_row(self) -> VolumeRow {
    VolumeRow {
      barcode: self.barcode,
      url: self.url,
      volume_number: self.volume_number,
    }
  }
}

impl ProvenanceRecord {
  /// Field-for-field passthrough.
  pub fn into_row(self) -> ProvenanceRow {
    ProvenanceRow {
      batch: self.batch,
      date_added: self.date_added,
      source: self.source,
    }
  }
}

// ─── Date fix-up ─────────────────────────────────────────────────────────────

/// Complete a partial decision date so the schema accepts it.
///
/// Very old cases often carry only a year (`1871`) or a year and month
/// (`1871-01`); both are extended to the first day. Anything else passes
/// through unchanged. The original precision is not recorded.
pub fn fix_date(date: &str) -> String {
  match date.len() {
    7 => format!("{date}-01"),
    4 => format!("{date}-01-01"),
    _ => date.to_owned(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::fix_date;
  use crate::record::{AnalysisRecord, CourtRecord, PagerankRecord};

  fn analysis(pagerank: Option<PagerankRecord>) -> AnalysisRecord {
    AnalysisRecord {
      cardinality: 1249,
      char_count: 30699,
      ocr_confidence: Some(0.594),
      pagerank,
      random_bucket: 461,
      random_id: 6776315836857476,
      sha256: "1c4ee5fca1f2f55f6f44e1cfe676a0ba9a14d9bd".into(),
      simhash: "1:95e47e6d32b1e8c3".into(),
      word_count: 5495,
    }
  }

  #[test]
  fn fix_date_extends_year_only() {
    assert_eq!(fix_date("1871"), "1871-01-01");
  }

  #[test]
  fn fix_date_extends_year_month() {
    assert_eq!(fix_date("1871-01"), "1871-01-01");
  }

  #[test]
  fn fix_date_passes_full_dates_through() {
    assert_eq!(fix_date("1871-03-05"), "1871-03-05");
  }

  #[test]
  fn fix_date_passes_other_lengths_through() {
    assert_eq!(fix_date(""), "");
    assert_eq!(fix_date("187"), "187");
  }

  #[test]
  fn pagerank_is_flattened_when_present() {
    let row = analysis(Some(PagerankRecord {
      percentile: 87.5,
      raw:        3.2,
    }))
    .flatten();
    assert_eq!(row.pagerank_percentile, 87.5);
    assert_eq!(row.pagerank_raw, 3.2);
  }

  #[test]
  fn pagerank_defaults_to_zero_when_absent() {
    let row = analysis(None).flatten();
    assert_eq!(row.pagerank_percentile, 0.0);
    assert_eq!(row.pagerank_raw, 0.0);
  }

  #[test]
  fn court_id_is_renamed_to_primary_key() {
    let row = CourtRecord {
      id:                8772,
      name:              "Illinois Supreme Court".into(),
      name_abbreviation: Some("Ill.".into()),
      slug:              "ill".into(),
      url:               "https://api.case.law/v1/courts/ill/".into(),
    }
    .into_row();
    assert_eq!(row.court_id, 8772);
    assert_eq!(row.name, "Illinois Supreme Court");
  }
}
