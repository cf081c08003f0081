//! End-to-end importer tests over the SQLite store.

use caseload_cap::{CaseRecord, parse_record};
use caseload_core::CaseStore as _;
use caseload_store_sqlite::SqliteStore;

use crate::{ImportError, Importer};

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory().await.expect("in-memory store");
  s.reset_schema().await.expect("schema setup");
  s
}

/// Build a record the way the loader sees one: through the codec.
fn record(id: i64, court_id: i64, cites: &[(&str, &str)]) -> CaseRecord {
  let citations: Vec<_> = cites
    .iter()
    .map(|(kind, cite)| serde_json::json!({"type": kind, "cite": cite}))
    .collect();

  let line = serde_json::json!({
    "id": id,
    "name": "William Dixon v. The People of the State of Illinois",
    "name_abbreviation": "Dixon v. People",
    "decision_date": "1897-05-08",
    "docket_number": "",
    "first_page": "179",
    "last_page": "194",
    "citations": citations,
    "court": {"id": court_id, "name": "Illinois Supreme Court",
              "name_abbreviation": "Ill.", "slug": "ill",
              "url": "https://api.case.law/v1/courts/ill/"},
    "jurisdiction": {"id": 29, "name": "Ill.", "name_long": "Illinois",
                     "slug": "ill",
                     "url": "https://api.case.law/v1/jurisdictions/ill/",
                     "whitelisted": false},
    "frontend_url": "https://cite.case.law/ill/168/179/",
    "analysis": {"cardinality": 1249, "char_count": 30699,
                 "ocr_confidence": 0.594,
                 "pagerank": {"raw": 3.09e-08, "percentile": 0.864},
                 "random_bucket": 461, "random_id": 6776315836857476_i64,
                 "sha256": "1c4ee5fca1f2f55f6f44e1cfe676a0ba9a14d9bd",
                 "simhash": "1:95e47e6d32b1e8c3", "word_count": 5495},
    "provenance": {"date_added": "2023-07-14", "source": "Harvard",
                   "batch": "2023.07"},
    "reporter": {"id": 409, "full_name": "Illinois Reports"},
    "url": "https://api.case.law/v1/cases/435800/",
    "volume": {"barcode": "32044057891608",
               "url": "https://api.case.law/v1/volumes/32044057891608/",
               "volume_number": 168}
  })
  .to_string();

  parse_record(&line).expect("test record decodes")
}

// ─── Deduplication across records ────────────────────────────────────────────

#[tokio::test]
async fn shared_court_yields_one_row_and_two_cases() {
  let s = store().await;
  let mut importer = Importer::new(s.clone(), 100);
  importer.begin().await.unwrap();

  importer
    .import(record(1, 8772, &[("official", "168 Ill. 179")]))
    .await
    .unwrap();
  // The second occurrence of court 8772 must not raise past the importer.
  importer
    .import(record(2, 8772, &[("official", "168 Ill. 180")]))
    .await
    .unwrap();
  importer.finish().await.unwrap();

  let counts = s.counts().await.unwrap();
  assert_eq!(counts.court, 1);
  assert_eq!(counts.us_case, 2);
}

#[tokio::test]
async fn identical_citations_across_cases_collapse_to_one_row() {
  let s = store().await;
  let mut importer = Importer::new(s.clone(), 100);
  importer.begin().await.unwrap();

  importer
    .import(record(1, 8772, &[("official", "168 Ill. 179")]))
    .await
    .unwrap();
  importer
    .import(record(2, 8772, &[("official", "168 Ill. 179")]))
    .await
    .unwrap();
  importer.finish().await.unwrap();

  let counts = s.counts().await.unwrap();
  assert_eq!(counts.citation_type, 1);
  assert_eq!(counts.citation, 1);
  // One linkage row per case, even though both point at the same citation.
  assert_eq!(counts.citation_case_rel, 2);
}

#[tokio::test]
async fn distinct_citations_within_one_record() {
  let s = store().await;
  let mut importer = Importer::new(s.clone(), 100);
  importer.begin().await.unwrap();

  importer
    .import(record(
      1,
      8772,
      &[("official", "168 Ill. 179"), ("parallel", "47 N.E. 505")],
    ))
    .await
    .unwrap();
  importer.finish().await.unwrap();

  let counts = s.counts().await.unwrap();
  assert_eq!(counts.citation_type, 2);
  assert_eq!(counts.citation, 2);
  assert_eq!(counts.citation_case_rel, 2);
}

#[tokio::test]
async fn analysis_and_provenance_stay_per_case() {
  let s = store().await;
  let mut importer = Importer::new(s.clone(), 100);
  importer.begin().await.unwrap();

  // Identical payloads on purpose; they must still get fresh rows.
  importer.import(record(1, 8772, &[])).await.unwrap();
  importer.import(record(2, 8772, &[])).await.unwrap();
  importer.finish().await.unwrap();

  let counts = s.counts().await.unwrap();
  assert_eq!(counts.analysis, 2);
  assert_eq!(counts.provenance, 2);
}

// ─── Failure reporting ───────────────────────────────────────────────────────

#[tokio::test]
async fn case_write_failure_carries_the_assembled_row() {
  let s = store().await;
  let mut importer = Importer::new(s.clone(), 100);
  importer.begin().await.unwrap();

  importer.import(record(1, 8772, &[])).await.unwrap();
  let err = importer.import(record(1, 8772, &[])).await.unwrap_err();

  assert!(
    matches!(err, ImportError::Case { ref row, .. } if row.us_case_id == 1)
  );
}

// ─── Batch durability ────────────────────────────────────────────────────────

#[tokio::test]
async fn commit_cadence_bounds_data_loss() {
  let dir = tempfile::tempdir().expect("tempdir");
  let db_path = dir.path().join("caseload.db");

  let writer = SqliteStore::open(&db_path).await.unwrap();
  writer.reset_schema().await.unwrap();

  let mut importer = Importer::new(writer.clone(), 100);
  importer.begin().await.unwrap();
  for id in 1..=150 {
    importer.import(record(id, 8772, &[])).await.unwrap();
  }

  // A crash here would lose only the uncommitted tail: a second connection
  // sees exactly the first hundred cases.
  let reader = SqliteStore::open(&db_path).await.unwrap();
  assert_eq!(reader.counts().await.unwrap().us_case, 100);

  let total = importer.finish().await.unwrap();
  assert_eq!(total, 150);
  assert_eq!(reader.counts().await.unwrap().us_case, 150);
}
