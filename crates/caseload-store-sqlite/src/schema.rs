//! SQL schema for the caseload SQLite store.
//!
//! The loader does full reloads, not incremental updates: every run drops
//! and recreates the tables before the first record is written.
//!
//! No foreign-key constraints are declared. Citation linkage rows are
//! written before the case row they reference, so declared constraints
//! would reject valid write orderings.

/// Destructive schema DDL, executed once at startup.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

DROP TABLE IF EXISTS analysis;
CREATE TABLE analysis (
    analysis_id          INTEGER PRIMARY KEY,
    cardinality          INTEGER NOT NULL,
    char_count           INTEGER NOT NULL,
    ocr_confidence       REAL,
    pagerank_percentile  REAL NOT NULL,
    pagerank_raw         REAL NOT NULL,
    random_bucket        INTEGER NOT NULL,
    random_id            INTEGER NOT NULL,
    sha256               TEXT NOT NULL,
    simhash              TEXT NOT NULL,
    word_count           INTEGER NOT NULL
);

DROP TABLE IF EXISTS citation_type;
CREATE TABLE citation_type (
    ct_id  INTEGER PRIMARY KEY,
    type   TEXT NOT NULL       -- open-ended: 'official' | 'parallel' | …
);
CREATE INDEX citation_type_idx ON citation_type(type);

DROP TABLE IF EXISTS citation;
CREATE TABLE citation (
    citation_id  INTEGER PRIMARY KEY,
    ct_id        INTEGER NOT NULL,
    cite         TEXT
);

-- Citations attach to cases n:m.
DROP TABLE IF EXISTS citation_case_rel;
CREATE TABLE citation_case_rel (
    citation_id  INTEGER NOT NULL,
    case_id      INTEGER NOT NULL,
    PRIMARY KEY (citation_id, case_id)
);
CREATE INDEX citation_case_rel_case_idx ON citation_case_rel(case_id);

DROP TABLE IF EXISTS court;
CREATE TABLE court (
    court_id           INTEGER PRIMARY KEY,   -- externally supplied
    name               TEXT NOT NULL,
    name_abbreviation  TEXT,
    slug               TEXT NOT NULL,
    url                TEXT NOT NULL
);

DROP TABLE IF EXISTS jurisdiction;
CREATE TABLE jurisdiction (
    jurisdiction_id  INTEGER PRIMARY KEY,     -- externally supplied
    name             TEXT NOT NULL,
    name_long        TEXT NOT NULL,
    slug             TEXT NOT NULL,
    url              TEXT NOT NULL,
    whitelisted      INTEGER NOT NULL
);

DROP TABLE IF EXISTS provenance;
CREATE TABLE provenance (
    provenance_id  INTEGER PRIMARY KEY,
    batch          TEXT NOT NULL,
    date_added     TEXT NOT NULL,
    source         TEXT NOT NULL
);

DROP TABLE IF EXISTS reporter;
CREATE TABLE reporter (
    reporter_id  INTEGER PRIMARY KEY,         -- externally supplied
    full_name    TEXT,
    url          TEXT
);

DROP TABLE IF EXISTS volume;
CREATE TABLE volume (
    barcode        TEXT PRIMARY KEY,          -- externally supplied, non-numeric
    url            TEXT NOT NULL,
    volume_number  INTEGER NOT NULL
);

DROP TABLE IF EXISTS us_case;
CREATE TABLE us_case (
    us_case_id         INTEGER PRIMARY KEY,   -- externally supplied
    analysis_id        INTEGER NOT NULL,
    -- citations attach via citation_case_rel; cites_to is not imported
    court_id           INTEGER NOT NULL,
    decision_date      TEXT,
    docket_number      TEXT NOT NULL,
    first_page         TEXT NOT NULL,         -- can be '3-5'
    frontend_pdf_url   TEXT,
    frontend_url       TEXT NOT NULL,
    jurisdiction_id    INTEGER NOT NULL,
    last_page          TEXT NOT NULL,         -- can be '3-5'
    last_updated       TEXT,
    name               TEXT NOT NULL,
    name_abbreviation  TEXT,
    -- preview is not imported
    provenance_id      INTEGER NOT NULL,
    reporter_id        INTEGER NOT NULL,
    url                TEXT NOT NULL,
    volume_id          TEXT NOT NULL
);
";
