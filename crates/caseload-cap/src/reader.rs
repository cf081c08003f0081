//! Line-oriented reader over the record stream.
//!
//! The export ships as one JSON object per line, usually compressed. The
//! reader decompresses on the fly so the multi-gigabyte file never has to
//! exist uncompressed on disk.

use std::{
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

use flate2::read::GzDecoder;

use crate::{
  error::{Error, Result},
  record::CaseRecord,
};

// ─── RecordLines ─────────────────────────────────────────────────────────────

/// Iterator of decoded records with their 1-based input line numbers.
///
/// Blank lines are skipped (line numbering still counts them). Decoding
/// stops at the first I/O or decode error; the caller treats both as fatal.
pub struct RecordLines {
  inner: Box<dyn BufRead + Send>,
  line:  u64,
}

impl RecordLines {
  pub fn new(reader: impl BufRead + Send + 'static) -> Self {
    Self {
      inner: Box::new(reader),
      line:  0,
    }
  }
}

impl Iterator for RecordLines {
  type Item = Result<(u64, CaseRecord)>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let mut buf = String::new();
      match self.inner.read_line(&mut buf) {
        Ok(0) => return None,
        Ok(_) => {
          self.line += 1;
          let line = buf.trim();
          if line.is_empty() {
            continue;
          }
          return Some(
            serde_json::from_str(line)
              .map(|record| (self.line, record))
              .map_err(|source| Error::Decode {
                line: self.line,
                source,
              }),
          );
        }
        Err(e) => return Some(Err(Error::Io(e))),
      }
    }
  }
}

// ─── Opening by path ─────────────────────────────────────────────────────────

/// Open `path` as a record stream. A `.gz` extension selects gzip
/// decompression; anything else is read as plain text.
pub fn open_records(path: &Path) -> Result<RecordLines> {
  let file = File::open(path)?;
  let gzipped = path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

  if gzipped {
    Ok(RecordLines::new(BufReader::new(GzDecoder::new(file))))
  } else {
    Ok(RecordLines::new(BufReader::new(file)))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::io::{Cursor, Write as _};

  use flate2::{Compression, write::GzEncoder};

  use super::{RecordLines, open_records};
  use crate::{Error, test_data::SAMPLE_LINE};

  #[test]
  fn yields_records_with_line_numbers() {
    let input = format!("{SAMPLE_LINE}\n\n{SAMPLE_LINE}\n");
    let mut lines = RecordLines::new(Cursor::new(input));

    let (line, record) = lines.next().unwrap().unwrap();
    assert_eq!(line, 1);
    assert_eq!(record.id, 435800);

    // The blank line is skipped but still counted.
    let (line, _) = lines.next().unwrap().unwrap();
    assert_eq!(line, 3);

    assert!(lines.next().is_none());
  }

  #[test]
  fn decode_errors_carry_the_line_number() {
    let input = format!("{SAMPLE_LINE}\nnot json\n");
    let mut lines = RecordLines::new(Cursor::new(input));

    assert!(lines.next().unwrap().is_ok());
    let err = lines.next().unwrap().unwrap_err();
    assert!(matches!(err, Error::Decode { line: 2, .. }));
  }

  #[test]
  fn opens_plain_and_gzipped_files() {
    let dir = tempfile::tempdir().expect("tempdir");

    let plain = dir.path().join("data.jsonl");
    std::fs::write(&plain, format!("{SAMPLE_LINE}\n")).unwrap();

    let gz = dir.path().join("data.jsonl.gz");
    let mut encoder =
      GzEncoder::new(std::fs::File::create(&gz).unwrap(), Compression::fast());
    encoder.write_all(SAMPLE_LINE.as_bytes()).unwrap();
    encoder.write_all(b"\n").unwrap();
    encoder.finish().unwrap();

    for path in [plain, gz] {
      let records: Vec<_> = open_records(&path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
      assert_eq!(records.len(), 1, "one record in {path:?}");
      assert_eq!(records[0].1.id, 435800);
    }
  }
}
