//! Locating and normalizing the header row of a bank statement export.
//!
//! The export starts with a few rows of account preamble before the real
//! column header, and several labels in that header carry stray padding:
//!
//! ```text
//!  Date,Description,Customer  Reference,Bank     Reference,Credit,Debit,Running  Balance
//! ```

use crate::error::TransformError;

use csv::{ByteRecord, StringRecord};
use tracing::{debug, warn};

/// First cell of the real header row, leading space included.
pub const DATE_SIGNATURE: &str = " Date";
/// Second cell of the real header row.
pub const DESCRIPTION_SIGNATURE: &str = "Description";

// Checked in order, exact match only. Labels not listed here pass through as-is.
const LABEL_FIXES: [(&str, &str); 4] = [
    (" Date", "Date"),
    ("Bank     Reference", "Bank Reference"),
    ("Customer  Reference", "Customer Reference"),
    ("Running  Balance  ", "Running Balance"),
];

/// Maps a raw header label onto its canonical name.
pub fn normalize_label(label: &str) -> &str {
    for (raw, canonical) in LABEL_FIXES {
        if label == raw {
            return canonical;
        }
    }
    label
}

/// Canonical column names, positionally aligned with the input columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet(Vec<String>);

impl HeaderSet {
    pub fn from_record(record: &StringRecord) -> Self {
        Self(
            record
                .iter()
                .map(|label| normalize_label(label).to_string())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

pub fn is_header_signature(record: &ByteRecord) -> bool {
    record.get(0) == Some(DATE_SIGNATURE.as_bytes())
        && record.get(1) == Some(DESCRIPTION_SIGNATURE.as_bytes())
}

/// Decodes a raw row as UTF-8. Invalid bytes are replaced with U+FFFD and
/// the row keeps its position in the file.
pub fn decode_record(record: ByteRecord) -> StringRecord {
    match StringRecord::from_byte_record(record) {
        Ok(decoded) => decoded,
        Err(err) => {
            let record = err.into_byte_record();
            let position = record.position().cloned();
            warn!(
                line = position.as_ref().map(|pos| pos.line()),
                "Row is not valid UTF-8, invalid bytes replaced"
            );

            let mut decoded = StringRecord::from_byte_record_lossy(record);
            decoded.set_position(position);
            decoded
        }
    }
}

/// Consumes rows until the header signature shows up and returns the
/// normalized headers. Rows before the header are dropped undecoded, so
/// their encoding does not matter.
pub fn locate_header<I>(records: I) -> Result<HeaderSet, TransformError>
where
    I: Iterator<Item = Result<ByteRecord, csv::Error>>,
{
    let mut discarded = 0usize;

    for result in records {
        let record = result?;

        if is_header_signature(&record) {
            let headers = HeaderSet::from_record(&decode_record(record));
            debug!(?headers, discarded, "File headers");
            return Ok(headers);
        }

        discarded += 1;
    }

    Err(TransformError::HeaderNotFound)
}
