//! JSON catalog file
//!
//! The catalog is written as a pretty-printed JSON array of `{code, title}`
//! objects with non-ASCII characters kept as-is.

use crate::catalog::{CourseRecord, CODE_LENGTH};
use crate::output::OutputResult;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Writes the catalog to `path`, replacing any existing file
pub fn write_catalog(records: &[CourseRecord], path: &Path) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(())
}

/// Catalog entry as found on disk; older exports stored codes as numbers
#[derive(Debug, Deserialize)]
struct StoredRecord {
    code: StoredCode,
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCode {
    Text(String),
    Number(u64),
}

impl StoredCode {
    /// Numeric codes lost their leading zeros on the way out
    fn into_code(self) -> String {
        match self {
            StoredCode::Text(code) => code,
            StoredCode::Number(code) => format!("{:0width$}", code, width = CODE_LENGTH),
        }
    }
}

/// Loads a catalog written by [`write_catalog`]
///
/// Codes stored as JSON numbers are zero-padded back to five digits. Entries
/// that still do not form a valid record are skipped with a warning.
pub fn read_catalog(path: &Path) -> OutputResult<Vec<CourseRecord>> {
    let file = File::open(path)?;
    let stored: Vec<StoredRecord> = serde_json::from_reader(BufReader::new(file))?;

    let mut records = Vec::with_capacity(stored.len());
    for (index, entry) in stored.into_iter().enumerate() {
        let code = entry.code.into_code();
        match CourseRecord::new(code.as_str(), &entry.title) {
            Some(record) => records.push(record),
            None => tracing::warn!(
                "Skipping catalog entry {} in {}: invalid code {:?} or blank title",
                index,
                path.display(),
                code
            ),
        }
    }

    Ok(records)
}
