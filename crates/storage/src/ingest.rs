//! Upload normalization.
//!
//! Turns the output of a file parser (a header list plus one key/value
//! record per line) into a [`NewDataset`] whose rows all span the same
//! column list. Parsing CSV or spreadsheet bytes happens before this step.

use crate::dataset_store::NewDataset;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use tabula_core::{Error, Result, Row, Value};

/// One parsed record: cell values keyed by column name, in file order.
pub type Record = Vec<(String, Value)>;

/// Normalizes parsed file contents.
///
/// - Column names are trimmed; a name repeated after trimming keeps its
///   first position.
/// - Record keys are trimmed and matched against the columns. A key that was
///   not declared is appended to the column list the first time it is seen.
/// - Cells a record does not mention are null. When a record repeats a key,
///   the first value wins.
///
/// # Errors
///
/// `InvalidArgument` when there are no records or no columns.
pub fn normalize(filename: &str, columns: Vec<String>, records: Vec<Record>) -> Result<NewDataset> {
    if records.is_empty() {
        return Err(Error::invalid_argument("File contains no data"));
    }

    let mut header: Vec<String> = Vec::with_capacity(columns.len());
    for name in columns {
        push_unique(&mut header, name.trim());
    }
    for record in &records {
        for (key, _) in record {
            push_unique(&mut header, key.trim());
        }
    }
    if header.is_empty() {
        return Err(Error::invalid_argument("File has no columns"));
    }

    let rows = records
        .into_iter()
        .map(|record| {
            let mut row = Row::nulls(header.len());
            let mut filled = alloc::vec![false; header.len()];
            for (key, value) in record {
                if let Some(idx) = header.iter().position(|c| c == key.trim()) {
                    if !filled[idx] {
                        filled[idx] = true;
                        row.set(idx, value);
                    }
                }
            }
            row
        })
        .collect();

    Ok(NewDataset {
        filename: filename.to_string(),
        columns: header,
        rows,
    })
}

fn push_unique(header: &mut Vec<String>, name: &str) {
    if !header.iter().any(|c| c == name) {
        header.push(name.to_string());
    }
}

/// Returns true if `filename` ends with one of `allowed` (e.g. `".csv"`),
/// ignoring ASCII case.
pub fn has_allowed_extension<S: AsRef<str>>(filename: &str, allowed: &[S]) -> bool {
    let lower = filename.to_ascii_lowercase();
    allowed
        .iter()
        .any(|ext| lower.ends_with(&ext.as_ref().to_ascii_lowercase()))
}
