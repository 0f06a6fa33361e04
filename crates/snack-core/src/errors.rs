//! Errors raised while reading records.
//!
//! Fetch and transport errors live in `snack-sheets`; this module only covers
//! rows whose shape does not match what the filter expects.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A column the filter depends on is absent from the row.
    ///
    /// Usually means the spreadsheet header was renamed or deleted.
    #[error("record {row} is missing the '{field}' column")]
    MissingField { row: usize, field: String },
}
