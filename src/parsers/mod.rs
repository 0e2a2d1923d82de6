//! Parsers turning raw upload bytes into typed order records.

pub mod orders_csv;

/// Error encountered while parsing an upload, pinned to the offending
/// data row and field. Rows are numbered from 1, excluding the header.
#[derive(Debug, thiserror::Error)]
#[error("row {row}, field '{field}': {message}")]
pub struct ParseError {
    pub row: usize,
    pub field: String,
    pub message: String,
}
