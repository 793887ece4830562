// src/error.rs

/// Failures the tools classify. I/O and CSV decoding errors travel as
/// `anyhow::Error` with context attached; callers `downcast_ref` to tell
/// these apart from them.
#[derive(Debug, thiserror::Error)]
pub enum CsvSqlError {
    /// A data row's field count differs from the header's. `record` is
    /// 1-based and counts the header as record 1, so a quoted field spanning
    /// several lines still counts once.
    #[error("malformed row in {input} at record {record}: expected {expected} fields, found {found}")]
    MalformedRow {
        input: String,
        record: u64,
        expected: usize,
        found: usize,
    },

    /// The source has no header row.
    #[error("{input} has no header row")]
    EmptyInput { input: String },

    /// A file being combined has a header of a different width than the
    /// first file's.
    #[error("header of {input} has {found} columns, first file has {expected}")]
    HeaderMismatch {
        input: String,
        expected: usize,
        found: usize,
    },

    #[error("no input files to combine")]
    NoInputs,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
