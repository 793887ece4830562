// src/combine/mod.rs
pub mod discover;

use crate::{error::CsvSqlError, sink::write_atomically};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::{fs::File, io::Write, path::Path, time::Instant};
use tracing::{debug, info, instrument, warn};

pub use discover::{discover_daily_files, extract_date_from_filename, parse_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineSummary {
    pub files: usize,
    pub rows: u64,
}

/// Concatenate `inputs` into one CSV on `writer`.
///
/// The first file's header is written once; data rows follow in input order,
/// file by file. Every header must have the first header's width, and every
/// row its file's header width, or the run stops with a `CsvSqlError` naming
/// the file. Headers of equal width but different names only log a warning.
pub fn combine_files<P: AsRef<Path>, W: Write>(inputs: &[P], writer: W) -> Result<CombineSummary> {
    if inputs.is_empty() {
        return Err(CsvSqlError::NoInputs.into());
    }

    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut first_header: Option<StringRecord> = None;
    let mut record = StringRecord::new();
    let mut rows: u64 = 0;

    for input in inputs {
        let path = input.as_ref();
        let label = path.display().to_string();
        let file = File::open(path).with_context(|| format!("opening {}", label))?;
        // flexible so that short/long rows reach our own check
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut header = StringRecord::new();
        if !rdr
            .read_record(&mut header)
            .with_context(|| format!("reading header of {}", label))?
        {
            return Err(CsvSqlError::EmptyInput { input: label }.into());
        }

        let width = match &first_header {
            None => {
                wtr.write_record(&header)
                    .with_context(|| format!("writing header from {}", label))?;
                header.len()
            }
            Some(first) if first.len() != header.len() => {
                return Err(CsvSqlError::HeaderMismatch {
                    input: label,
                    expected: first.len(),
                    found: header.len(),
                }
                .into());
            }
            Some(first) => {
                if *first != header {
                    warn!(file = %label, "header names differ from first file; rows appended by position");
                }
                first.len()
            }
        };
        if first_header.is_none() {
            first_header = Some(header);
        }

        let mut file_rows: u64 = 0;
        while rdr
            .read_record(&mut record)
            .with_context(|| format!("CSV parse error in {}", label))?
        {
            if record.len() != width {
                return Err(CsvSqlError::MalformedRow {
                    input: label,
                    // header is record 1
                    record: file_rows + 2,
                    expected: width,
                    found: record.len(),
                }
                .into());
            }
            wtr.write_record(&record)
                .with_context(|| format!("writing row from {}", label))?;
            file_rows += 1;
        }
        debug!(file = %label, rows = file_rows, "appended");
        rows += file_rows;
    }

    wtr.flush()?;
    Ok(CombineSummary {
        files: inputs.len(),
        rows,
    })
}

/// Concatenate `inputs` into a CSV file at `output`, replacing it only on
/// success.
#[instrument(level = "info", skip_all, fields(files = inputs.len(), output = %output.as_ref().display()))]
pub fn combine_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
    inputs: &[P],
    output: Q,
) -> Result<CombineSummary> {
    let output = output.as_ref();
    let start = Instant::now();

    let summary = write_atomically(output, |w| combine_files(inputs, w))?;

    info!(
        files = summary.files,
        rows = summary.rows,
        elapsed = ?start.elapsed(),
        "wrote combined CSV"
    );
    Ok(summary)
}
