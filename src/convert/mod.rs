// src/convert/mod.rs
pub mod statement;

use crate::{error::CsvSqlError, sink::write_atomically};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
    time::Instant,
};
use tracing::{debug, info, instrument};

pub use statement::{create_table_statement, escape_literal, insert_statement};

/// What a conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub columns: usize,
    pub rows: u64,
}

/// Read CSV from `reader` and write a SQL script for `table` to `writer`.
///
/// The first record is the header; every later record becomes one `INSERT`.
/// Rows are written as they are read. A row whose length differs from the
/// header stops the run with `CsvSqlError::MalformedRow` before anything is
/// written for it.
pub fn convert<R: Read, W: Write>(reader: R, writer: W, table: &str) -> Result<ConvertSummary> {
    convert_labelled(reader, writer, table, "input")
}

/// `convert`, with `input` naming the source in errors.
fn convert_labelled<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    table: &str,
    input: &str,
) -> Result<ConvertSummary> {
    // flexible so that short/long rows reach our own check
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header = StringRecord::new();
    if !rdr.read_record(&mut header).context("reading CSV header")? {
        return Err(CsvSqlError::EmptyInput {
            input: input.to_string(),
        }
        .into());
    }

    writeln!(writer, "{}", create_table_statement(table, &header))?;
    writeln!(writer)?;

    let mut record = StringRecord::new();
    let mut rows: u64 = 0;
    while rdr
        .read_record(&mut record)
        .with_context(|| format!("CSV parse error after data row {}", rows))?
    {
        if record.len() != header.len() {
            return Err(CsvSqlError::MalformedRow {
                input: input.to_string(),
                // header is record 1
                record: rows + 2,
                expected: header.len(),
                found: record.len(),
            }
            .into());
        }
        writeln!(writer, "{}", insert_statement(table, &record))?;
        rows += 1;
    }

    debug!(columns = header.len(), rows, "conversion finished");
    Ok(ConvertSummary {
        columns: header.len(),
        rows,
    })
}

/// Convert the CSV at `input` into a SQL script at `output`.
///
/// `output` is only replaced once the whole script has been written.
#[instrument(level = "info", skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display(), table = %table))]
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    table: &str,
) -> Result<ConvertSummary> {
    let input = input.as_ref();
    let output = output.as_ref();
    let start = Instant::now();

    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let label = input.display().to_string();
    let summary = write_atomically(output, |w| convert_labelled(file, w, table, &label))
        .with_context(|| format!("converting {}", input.display()))?;

    info!(
        columns = summary.columns,
        rows = summary.rows,
        elapsed = ?start.elapsed(),
        "wrote SQL script"
    );
    Ok(summary)
}
