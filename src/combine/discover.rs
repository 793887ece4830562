// src/combine/discover.rs
use crate::error::CsvSqlError;
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Pulls an export date out of a file name, trying:
///  - an 8-digit contiguous `YYYYMMDD`
///  - a 10-char `YYYY-MM-DD` or `YYYY_MM_DD`
///
/// Only real calendar dates match, so `events_20250230.csv` yields `None`.
pub fn extract_date_from_filename(filename: &str) -> Option<NaiveDate> {
    let bytes = filename.as_bytes();

    for w in bytes.windows(8) {
        if w.iter().all(u8::is_ascii_digit) {
            // all ASCII, so this can't fail
            let s = std::str::from_utf8(w).ok()?;
            if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
                return Some(d);
            }
        }
    }

    for w in bytes.windows(10) {
        let sep = w[4];
        if (sep == b'-' || sep == b'_')
            && w[7] == sep
            && w.iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
        {
            let s = std::str::from_utf8(w).ok()?;
            let fmt = if sep == b'-' { "%Y-%m-%d" } else { "%Y_%m_%d" };
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return Some(d);
            }
        }
    }

    None
}

/// Parse exactly `YYYYMM` or `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    let t = s.trim();
    let digits = match t.len() {
        6 => t.to_string(),
        7 if t.as_bytes()[4] == b'-' => format!("{}{}", &t[..4], &t[5..]),
        _ => String::new(),
    };
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CsvSqlError::InvalidConfig(format!("month {:?} is not YYYYMM or YYYY-MM", s)).into());
    }
    NaiveDate::parse_from_str(&format!("{}01", digits), "%Y%m%d")
        .map_err(|_| CsvSqlError::InvalidConfig(format!("month {:?} is not a valid month", s)).into())
}

/// Find `<dir>/<prefix>_*.csv` files dated within `month`, oldest first.
pub fn discover_daily_files(dir: &Path, prefix: &str, month: NaiveDate) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}_*.csv",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(prefix)
    );
    debug!(%pattern, "scanning for daily exports");

    let mut found: Vec<(NaiveDate, PathBuf)> = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
        let path = entry?;
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        match extract_date_from_filename(name) {
            Some(d) if d.year() == month.year() && d.month() == month.month() => {
                found.push((d, path))
            }
            Some(_) => {}
            None => debug!(file = %name, "no date in file name; skipped"),
        }
    }
    found.sort();

    info!(
        month = %month.format("%Y-%m"),
        files = found.len(),
        "discovered daily exports"
    );
    Ok(found.into_iter().map(|(_, p)| p).collect())
}
