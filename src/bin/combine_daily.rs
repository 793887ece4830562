// src/bin/combine_daily.rs
//
// Concatenate daily CSV exports into one monthly CSV.
//
//   combine_daily                 # uses ./combine.yaml
//   combine_daily <config.yaml>

use anyhow::Result;
use csvsql::{combine_to_file, config::CombineConfig, logging};
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    logging::init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("combine.yaml"));
    info!(config = %path.display(), "loading config");
    let cfg = CombineConfig::load(&path)?;

    let (inputs, output) = cfg.resolve()?;
    for f in &inputs {
        info!(file = %f.display(), "input");
    }

    let summary = combine_to_file(&inputs[..], &output)?;
    info!(
        files = summary.files,
        rows = summary.rows,
        output = %output.display(),
        "all done"
    );
    Ok(())
}
