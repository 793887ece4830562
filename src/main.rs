use anyhow::Result;
use csvsql::{config::ConvertConfig, convert_file, logging};
use std::env;
use tracing::info;

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init();
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) load config (optional YAML path as first argument) ───────
    let cfg = match env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading config");
            ConvertConfig::load(path)?
        }
        None => {
            let cfg = ConvertConfig::default();
            cfg.validate()?;
            cfg
        }
    };

    // ─── 3) convert ──────────────────────────────────────────────────
    info!(
        input = %cfg.input_path.display(),
        output = %cfg.output_path.display(),
        table = %cfg.table_name,
        "converting"
    );
    let summary = convert_file(&cfg.input_path, &cfg.output_path, &cfg.table_name)?;
    info!(rows = summary.rows, columns = summary.columns, "all done");
    Ok(())
}
