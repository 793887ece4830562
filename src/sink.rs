// src/sink.rs
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use tracing::debug;

/// Run `write` against a buffered temp file next to `path`, then rename it
/// over `path`. If `write` fails the temp file is dropped and `path` is left
/// as it was.
pub fn write_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;

    let out = {
        let mut w = BufWriter::new(tmp.as_file_mut());
        let out = write(&mut w)?;
        w.flush()
            .with_context(|| format!("flushing output for {}", path.display()))?;
        out
    };

    debug!(tmp = %tmp.path().display(), dest = %path.display(), "renaming into place");
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("renaming temp file -> {}", path.display()))?;
    Ok(out)
}
