use super::{RetagError, WriteMode};
use crate::rewrite::RewriteResult;
use crate::utils::atomic_write;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write the rewritten lines back over `path`.
///
/// `Truncate` reopens the existing file and rewrites it in place, so a failure
/// part-way leaves it partially written. `Atomic` replaces it via rename.
/// `backup` is only carried into the error so the caller can point at it.
pub fn write_lines(
    path: &Path,
    result: &RewriteResult,
    mode: WriteMode,
    backup: Option<&Path>,
) -> Result<(), RetagError> {
    let written = match mode {
        WriteMode::Truncate => truncate_and_write(path, &result.lines),
        WriteMode::Atomic => atomic_write(path, &result.to_content()),
    };

    written.map_err(|source| RetagError::Write {
        path: path.to_path_buf(),
        source,
        backup: backup.map(Path::to_path_buf),
    })?;

    info!("Wrote {} lines to {}", result.lines.len(), path.display());
    Ok(())
}

fn truncate_and_write(path: &Path, lines: &[Vec<u8>]) -> io::Result<()> {
    let file = OpenOptions::new().write(true).truncate(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
