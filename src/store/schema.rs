//! Schema guard for table files.
//!
//! Runs once per table at startup, before any request is served. A
//! missing file is created with exactly the expected header line. An
//! existing file must already carry every expected column; if any are
//! missing the guard fails instead of warning or rewriting the header
//! in place, since a header rewrite over rows laid out for the old
//! header silently desynchronizes data from column order.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::StoreError;

/// Ensures the table file at `path` exists and carries `columns`.
///
/// Creates the file (and any missing parent directories) containing
/// only the header line if it does not exist. If it exists, the first
/// line must include every expected column; columns beyond the
/// expected set are tolerated. Idempotent: a second call on an
/// unchanged file does nothing.
pub fn ensure(path: &Path, columns: &[String]) -> Result<(), StoreError> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
        }
        fs::write(path, columns.join(","))
            .map_err(|e| StoreError::Io(path.to_path_buf(), e))?;
        tracing::info!(
            "Created table {} with {} column(s)",
            path.display(),
            columns.len()
        );
        return Ok(());
    }

    let file = File::open(path).map_err(|e| StoreError::Io(path.to_path_buf(), e))?;
    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .map_err(|e| StoreError::Io(path.to_path_buf(), e))?;

    let existing: Vec<&str> = header.trim_end().split(',').map(str::trim).collect();
    let missing: Vec<String> = columns
        .iter()
        .filter(|c| !existing.contains(&c.as_str()))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(StoreError::SchemaMismatch {
            path: path.to_path_buf(),
            missing,
        });
    }

    Ok(())
}
