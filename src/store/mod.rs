//! Flat CSV table storage.
//!
//! Each entity type is stored as a **table**: a single text file whose
//! first line is the comma-joined column header and whose following
//! lines are records, one per line. Values are always double-quoted on
//! write, with embedded quotes doubled. Embedded newlines are not
//! supported.
//!
//! A [`Table`] is an explicit handle constructed once at startup;
//! opening it runs the schema guard, which creates the file with the
//! expected header or fails fast if the existing header is missing
//! expected columns.

pub mod schema;
mod table;

pub use table::{Record, Table};

use std::io;
use std::path::PathBuf;

/// Errors that can occur during table storage operations.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error reading or writing a table file.
    Io(PathBuf, io::Error),
    /// The table file exists but its header lacks expected columns.
    SchemaMismatch {
        path: PathBuf,
        missing: Vec<String>,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StoreError::SchemaMismatch { path, missing } => {
                write!(
                    f,
                    "Table {} is missing expected column(s): {}",
                    path.display(),
                    missing.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(_, e) => Some(e),
            StoreError::SchemaMismatch { .. } => None,
        }
    }
}
