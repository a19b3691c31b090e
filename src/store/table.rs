//! Row-oriented access to a single table file.
//!
//! The on-disk dialect is a deliberately small hand-written CSV:
//! comma delimiter, `"` quote character, escape by doubling. The
//! writer quotes every field, not just fields that need it, so the
//! format stays self-consistent. The reader also accepts bare
//! (unquoted) values so hand-edited files still load.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use super::{schema, StoreError};

/// One row of a table: a mapping from column name to string value.
pub type Record = HashMap<String, String>;

/// A handle to one table file with its expected column set.
///
/// Opening the table runs the schema guard; after that every operation
/// re-reads the file, which is the sole source of truth.
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    columns: Vec<String>,
}

impl Table {
    /// Opens a table, creating the backing file with the expected
    /// header if it does not exist.
    ///
    /// Fails with [`StoreError::SchemaMismatch`] if an existing file's
    /// header lacks any of the expected columns.
    pub fn open(path: impl Into<PathBuf>, columns: &[&str]) -> Result<Self, StoreError> {
        let path = path.into();
        let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
        schema::ensure(&path, &columns)?;
        Ok(Self { path, columns })
    }

    /// The expected column set, in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Reads every record in file order.
    ///
    /// Rows shorter than the header are padded with empty strings so
    /// each record has one value per column. Later duplicates are
    /// retained; callers decide merge policy.
    pub fn load(&self) -> Result<Vec<Record>, StoreError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Io(self.path.clone(), e))?;

        let mut lines = contents.lines();
        let header: Vec<String> = match lines.next() {
            Some(line) => line.split(',').map(|c| c.trim().to_string()).collect(),
            None => return Ok(Vec::new()),
        };

        let mut records = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let mut values = parse_line(line);
            values.resize(header.len(), String::new());
            records.push(header.iter().cloned().zip(values).collect());
        }
        Ok(records)
    }

    /// Appends one record as a new line.
    ///
    /// Only the header line is read back; the record is formatted in
    /// header order with missing columns written as empty strings.
    pub fn append(&self, record: &Record) -> Result<(), StoreError> {
        let header = self.read_header()?;
        let line = format_line(&header, record);

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::Io(self.path.clone(), e))?;
        write!(file, "\n{}", line).map_err(|e| StoreError::Io(self.path.clone(), e))?;
        Ok(())
    }

    /// Replaces the whole table with `records` under the table's
    /// configured header.
    ///
    /// An empty input is a no-op and leaves the file untouched; a
    /// "delete all records" intent cannot be expressed here. The file
    /// is written to a temp path and renamed into place so no partial
    /// table is ever observable.
    pub fn rewrite(&self, records: &[Record]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut out = self.columns.join(",");
        for record in records {
            out.push('\n');
            out.push_str(&format_line(&self.columns, record));
        }

        let temp_path = self.path.with_extension("csv.tmp");
        fs::write(&temp_path, out).map_err(|e| StoreError::Io(temp_path.clone(), e))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::Io(self.path.clone(), e))?;
        Ok(())
    }

    /// Reads the header line of the backing file.
    fn read_header(&self) -> Result<Vec<String>, StoreError> {
        let file = File::open(&self.path).map_err(|e| StoreError::Io(self.path.clone(), e))?;
        let mut header = String::new();
        BufReader::new(file)
            .read_line(&mut header)
            .map_err(|e| StoreError::Io(self.path.clone(), e))?;
        Ok(header
            .trim_end()
            .split(',')
            .map(|c| c.trim().to_string())
            .collect())
    }
}

/// Splits one record line into field values.
///
/// Recognizes two token shapes: a double-quoted span (which may
/// contain `""` for an embedded quote) and a bare run of non-comma,
/// non-quote characters. Surrounding quotes are stripped and doubled
/// quotes collapsed.
fn parse_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => values.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    values.push(field);
    values
}

/// Formats a record as one line, in `columns` order. Every value is
/// quoted, with embedded quotes doubled.
fn format_line(columns: &[String], record: &Record) -> String {
    columns
        .iter()
        .map(|col| quote(record.get(col).map(String::as_str).unwrap_or("")))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
