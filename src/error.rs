// Input error taxonomy.
//
// Everything the pipeline returns is an `anyhow::Result`, but failures caused
// by bad or missing input files are raised as `InputError` so callers (and
// tests) can tell them apart from I/O hiccups with `downcast_ref`.

use std::path::PathBuf;

use thiserror::Error;

/// Why an input file was rejected.
#[derive(Debug, Error)]
pub enum InputError {
    /// A row had the wrong number of tab-separated columns.
    #[error("{path}: row {row} has {found} columns, expected {expected}")]
    MalformedRow {
        path: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column could not be parsed into the value it must hold.
    #[error("{path}: row {row}: invalid {field} value {value:?}")]
    InvalidField {
        path: String,
        row: usize,
        field: &'static str,
        value: String,
    },

    /// A file the run depends on is not on disk.
    #[error("required input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// An input (a directory or a thread file) had nothing to process.
    #[error("no {what} found in {}", .location.display())]
    NothingToProcess {
        what: &'static str,
        location: PathBuf,
    },
}

/// Fail fast if `path` does not exist.
pub fn require_file(path: &std::path::Path) -> Result<(), InputError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InputError::MissingFile(path.to_path_buf()))
    }
}
