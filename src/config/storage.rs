//! Storage configuration for the leave ledger snapshot file.
//!
//! The ledger is kept in memory and written through to a single JSON file after
//! every change. This module resolves where that file lives.

use std::path::PathBuf;

/// Environment variable naming the ledger data file.
pub const DATA_FILE_ENV: &str = "LEAVE_LEDGER_DATA_FILE";

const DEFAULT_DATA_FILE: &str = "data.json";

/// Gets the data file path from environment variable or returns the default path.
///
/// This function looks for `LEAVE_LEDGER_DATA_FILE` in the environment and falls back to
/// `data.json` in the working directory if not found.
#[must_use]
pub fn get_data_file_path() -> PathBuf {
    std::env::var(DATA_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE))
}
