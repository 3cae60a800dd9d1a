//! Shared test utilities for the leave ledger.
//!
//! This module provides common helpers for building employees and stores with
//! sensible defaults, parsing dates, and managing throwaway data files.

#![allow(clippy::unwrap_used)]

use crate::{config::LeaveCategories, core::LedgerStore, models::Employee};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Parses a `YYYY-MM-DD` literal.
pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// Creates a standalone employee with the default categories.
///
/// # Defaults
/// * `name`: `"Employee {id}"`
/// * `contact`: `"{id}@example.com"`
/// * `department`: `"Operations"`
/// * `credential`: None
pub fn test_employee(id: &str) -> Employee {
    Employee::new(
        id,
        &format!("Employee {id}"),
        &format!("{id}@example.com"),
        "Operations",
        None,
        &LeaveCategories::default(),
    )
    .unwrap()
}

/// An empty store.
pub fn test_store() -> LedgerStore {
    LedgerStore::new()
}

/// Adds an employee with the same defaults as [`test_employee`] to `store`.
pub fn create_test_employee(store: &mut LedgerStore, id: &str) {
    store
        .create(
            id,
            &format!("Employee {id}"),
            &format!("{id}@example.com"),
            "Operations",
            None,
            &LeaveCategories::default(),
        )
        .unwrap();
}

/// A unique path in the system temp directory, removed (with anything created
/// beneath it) when dropped.
pub struct TempDataFile {
    path: PathBuf,
}

impl TempDataFile {
    pub fn new(label: &str) -> Self {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "leave-ledger-{label}-{}-{n}.json",
            std::process::id()
        ));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the save temp file was left behind.
    pub fn temp_exists(&self) -> bool {
        let mut name = self.path.file_name().unwrap().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name).exists()
    }
}

impl Drop for TempDataFile {
    fn drop(&mut self) {
        if self.path.is_dir() {
            let _ = std::fs::remove_dir_all(&self.path);
        } else {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
