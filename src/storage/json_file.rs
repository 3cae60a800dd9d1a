//! JSON snapshot file for the leave ledger.
//!
//! The whole ledger is one JSON object mapping employee id to an
//! [`EmployeeRecord`]. Saving rewrites the full snapshot: it is written to a
//! sibling temporary file first and then renamed over the target, so readers only
//! ever see a complete file.

use crate::{
    config::LeaveCategories,
    core::LedgerStore,
    entities::EmployeeRecord,
    errors::{Error, Result},
    models::Employee,
};
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Decodes a snapshot, keeping employees in file order.
///
/// A record that cannot be read fails the whole decode with `InvalidRecord`
/// naming the employee.
pub fn decode_snapshot(json: &str, categories: &LeaveCategories) -> Result<LedgerStore> {
    let raw: Map<String, Value> = serde_json::from_str(json)?;
    let mut store = LedgerStore::new();
    for (id, value) in raw {
        let employee = serde_json::from_value::<EmployeeRecord>(value)
            .map_err(Error::from)
            .and_then(|record| record.into_employee(&id, categories))
            .map_err(|e| Error::InvalidRecord {
                id: id.clone(),
                source: Box::new(e),
            })?;
        store.insert(&id, employee)?;
    }
    Ok(store)
}

/// Encodes a snapshot as pretty-printed JSON with four-space indentation.
pub fn encode_snapshot(store: &LedgerStore<Employee>) -> Result<Vec<u8>> {
    let mut map = Map::new();
    for (id, employee) in store.iter() {
        map.insert(
            id.to_string(),
            serde_json::to_value(EmployeeRecord::from(employee))?,
        );
    }

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    map.serialize(&mut serializer)?;
    Ok(buffer)
}

/// The ledger's durable snapshot on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by the file at `path`. Nothing is read until [`Self::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. A missing file is an empty ledger.
    #[instrument(skip(self, categories), fields(path = %self.path.display()))]
    pub async fn load(&self, categories: &LeaveCategories) -> Result<LedgerStore> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No ledger file yet, starting empty");
                return Ok(LedgerStore::new());
            }
            Err(e) => return Err(e.into()),
        };

        let store = decode_snapshot(&contents, categories)?;
        info!(employees = store.len(), "Loaded ledger snapshot");
        Ok(store)
    }

    /// Writes the full snapshot, replacing the previous file atomically.
    #[instrument(skip(self, store), fields(path = %self.path.display()))]
    pub async fn save(&self, store: &LedgerStore<Employee>) -> Result<()> {
        let bytes = encode_snapshot(store)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        debug!(bytes = bytes.len(), employees = store.len(), "Saved ledger snapshot");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
