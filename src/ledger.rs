//! Concurrent, write-through leave ledger.
//!
//! [`Ledger`] is the handle the outer layers (HTTP handlers, admin tools) share.
//! It pairs the [`LedgerStore`] with the leave engine and the snapshot file:
//!
//! - every employee record sits behind its own `tokio::sync::Mutex`, so all
//!   mutation of one employee is serialized while other employees proceed
//! - the id index is an `RwLock`, taken for write only to add or remove employees
//! - a separate snapshot of committed records is what gets written to disk, and it
//!   is written before the employee lock is released
//!
//! Locks are always taken in the order index, employee, snapshot. When the write to
//! disk fails the in-memory change is rolled back and the I/O error returned.

use crate::{
    config::{AppConfig, LeaveCategories},
    core::{CategorySummary, LedgerStore, Reconciliation, RequestRow, engine, report},
    errors::{Error, Result},
    models::{Employee, LeaveCategory, LeaveRequest, LeaveStatus},
    storage::JsonFileStore,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument, warn};

type SharedEmployee = Arc<Mutex<Employee>>;

/// Shared handle to the leave ledger. Cloning is cheap.
#[derive(Clone)]
pub struct Ledger {
    inner: Arc<LedgerInner>,
}

struct LedgerInner {
    categories: LeaveCategories,
    index: RwLock<LedgerStore<SharedEmployee>>,
    snapshot: Mutex<LedgerStore<Employee>>,
    storage: Option<JsonFileStore>,
}

impl Ledger {
    /// Opens the ledger described by `config`, loading its data file if present.
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let storage = JsonFileStore::new(config.data_file.clone());
        let snapshot = storage.load(&config.categories).await?;
        Ok(Self::from_parts(
            config.categories.clone(),
            snapshot,
            Some(storage),
        ))
    }

    /// A ledger that lives only in memory.
    #[must_use]
    pub fn in_memory(categories: LeaveCategories) -> Self {
        Self::from_parts(categories, LedgerStore::new(), None)
    }

    fn from_parts(
        categories: LeaveCategories,
        snapshot: LedgerStore<Employee>,
        storage: Option<JsonFileStore>,
    ) -> Self {
        let index = snapshot.map_records(|employee| Arc::new(Mutex::new(employee.clone())));

        Self {
            inner: Arc::new(LedgerInner {
                categories,
                index: RwLock::new(index),
                snapshot: Mutex::new(snapshot),
                storage,
            }),
        }
    }

    /// The configured leave categories.
    #[must_use]
    pub fn categories(&self) -> &LeaveCategories {
        &self.inner.categories
    }

    async fn persist(&self, snapshot: &LedgerStore<Employee>) -> Result<()> {
        match &self.inner.storage {
            Some(storage) => storage.save(snapshot).await,
            None => Ok(()),
        }
    }

    /// Runs `op` against one employee under its lock and writes the result through.
    async fn mutate<T>(
        &self,
        id: &str,
        op: impl FnOnce(&mut Employee) -> Result<T>,
    ) -> Result<T> {
        let index = self.inner.index.read().await;
        let mut employee = index.get(id)?.lock().await;

        let outcome = op(&mut *employee)?;

        let mut snapshot = self.inner.snapshot.lock().await;
        let previous = snapshot.replace(id, employee.clone())?;
        if let Err(e) = self.persist(&snapshot).await {
            warn!(employee_id = id, error = %e, "Persisting ledger failed, rolling back");
            *employee = previous.clone();
            snapshot.replace(id, previous)?;
            return Err(e);
        }

        Ok(outcome)
    }

    /// Adds an employee with the configured default balances.
    #[instrument(skip(self, credential))]
    pub async fn create_employee(
        &self,
        id: &str,
        name: &str,
        contact: &str,
        department: &str,
        credential: Option<String>,
    ) -> Result<Employee> {
        let employee = Employee::new(
            id,
            name,
            contact,
            department,
            credential,
            &self.inner.categories,
        )?;
        let key = employee.id().to_string();

        let mut index = self.inner.index.write().await;
        if index.contains(&key) {
            return Err(Error::DuplicateId { id: key });
        }

        let mut snapshot = self.inner.snapshot.lock().await;
        snapshot.insert(&key, employee.clone())?;
        if let Err(e) = self.persist(&snapshot).await {
            snapshot.remove(&key)?;
            return Err(e);
        }
        index.insert(&key, Arc::new(Mutex::new(employee.clone())))?;

        info!(employee_id = %key, "Added employee");
        Ok(employee)
    }

    /// A copy of the employee's current record.
    pub async fn employee(&self, id: &str) -> Result<Employee> {
        let index = self.inner.index.read().await;
        let employee = index.get(id)?.lock().await;
        Ok(employee.clone())
    }

    /// Updates descriptive fields; `None` keeps the current credential.
    #[instrument(skip(self, credential))]
    pub async fn update_employee(
        &self,
        id: &str,
        name: &str,
        contact: &str,
        department: &str,
        credential: Option<String>,
    ) -> Result<()> {
        self.mutate(id, |employee| {
            employee.update_profile(name, contact, department, credential)
        })
        .await?;
        info!(employee_id = id, "Updated employee");
        Ok(())
    }

    /// Removes an employee and their whole request history.
    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: &str) -> Result<()> {
        let mut index = self.inner.index.write().await;
        if !index.contains(id) {
            return Err(Error::NotFound { id: id.to_string() });
        }

        let mut snapshot = self.inner.snapshot.lock().await;
        let mut next = snapshot.clone();
        next.remove(id)?;
        self.persist(&next).await?;
        *snapshot = next;
        index.remove(id)?;

        info!(employee_id = id, "Deleted employee");
        Ok(())
    }

    /// Employees whose id, name or department contains `filter`, case-insensitively.
    pub async fn list_employees(&self, filter: Option<&str>) -> Vec<Employee> {
        let snapshot = self.inner.snapshot.lock().await;
        snapshot.list(filter).into_iter().cloned().collect()
    }

    /// Submits a leave request and returns the number of days it spans.
    #[instrument(skip(self))]
    pub async fn apply_leave(
        &self,
        id: &str,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32> {
        let categories = &self.inner.categories;
        self.mutate(id, |employee| {
            engine::apply(employee, categories, category, start, end)
        })
        .await
        .inspect(|days| info!(days, "Leave request submitted"))
        .inspect_err(|e| warn!(error = %e, "Leave request refused"))
    }

    /// Sets a request's status and reconciles the employee's balance.
    #[instrument(skip(self))]
    pub async fn set_request_status(
        &self,
        id: &str,
        index: usize,
        status: LeaveStatus,
    ) -> Result<Reconciliation> {
        self.mutate(id, |employee| engine::set_status(employee, index, status))
            .await
            .inspect(|outcome| info!(?outcome, "Request status updated"))
            .inspect_err(|e| warn!(error = %e, "Request status change refused"))
    }

    /// Remaining days per category for one employee.
    pub async fn balances(&self, id: &str) -> Result<BTreeMap<LeaveCategory, i64>> {
        let index = self.inner.index.read().await;
        let employee = index.get(id)?.lock().await;
        Ok(employee.balances().clone())
    }

    /// One employee's requests in submission order.
    pub async fn requests(&self, id: &str) -> Result<Vec<LeaveRequest>> {
        let index = self.inner.index.read().await;
        let employee = index.get(id)?.lock().await;
        Ok(employee.requests().to_vec())
    }

    /// Every request in the ledger with its owner and index.
    pub async fn request_rows(&self) -> Vec<RequestRow> {
        let snapshot = self.inner.snapshot.lock().await;
        report::request_rows(snapshot.values())
    }

    /// Total and approved request counts per configured category.
    pub async fn category_summary(&self) -> Vec<CategorySummary> {
        let snapshot = self.inner.snapshot.lock().await;
        report::summarize_by_category(snapshot.values(), &self.inner.categories)
    }

    /// Number of employees on record.
    pub async fn len(&self) -> usize {
        self.inner.index.read().await.len()
    }

    /// Whether the ledger has no employees.
    pub async fn is_empty(&self) -> bool {
        self.inner.index.read().await.is_empty()
    }
}
