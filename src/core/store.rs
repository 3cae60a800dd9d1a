//! Ledger store - the keyed, insertion-ordered collection of employee records.
//!
//! The store owns identity: it guarantees id uniqueness and nothing else. It is
//! generic over the record slot so the concurrent ledger can keep lockable
//! handles in it while the engine, tests and the snapshot file work with plain
//! [`Employee`] values. The store performs no locking of its own.

use crate::{
    config::LeaveCategories,
    errors::{Error, Result},
    models::Employee,
};
use std::collections::HashMap;

/// In-memory collection of records keyed by employee id, iterated in insertion order.
#[derive(Debug, Clone)]
pub struct LedgerStore<R = Employee> {
    records: HashMap<String, R>,
    order: Vec<String>,
}

impl<R> Default for LedgerStore<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<R> LedgerStore<R> {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under `id`, failing if the id is taken.
    pub fn insert(&mut self, id: &str, record: R) -> Result<&R> {
        if self.records.contains_key(id) {
            return Err(Error::DuplicateId { id: id.to_string() });
        }
        self.order.push(id.to_string());
        Ok(self.records.entry(id.to_string()).or_insert(record))
    }

    /// The record stored under `id`.
    pub fn get(&self, id: &str) -> Result<&R> {
        self.records
            .get(id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    /// Mutable access to the record stored under `id`.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut R> {
        self.records
            .get_mut(id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    /// Replaces the record stored under an existing id, keeping its position.
    pub fn replace(&mut self, id: &str, record: R) -> Result<R> {
        let slot = self.get_mut(id)?;
        Ok(std::mem::replace(slot, record))
    }

    /// Removes a record and returns it.
    pub fn remove(&mut self, id: &str) -> Result<R> {
        let record = self
            .records
            .remove(id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })?;
        self.order.retain(|existing| existing != id);
        Ok(record)
    }

    /// Whether a record is stored under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// `(id, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|record| (id.as_str(), record)))
    }

    /// Records in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &R> {
        self.iter().map(|(_, record)| record)
    }

    /// A store with the same ids, in the same order, holding `f` of each record.
    pub fn map_records<U>(&self, mut f: impl FnMut(&R) -> U) -> LedgerStore<U> {
        LedgerStore {
            records: self
                .records
                .iter()
                .map(|(id, record)| (id.clone(), f(record)))
                .collect(),
            order: self.order.clone(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl LedgerStore<Employee> {
    /// Creates an employee with default balances and an empty request history.
    pub fn create(
        &mut self,
        id: &str,
        name: &str,
        contact: &str,
        department: &str,
        credential: Option<String>,
        categories: &LeaveCategories,
    ) -> Result<&Employee> {
        let employee = Employee::new(id, name, contact, department, credential, categories)?;
        let key = employee.id().to_string();
        self.insert(&key, employee)
    }

    /// Updates descriptive fields; an omitted credential is left unchanged.
    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        contact: &str,
        department: &str,
        credential: Option<String>,
    ) -> Result<()> {
        self.get_mut(id)?
            .update_profile(name, contact, department, credential)
    }

    /// Removes an employee and their request history.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.remove(id).map(|_| ())
    }

    /// Employees matching `filter` (id, name or department, case-insensitive), in insertion order.
    #[must_use]
    pub fn list(&self, filter: Option<&str>) -> Vec<&Employee> {
        self.values()
            .filter(|employee| filter.is_none_or(|f| employee.matches_filter(f)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_employee, test_store};

    #[test]
    fn test_create_rejects_duplicate_id() {
        let mut store = test_store();
        create_test_employee(&mut store, "E1");

        let result = store.create(
            "E1",
            "Someone Else",
            "other@example.com",
            "Sales",
            None,
            &LeaveCategories::default(),
        );
        assert!(matches!(result, Err(Error::DuplicateId { id }) if id == "E1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("E1").unwrap().name(), "Employee E1");
    }

    #[test]
    fn test_ids_are_case_sensitive() {
        let mut store = test_store();
        let categories = LeaveCategories::default();
        store
            .create("e1", "Lower", "lower@example.com", "Sales", None, &categories)
            .unwrap();
        store
            .create("E1", "Upper", "upper@example.com", "Sales", None, &categories)
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("e1").unwrap().name(), "Lower");
        assert_eq!(store.get("E1").unwrap().name(), "Upper");

        store.delete("e1").unwrap();
        assert!(matches!(store.get("e1"), Err(Error::NotFound { .. })));
        assert_eq!(store.get("E1").unwrap().name(), "Upper");
    }

    #[test]
    fn test_update_and_missing_employee() {
        let mut store = test_store();
        create_test_employee(&mut store, "E1");

        store
            .update("E1", "Renamed", "r@example.com", "Finance", None)
            .unwrap();
        let employee = store.get("E1").unwrap();
        assert_eq!(employee.name(), "Renamed");
        assert_eq!(employee.department(), "Finance");

        let missing = store.update("nope", "A", "B", "C", None);
        assert!(matches!(missing, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_delete_discards_record() {
        let mut store = test_store();
        create_test_employee(&mut store, "E1");
        create_test_employee(&mut store, "E2");

        store.delete("E1").unwrap();
        assert!(!store.contains("E1"));
        assert_eq!(store.len(), 1);
        assert!(matches!(store.delete("E1"), Err(Error::NotFound { .. })));

        // The id can be reused afterwards
        create_test_employee(&mut store, "E1");
        let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["E2", "E1"]);
    }

    #[test]
    fn test_list_filters_and_keeps_insertion_order() {
        let mut store = test_store();
        let categories = LeaveCategories::default();
        store
            .create("B-2", "Bea", "b@example.com", "Sales", None, &categories)
            .unwrap();
        store
            .create("A-1", "Alan", "a@example.com", "Engineering", None, &categories)
            .unwrap();
        store
            .create("C-3", "Cleo", "c@example.com", "engineering", None, &categories)
            .unwrap();

        let all: Vec<&str> = store.list(None).iter().map(|e| e.id()).collect();
        assert_eq!(all, vec!["B-2", "A-1", "C-3"]);

        let engineers: Vec<&str> = store
            .list(Some("ENGINEER"))
            .iter()
            .map(|e| e.id())
            .collect();
        assert_eq!(engineers, vec!["A-1", "C-3"]);

        let by_id: Vec<&str> = store.list(Some("b-2")).iter().map(|e| e.id()).collect();
        assert_eq!(by_id, vec!["B-2"]);

        assert_eq!(store.list(Some("   ")).len(), 3);
        assert!(store.list(Some("zzz")).is_empty());
    }

    #[test]
    fn test_map_records_keeps_ids_and_order() {
        let mut store: LedgerStore<u32> = LedgerStore::new();
        store.insert("b", 2).unwrap();
        store.insert("a", 1).unwrap();
        store.insert("c", 3).unwrap();

        let doubled = store.map_records(|n| n * 2);
        let pairs: Vec<(&str, u32)> = doubled.iter().map(|(id, n)| (id, *n)).collect();
        assert_eq!(pairs, vec![("b", 4), ("a", 2), ("c", 6)]);
        assert!(matches!(doubled.get("z"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store: LedgerStore<u32> = LedgerStore::new();
        store.insert("a", 1).unwrap();
        store.insert("b", 2).unwrap();
        let old = store.replace("a", 10).unwrap();
        assert_eq!(old, 1);
        let values: Vec<u32> = store.values().copied().collect();
        assert_eq!(values, vec![10, 2]);
        assert!(matches!(store.replace("c", 3), Err(Error::NotFound { .. })));
    }
}
