//! Employee record - the persisted shape of one employee in the ledger file.
//!
//! Field names match the data files written by earlier versions of the leave
//! system, so existing `data.json` files load unchanged. Optional fields fall back
//! to the defaults described on each field.

use super::leave_request::LeaveRequestRecord;
use crate::{
    config::LeaveCategories,
    errors::Result,
    models::{Employee, LeaveCategory, LeaveRequest},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted employee record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee identifier, duplicated from the map key
    pub emp_id: String,
    /// Display name
    pub name: String,
    /// Contact details; empty when absent
    #[serde(default)]
    pub contact: String,
    /// Department; empty when absent
    #[serde(default)]
    pub department: String,
    /// Opaque employee credential
    #[serde(
        rename = "password",
        alias = "credential",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub credential: Option<String>,
    /// Remaining days per category; configured defaults when absent or empty
    #[serde(default)]
    pub leave_balances: BTreeMap<String, i64>,
    /// Request history in submission order
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequestRecord>,
}

impl EmployeeRecord {
    /// Converts the record into a domain employee stored under `id`.
    ///
    /// Fails with `InvalidRange` if a stored request ends before it starts.
    pub fn into_employee(self, id: &str, categories: &LeaveCategories) -> Result<Employee> {
        if self.emp_id != id {
            tracing::warn!(
                key = id,
                emp_id = %self.emp_id,
                "Employee record id differs from its key, keeping the key"
            );
        }

        let balances = if self.leave_balances.is_empty() {
            categories.default_balances()
        } else {
            self.leave_balances
                .into_iter()
                .map(|(category, days)| (LeaveCategory::new(category), days))
                .collect()
        };

        let requests = self
            .leave_requests
            .into_iter()
            .map(LeaveRequest::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Employee {
            id: id.to_string(),
            name: self.name,
            contact: self.contact,
            department: self.department,
            credential: self.credential,
            balances,
            requests,
        })
    }
}

impl From<&Employee> for EmployeeRecord {
    fn from(employee: &Employee) -> Self {
        Self {
            emp_id: employee.id.clone(),
            name: employee.name.clone(),
            contact: employee.contact.clone(),
            department: employee.department.clone(),
            credential: employee.credential.clone(),
            leave_balances: employee
                .balances
                .iter()
                .map(|(category, days)| (category.to_string(), *days))
                .collect(),
            leave_requests: employee.requests.iter().map(Into::into).collect(),
        }
    }
}
