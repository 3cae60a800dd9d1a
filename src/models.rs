//! Domain types for the leave ledger: categories, request status, leave requests
//! and the employee record that owns balances and request history.

use crate::config::LeaveCategories;
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Date format used at every string boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date coming from outside the ledger.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Number of calendar days in the inclusive range `start..=end`.
#[must_use]
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days() + 1;
    u32::try_from(span.max(0)).unwrap_or(u32::MAX)
}

/// Name of a leave category such as "Vacation".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveCategory(String);

impl LeaveCategory {
    /// Wraps a category name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The category name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LeaveCategory {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeaveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LeaveCategory {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Approval state of a leave request.
///
/// Only `Approved` carries balance effects; every other status counts as "not approved".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Submitted and awaiting a decision
    Pending,
    /// Granted; its days are deducted from the balance
    Approved,
    /// Refused; holds no dates and no days
    Rejected,
}

impl LeaveStatus {
    /// Pending and approved requests hold their dates against new submissions.
    #[must_use]
    pub const fn blocks_dates(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// The name used in ledger files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(Error::InvalidStatus {
                value: value.to_string(),
            }),
        }
    }
}

/// A single time-off ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    pub(crate) category: LeaveCategory,
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    pub(crate) days: u32,
    pub(crate) status: LeaveStatus,
    pub(crate) deducted: bool,
}

impl LeaveRequest {
    /// A freshly submitted request: pending, nothing deducted, day count frozen now.
    pub(crate) fn pending(category: LeaveCategory, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            days: inclusive_days(start, end),
            category,
            start,
            end,
            status: LeaveStatus::Pending,
            deducted: false,
        }
    }

    /// Category the days are drawn from.
    #[must_use]
    pub fn category(&self) -> &LeaveCategory {
        &self.category
    }

    /// First day of leave.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of leave, inclusive.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Day count fixed at submission.
    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Current approval state.
    #[must_use]
    pub const fn status(&self) -> LeaveStatus {
        self.status
    }

    /// Whether the days are currently subtracted from the balance.
    #[must_use]
    pub const fn deducted(&self) -> bool {
        self.deducted
    }

    /// Whether the inclusive range `start..=end` shares at least one day with this request.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}

/// Identity and leave state for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) contact: String,
    pub(crate) department: String,
    pub(crate) credential: Option<String>,
    pub(crate) balances: BTreeMap<LeaveCategory, i64>,
    pub(crate) requests: Vec<LeaveRequest>,
}

impl Employee {
    /// Creates an employee with the configured default balances and no requests.
    ///
    /// All descriptive fields are trimmed and must be non-empty.
    pub fn new(
        id: &str,
        name: &str,
        contact: &str,
        department: &str,
        credential: Option<String>,
        categories: &LeaveCategories,
    ) -> Result<Self> {
        let id = required("emp_id", id)?;
        let name = required("name", name)?;
        let contact = required("contact", contact)?;
        let department = required("department", department)?;

        Ok(Self {
            id,
            name,
            contact,
            department,
            credential,
            balances: categories.default_balances(),
            requests: Vec::new(),
        })
    }

    /// Replaces the descriptive fields. `None` leaves the credential untouched.
    ///
    /// Validation happens before any field is written.
    pub fn update_profile(
        &mut self,
        name: &str,
        contact: &str,
        department: &str,
        credential: Option<String>,
    ) -> Result<()> {
        let name = required("name", name)?;
        let contact = required("contact", contact)?;
        let department = required("department", department)?;

        self.name = name;
        self.contact = contact;
        self.department = department;
        if let Some(credential) = credential {
            self.credential = Some(credential);
        }
        Ok(())
    }

    /// Case-insensitive substring match against id, name, or department.
    #[must_use]
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        needle.is_empty()
            || self.id.to_lowercase().contains(&needle)
            || self.name.to_lowercase().contains(&needle)
            || self.department.to_lowercase().contains(&needle)
    }

    /// Unique, case-sensitive employee id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact details.
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Department name.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Opaque credential, if one was set.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Remaining days in `category`; a category with no entry has no days left.
    ///
    /// Balances never go below zero through the engine, but files written by older
    /// versions of the leave system can carry negative values and those load as-is.
    #[must_use]
    pub fn balance(&self, category: &str) -> i64 {
        self.balances.get(category).copied().unwrap_or(0)
    }

    /// Remaining days for every category on record.
    #[must_use]
    pub const fn balances(&self) -> &BTreeMap<LeaveCategory, i64> {
        &self.balances
    }

    /// Request history in submission order.
    #[must_use]
    pub fn requests(&self) -> &[LeaveRequest] {
        &self.requests
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
