//! Leave request record - one entry of an employee's `leave_requests` list.

use crate::{
    errors::{Error, Result},
    models::{LeaveCategory, LeaveRequest, LeaveStatus, inclusive_days},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted shape of a leave request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestRecord {
    /// Category name, e.g. "Vacation"
    pub leave_type: LeaveCategory,
    /// First day of leave, `YYYY-MM-DD`
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive), `YYYY-MM-DD`
    pub end_date: NaiveDate,
    /// Day count frozen at submission; derived from the dates when absent
    #[serde(default)]
    pub days: Option<u32>,
    /// One of `Pending`, `Approved`, `Rejected`
    pub status: LeaveStatus,
    /// Whether `days` are currently subtracted from the balance
    #[serde(default)]
    pub deducted: bool,
}

impl From<&LeaveRequest> for LeaveRequestRecord {
    fn from(request: &LeaveRequest) -> Self {
        Self {
            leave_type: request.category.clone(),
            start_date: request.start,
            end_date: request.end,
            days: Some(request.days),
            status: request.status,
            deducted: request.deducted,
        }
    }
}

/// A stored request must cover at least one day.
impl TryFrom<LeaveRequestRecord> for LeaveRequest {
    type Error = Error;

    fn try_from(record: LeaveRequestRecord) -> Result<Self> {
        if record.start_date > record.end_date {
            return Err(Error::InvalidRange {
                start: record.start_date,
                end: record.end_date,
            });
        }

        Ok(Self {
            days: record
                .days
                .unwrap_or_else(|| inclusive_days(record.start_date, record.end_date)),
            category: record.leave_type,
            start: record.start_date,
            end: record.end_date,
            status: record.status,
            deducted: record.deducted,
        })
    }
}
