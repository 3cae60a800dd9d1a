//! Leave engine - submission validation and approval reconciliation.
//!
//! The engine is stateless: every function takes the single [`Employee`] it acts
//! on and either applies its whole effect or returns an error with the record
//! untouched. Balances change only in [`set_status`], and only as dictated by a
//! request's `deducted` flag, so a request's days are subtracted at most once and
//! handed back exactly once.

use crate::{
    config::LeaveCategories,
    errors::{Error, Result},
    models::{Employee, LeaveCategory, LeaveRequest, LeaveStatus, inclusive_days},
};
use chrono::NaiveDate;

/// Balance movement caused by a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The request's days were subtracted from its category balance.
    Deducted(u32),
    /// Previously deducted days were handed back.
    Restored(u32),
    /// Status changed (or was re-set) without touching the balance.
    Unchanged,
}

/// Validates and records a new leave request, returning the number of days submitted.
///
/// Checks run in order and the first failure wins:
/// 1. `start <= end`
/// 2. the category is configured
/// 3. the day span fits the current balance
/// 4. the range does not overlap a pending or approved request
///
/// On success a `Pending` request with `deducted = false` is appended. The balance
/// itself is not touched until the request is approved.
pub fn apply(
    employee: &mut Employee,
    categories: &LeaveCategories,
    category: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<u32> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }

    if !categories.contains(category) {
        return Err(Error::UnknownCategory {
            category: category.to_string(),
        });
    }

    let days = inclusive_days(start, end);
    let available = employee.balance(category);
    if i64::from(days) > available {
        return Err(Error::InsufficientBalance {
            category: category.to_string(),
            available,
            requested: days,
        });
    }

    if let Some(conflict) = employee
        .requests
        .iter()
        .find(|existing| existing.status.blocks_dates() && existing.overlaps(start, end))
    {
        return Err(Error::OverlappingRequest {
            start: conflict.start,
            end: conflict.end,
        });
    }

    employee
        .requests
        .push(LeaveRequest::pending(LeaveCategory::new(category), start, end));
    Ok(days)
}

/// Sets the status of the request at `index` and reconciles the balance.
///
/// The status is written unconditionally; the balance follows the `deducted` flag:
/// - becoming `Approved` while not deducted subtracts the request's days
/// - leaving `Approved` while deducted adds them back
/// - anything else leaves the balance alone
///
/// Approving a request whose days exceed the remaining balance fails with
/// `InsufficientBalance` and changes nothing.
pub fn set_status(
    employee: &mut Employee,
    index: usize,
    status: LeaveStatus,
) -> Result<Reconciliation> {
    let len = employee.requests.len();
    let request = employee
        .requests
        .get(index)
        .ok_or(Error::IndexOutOfRange { index, len })?;

    let previous = request.status;
    let category = request.category.clone();
    let days = request.days;
    let deducted = request.deducted;
    let available = employee.balance(category.as_str());

    let reconciliation = if status == LeaveStatus::Approved && !deducted {
        if i64::from(days) > available {
            return Err(Error::InsufficientBalance {
                category: category.to_string(),
                available,
                requested: days,
            });
        }
        Reconciliation::Deducted(days)
    } else if previous == LeaveStatus::Approved && deducted && status != LeaveStatus::Approved {
        Reconciliation::Restored(days)
    } else {
        Reconciliation::Unchanged
    };

    match reconciliation {
        Reconciliation::Deducted(days) => {
            employee
                .balances
                .insert(category, available - i64::from(days));
        }
        Reconciliation::Restored(days) => {
            employee
                .balances
                .insert(category, available.saturating_add(i64::from(days)));
        }
        Reconciliation::Unchanged => {}
    }

    let request = &mut employee.requests[index];
    request.status = status;
    match reconciliation {
        Reconciliation::Deducted(_) => request.deducted = true,
        Reconciliation::Restored(_) => request.deducted = false,
        Reconciliation::Unchanged => {}
    }

    Ok(reconciliation)
}
