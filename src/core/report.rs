//! Report generation business logic.
//!
//! This module provides the dashboard tallies and the administrator's request
//! listing. All functions are framework-agnostic and return structured data that
//! the presentation layer can render however it likes.

use crate::{
    config::LeaveCategories,
    models::{Employee, LeaveCategory, LeaveRequest, LeaveStatus},
};

/// Request counts for one leave category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// The category being counted
    pub category: LeaveCategory,
    /// Requests submitted in this category, whatever their status
    pub total: usize,
    /// Requests currently approved in this category
    pub approved: usize,
}

/// One line of the administrator's request table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRow {
    /// Owner of the request
    pub employee_id: String,
    /// Owner's display name
    pub employee_name: String,
    /// Position in the owner's request history, as taken by `set_status`
    pub index: usize,
    /// The request itself
    pub request: LeaveRequest,
}

/// Counts total and approved requests per configured category.
///
/// Results follow the configured category order. Requests filed under a category
/// that is no longer configured are left out.
pub fn summarize_by_category<'a>(
    employees: impl IntoIterator<Item = &'a Employee>,
    categories: &LeaveCategories,
) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = categories
        .names()
        .map(|category| CategorySummary {
            category,
            total: 0,
            approved: 0,
        })
        .collect();

    for request in employees.into_iter().flat_map(Employee::requests) {
        let Some(summary) = summaries
            .iter_mut()
            .find(|s| &s.category == request.category())
        else {
            tracing::debug!(
                category = %request.category(),
                "Skipping request in unconfigured category"
            );
            continue;
        };

        summary.total += 1;
        if request.status() == LeaveStatus::Approved {
            summary.approved += 1;
        }
    }

    summaries
}

/// Flattens every employee's request history into table rows.
///
/// Rows follow employee order, then submission order within each employee.
pub fn request_rows<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> Vec<RequestRow> {
    employees
        .into_iter()
        .flat_map(|employee| {
            employee
                .requests()
                .iter()
                .enumerate()
                .map(|(index, request)| RequestRow {
                    employee_id: employee.id().to_string(),
                    employee_name: employee.name().to_string(),
                    index,
                    request: request.clone(),
                })
        })
        .collect()
}
