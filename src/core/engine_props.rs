//! Property-based tests for the leave engine.
//!
//! Random sequences of submissions and status changes are replayed against one
//! employee, checking the ledger invariants after every step.

#![allow(clippy::unwrap_used)]

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use crate::config::LeaveCategories;
use crate::core::engine::{Reconciliation, apply, set_status};
use crate::models::{Employee, LeaveStatus};
use crate::test_utils::test_employee;

const CATEGORIES: [&str; 4] = ["Vacation", "Sick", "Maternity", "Sabbatical"];

#[derive(Debug, Clone)]
enum Op {
    Apply {
        category: usize,
        offset: i64,
        span: i64,
    },
    SetStatus {
        index: usize,
        status: LeaveStatus,
    },
}

fn arb_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::Pending),
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
    ]
}

/// Spans may be negative so reversed ranges get exercised too.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CATEGORIES.len(), 0i64..120, -3i64..25).prop_map(|(category, offset, span)| {
            Op::Apply {
                category,
                offset,
                span,
            }
        }),
        (0usize..12, arb_status()).prop_map(|(index, status)| Op::SetStatus { index, status }),
    ]
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn run(employee: &mut Employee, categories: &LeaveCategories, op: &Op) -> bool {
    match *op {
        Op::Apply {
            category,
            offset,
            span,
        } => {
            let start = base_date() + Duration::days(offset);
            let end = start + Duration::days(span);
            apply(employee, categories, CATEGORIES[category], start, end).is_ok()
        }
        Op::SetStatus { index, status } => set_status(employee, index, status).is_ok(),
    }
}

fn assert_conserved(employee: &Employee, categories: &LeaveCategories) -> Result<(), TestCaseError> {
    for config in categories.iter() {
        let held: i64 = employee
            .requests()
            .iter()
            .filter(|r| r.deducted() && r.category().as_str() == config.name)
            .map(|r| i64::from(r.days()))
            .sum();
        prop_assert_eq!(employee.balance(&config.name) + held, i64::from(config.allotment));
        prop_assert!(employee.balance(&config.name) >= 0);
    }
    Ok(())
}

fn assert_no_active_overlap(employee: &Employee) -> Result<(), TestCaseError> {
    let active: Vec<_> = employee
        .requests()
        .iter()
        .filter(|r| r.status().blocks_dates())
        .collect();
    for (i, a) in active.iter().enumerate() {
        for b in active.iter().skip(i + 1) {
            prop_assert!(!a.overlaps(b.start(), b.end()));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Balance plus deducted days always equals the starting allotment, and never drops below zero
    #[test]
    fn prop_balance_is_conserved(ops in prop::collection::vec(arb_op(), 1..40)) {
        let categories = LeaveCategories::default();
        let mut employee = test_employee("P1");
        for op in &ops {
            run(&mut employee, &categories, op);
            assert_conserved(&employee, &categories)?;
        }
    }

    /// Deducted requests are exactly the approved ones
    #[test]
    fn prop_deducted_tracks_approval(ops in prop::collection::vec(arb_op(), 1..40)) {
        let categories = LeaveCategories::default();
        let mut employee = test_employee("P1");
        for op in &ops {
            run(&mut employee, &categories, op);
            for request in employee.requests() {
                prop_assert_eq!(request.deducted(), request.status() == LeaveStatus::Approved);
            }
        }
    }

    /// Successful submissions never overlap a pending or approved request
    #[test]
    fn prop_submissions_never_overlap(
        ops in prop::collection::vec(
            (0..CATEGORIES.len(), 0i64..120, -3i64..25),
            1..40,
        )
    ) {
        let categories = LeaveCategories::default();
        let mut employee = test_employee("P1");
        for (category, offset, span) in ops {
            run(&mut employee, &categories, &Op::Apply { category, offset, span });
            assert_no_active_overlap(&employee)?;
        }
    }

    /// A failed operation leaves the employee record exactly as it was
    #[test]
    fn prop_failures_do_not_mutate(ops in prop::collection::vec(arb_op(), 1..40)) {
        let categories = LeaveCategories::default();
        let mut employee = test_employee("P1");
        for op in &ops {
            let before = employee.clone();
            if !run(&mut employee, &categories, op) {
                prop_assert_eq!(&employee, &before);
            }
        }
    }

    /// Approving twice deducts once; rejecting afterwards restores the pre-approval balance
    #[test]
    fn prop_approval_round_trip(offset in 0i64..300, span in 0i64..10, category in 0usize..3) {
        let categories = LeaveCategories::default();
        let mut employee = test_employee("P1");
        let start = base_date() + Duration::days(offset);
        let name = CATEGORIES[category];
        let before = employee.balance(name);

        let days = apply(&mut employee, &categories, name, start, start + Duration::days(span))?;
        prop_assert_eq!(set_status(&mut employee, 0, LeaveStatus::Approved)?, Reconciliation::Deducted(days));
        prop_assert_eq!(set_status(&mut employee, 0, LeaveStatus::Approved)?, Reconciliation::Unchanged);
        prop_assert_eq!(employee.balance(name), before - i64::from(days));

        prop_assert_eq!(set_status(&mut employee, 0, LeaveStatus::Rejected)?, Reconciliation::Restored(days));
        prop_assert_eq!(employee.balance(name), before);
    }
}
