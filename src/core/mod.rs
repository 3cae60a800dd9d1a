//! Core business logic - framework-agnostic store, engine and reporting.

/// Submission validation and approval reconciliation
pub mod engine;
/// Dashboard tallies and request listings
pub mod report;
/// Keyed, insertion-ordered employee collection
pub mod store;

#[cfg(test)]
mod engine_props;

pub use engine::{Reconciliation, apply, set_status};
pub use report::{CategorySummary, RequestRow, request_rows, summarize_by_category};
pub use store::LedgerStore;
