//! Entity module - the persisted shapes of ledger data.
//! These records mirror the JSON snapshot layout field for field and convert to
//! and from the domain types in [`crate::models`].

/// Employee record
pub mod employee;
/// Leave request record
pub mod leave_request;

pub use employee::EmployeeRecord;
pub use leave_request::LeaveRequestRecord;
