use chrono::NaiveDate;
use thiserror::Error;

/// Every failure the ledger reports.
#[derive(Debug, Error)]
pub enum Error {
    /// An employee with this id is already on record.
    #[error("Employee ID '{id}' already exists")]
    DuplicateId {
        /// The id that is taken
        id: String,
    },

    /// No employee has this id.
    #[error("Employee '{id}' not found")]
    NotFound {
        /// The id that was looked up
        id: String,
    },

    /// A request index past the end of the employee's history.
    #[error("Leave request #{index} does not exist ({len} request(s) on record)")]
    IndexOutOfRange {
        /// The index that was asked for
        index: usize,
        /// Number of requests the employee has
        len: usize,
    },

    /// A date range that ends before it starts.
    #[error("Start date {start} must not be after end date {end}")]
    InvalidRange {
        /// First day of the range
        start: NaiveDate,
        /// Last day of the range
        end: NaiveDate,
    },

    /// A category that is not configured.
    #[error("Invalid leave type: {category}")]
    UnknownCategory {
        /// The category name given
        category: String,
    },

    /// Not enough days left in the category.
    #[error("Insufficient {category} leave balance: {available} day(s) left, {requested} requested")]
    InsufficientBalance {
        /// Category being drawn from
        category: String,
        /// Days left; negative only in data carried over from older files
        available: i64,
        /// Days the request needs
        requested: u32,
    },

    /// The range shares a day with a pending or approved request.
    #[error("Dates overlap an existing request ({start} to {end})")]
    OverlappingRequest {
        /// First day of the conflicting request
        start: NaiveDate,
        /// Last day of the conflicting request
        end: NaiveDate,
    },

    /// A required field was blank.
    #[error("Field '{field}' cannot be empty")]
    EmptyField {
        /// Name of the blank field
        field: &'static str,
    },

    /// A status outside `Pending`, `Approved`, `Rejected`.
    #[error("Invalid request status: {value}")]
    InvalidStatus {
        /// The rejected input
        value: String,
    },

    /// A date not in `YYYY-MM-DD` form.
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// A ledger file whose contents break the record rules.
    #[error("Invalid record for employee '{id}': {source}")]
    InvalidRecord {
        /// Key of the offending employee
        id: String,
        /// What is wrong with it
        #[source]
        source: Box<Error>,
    },

    /// Unreadable or malformed configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Reading or writing the ledger file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ledger file is not valid JSON of the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
