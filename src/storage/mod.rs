//! Durable storage for the ledger snapshot.

/// JSON snapshot encoding and the file-backed store
pub mod json_file;

pub use json_file::{JsonFileStore, decode_snapshot, encode_snapshot};
