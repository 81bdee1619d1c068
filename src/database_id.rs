//! Database ID type definitions.

/// Alias for the integer type SQLite assigns to transaction rows.
///
/// IDs are handed out by the database in strictly increasing order, so
/// ordering by ID is the same as ordering by insertion.
pub type TransactionId = i64;
