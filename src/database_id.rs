//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of an expense row.
pub type ExpenseId = DatabaseId;

/// The number of rows changed by a write query.
pub type RowsAffected = usize;
