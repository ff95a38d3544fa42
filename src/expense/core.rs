//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{ExpenseId, RowsAffected},
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// Money spent on something, recorded by the user.
///
/// To create a new `Expense`, use [Expense::build] and insert the resulting
/// [NewExpense] into a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the store on insert.
    ///
    /// Records written by older client-only versions have no ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpenseId>,
    /// How much money was spent. Always positive.
    pub amount: f64,
    /// A short label such as "food" or "transport".
    pub category: String,
    /// A text description of what the money was spent on.
    pub description: String,
    /// When the money was spent.
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl Expense {
    /// Start building a new expense.
    ///
    /// Shortcut for [NewExpense] for discoverability.
    pub fn build(amount: f64, category: &str, description: &str, date: Date) -> NewExpense {
        NewExpense {
            amount,
            category: category.to_owned(),
            description: description.to_owned(),
            date,
        }
    }
}

/// The fields of an expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// How much money was spent. Always positive.
    pub amount: f64,
    /// A short label such as "food" or "transport".
    pub category: String,
    /// A text description of what the money was spent on.
    pub description: String,
    /// When the money was spent.
    pub date: Date,
}

impl NewExpense {
    /// Attach the ID assigned by a store.
    pub fn with_id(self, id: Option<ExpenseId>) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a new expense into the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn insert_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expenses (amount, category, description, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, description, date",
        )?
        .query_row(
            (
                expense.amount,
                expense.category,
                expense.description,
                expense.date,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Get every expense, newest date first.
///
/// Expenses on the same date are returned in the order they were inserted.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn list_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, category, description, date FROM expenses
             ORDER BY date DESC, id ASC",
        )?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Delete the expense with `id`.
///
/// Returns the number of rows removed, which is zero if `id` does not exist.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Create the expense table in the database if it does not exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let description = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id: Some(id),
        amount,
        category,
        description,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod serde_tests {
    use time::macros::date;

    use super::Expense;

    #[test]
    fn serializes_date_as_iso_string() {
        let expense = Expense::build(100.0, "food", "Groceries", date!(2024 - 01 - 01))
            .with_id(Some(7));

        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "amount": 100.0,
                "category": "food",
                "description": "Groceries",
                "date": "2024-01-01"
            })
        );
    }

    #[test]
    fn deserializes_record_without_id() {
        let json = r#"{"amount":50,"category":"entertainment","description":"Cinema","date":"2024-01-02"}"#;

        let expense: Expense = serde_json::from_str(json).unwrap();

        assert_eq!(expense.id, None);
        assert_eq!(expense.amount, 50.0);
        assert_eq!(expense.date, date!(2024 - 01 - 02));
    }
}
