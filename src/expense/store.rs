//! Storage backends for expenses.
//!
//! The server keeps expenses in SQLite. The command line client keeps the
//! whole list as a single JSON blob under [STORAGE_KEY] in a local file, the
//! same way a browser keeps it in local storage.

use std::{collections::BTreeMap, fs, io::ErrorKind, path::PathBuf};

use rusqlite::Connection;
use serde_json::Value;

use crate::{
    Error,
    database_id::{ExpenseId, RowsAffected},
    expense::{Expense, NewExpense, delete_expense, insert_expense, list_expenses},
};

/// The key the expense list is stored under in a [LocalStore] file.
pub const STORAGE_KEY: &str = "expenses";

/// Create, list and delete expenses.
pub trait ExpenseStore {
    /// Store `expense` and return it with its assigned ID.
    fn insert(&mut self, expense: NewExpense) -> Result<Expense, Error>;

    /// Get every expense, newest date first. Equal dates keep insertion order.
    fn list_all(&self) -> Result<Vec<Expense>, Error>;

    /// Remove the expense with `id`, returning how many records were removed.
    ///
    /// Removing an ID that does not exist is not an error and returns zero.
    fn delete_by_id(&mut self, id: ExpenseId) -> Result<RowsAffected, Error>;
}

/// An [ExpenseStore] backed by the `expenses` table of a SQLite database.
#[derive(Debug)]
pub struct SqliteExpenseStore<'a> {
    connection: &'a Connection,
}

impl<'a> SqliteExpenseStore<'a> {
    /// Use `connection` for all queries. The tables must already exist, see [crate::initialize_db].
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }
}

impl ExpenseStore for SqliteExpenseStore<'_> {
    fn insert(&mut self, expense: NewExpense) -> Result<Expense, Error> {
        insert_expense(expense, self.connection)
    }

    fn list_all(&self) -> Result<Vec<Expense>, Error> {
        list_expenses(self.connection)
    }

    fn delete_by_id(&mut self, id: ExpenseId) -> Result<RowsAffected, Error> {
        delete_expense(id, self.connection)
    }
}

/// An [ExpenseStore] that keeps every expense in memory and writes the full
/// list to a JSON file after each change.
///
/// The file holds a JSON object that maps keys to serialized blobs. Only
/// [STORAGE_KEY] is read or written; other keys are preserved.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    expenses: Vec<Expense>,
}

impl LocalStore {
    /// Load the store at `path`.
    ///
    /// A missing file, or a file without [STORAGE_KEY], loads as an empty list.
    ///
    /// # Errors
    /// Returns an [Error::LocalStoreError] if the file cannot be read or does
    /// not contain valid JSON.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        let entries: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|error| {
                Error::LocalStoreError(format!("could not parse {}: {error}", path.display()))
            })?,
            Err(error) if error.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                return Err(Error::LocalStoreError(format!(
                    "could not read {}: {error}",
                    path.display()
                )));
            }
        };

        let expenses = match entries.get(STORAGE_KEY) {
            Some(blob) => {
                let records: Vec<Value> = serde_json::from_str(blob).map_err(|error| {
                    Error::LocalStoreError(format!(
                        "could not parse the \"{STORAGE_KEY}\" entry of {}: {error}",
                        path.display()
                    ))
                })?;

                parse_records(records)
            }
            None => Vec::new(),
        };

        Ok(Self {
            path,
            entries,
            expenses,
        })
    }

    fn save(&mut self) -> Result<(), Error> {
        let blob = serde_json::to_string(&self.expenses)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
        self.entries.insert(STORAGE_KEY.to_owned(), blob);

        let text = serde_json::to_string_pretty(&self.entries)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        fs::write(&self.path, text).map_err(|error| {
            Error::LocalStoreError(format!("could not write {}: {error}", self.path.display()))
        })
    }

    fn next_id(&self) -> ExpenseId {
        self.expenses
            .iter()
            .filter_map(|expense| expense.id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Keep the records that parse as expenses.
///
/// Older files may hold records such as `"amount": null` that can never be
/// shown. They are logged and dropped, and disappear on the next save.
fn parse_records(records: Vec<Value>) -> Vec<Expense> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record.clone()) {
            Ok(expense) => Some(expense),
            Err(error) => {
                tracing::warn!("skipping unreadable expense record {record}: {error}");
                None
            }
        })
        .collect()
}

impl ExpenseStore for LocalStore {
    fn insert(&mut self, expense: NewExpense) -> Result<Expense, Error> {
        let expense = expense.with_id(Some(self.next_id()));
        self.expenses.push(expense.clone());
        self.save()?;

        Ok(expense)
    }

    fn list_all(&self) -> Result<Vec<Expense>, Error> {
        let mut expenses = self.expenses.clone();
        // `sort_by` is stable, so equal dates keep the order they were added in.
        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(expenses)
    }

    fn delete_by_id(&mut self, id: ExpenseId) -> Result<RowsAffected, Error> {
        let count_before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != Some(id));
        let rows_affected = count_before - self.expenses.len();

        if rows_affected > 0 {
            self.save()?;
        }

        Ok(rows_affected)
    }
}

#[cfg(test)]
mod sqlite_store_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Expense, ExpenseStore, SqliteExpenseStore},
    };

    #[test]
    fn insert_then_list_contains_expense_once() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let mut store = SqliteExpenseStore::new(&connection);

        let inserted = store
            .insert(Expense::build(20.0, "bills", "Internet", date!(2024 - 04 - 01)))
            .unwrap();

        assert_eq!(store.list_all().unwrap(), vec![inserted]);
    }

    #[test]
    fn delete_missing_id_returns_zero() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let mut store = SqliteExpenseStore::new(&connection);

        assert_eq!(store.delete_by_id(12), Ok(0));
    }
}
