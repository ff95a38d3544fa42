//! Expenses: the data model, input validation, storage backends and the JSON API.

mod api;
mod core;
mod store;
mod validation;

pub use api::{
    CategorySummary, CreatedResponse, DeletedResponse, ErrorResponse, SummaryResponse,
    create_expense_endpoint, delete_expense_endpoint, get_summary_endpoint,
    list_expenses_endpoint,
};
pub use core::{
    Expense, NewExpense, create_expense_table, delete_expense, insert_expense, list_expenses,
};
pub use store::{ExpenseStore, LocalStore, STORAGE_KEY, SqliteExpenseStore};
pub use validation::{ExpenseRequest, ValidationError};
