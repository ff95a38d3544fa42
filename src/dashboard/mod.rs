//! Dashboard module
//!
//! Aggregates expenses by category, picks budgeting suggestions and renders
//! the expense tracker page with its table, pie chart and total.

mod aggregation;
mod charts;
mod handlers;
mod suggestions;
mod tables;
mod tracker;

pub use aggregation::{CategoryTotals, category_totals, grand_total};
pub use charts::{ChartSlot, PALETTE, PieChart, PieSlice};
pub use handlers::{create_expense_view_endpoint, delete_expense_view_endpoint, get_tracker_page};
pub use suggestions::{Suggestion, evaluate_suggestions};
pub use tracker::{ExpenseTracker, TrackerView};
