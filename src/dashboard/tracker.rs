//! The expense tracker: an owned list of expenses, its backing store and the
//! chart currently on screen.
//!
//! Every change goes through the store first and is then applied to the
//! in-memory list, after which the tracker can be rendered again.

use std::fmt::Write;

use maud::{Markup, html};

use crate::{
    Error,
    dashboard::{
        aggregation::{CategoryTotals, category_totals, grand_total},
        charts::{ChartSlot, chart_view},
        suggestions::{Suggestion, evaluate_suggestions},
        tables::{expense_table, sort_by_date_descending},
    },
    database_id::{ExpenseId, RowsAffected},
    expense::{Expense, ExpenseStore, NewExpense},
    html::{CARD_STYLE, format_currency, format_date},
};

/// Owns the expense list and orchestrates mutate, persist, aggregate and render.
#[derive(Debug)]
pub struct ExpenseTracker<S> {
    store: S,
    expenses: Vec<Expense>,
    chart: ChartSlot,
}

impl<S: ExpenseStore> ExpenseTracker<S> {
    /// Load every expense from `store`.
    ///
    /// # Errors
    /// Returns the store's error if the expenses cannot be read.
    pub fn load(store: S) -> Result<Self, Error> {
        let expenses = store
            .list_all()
            .inspect_err(|error| tracing::error!("could not load expenses: {error}"))?;

        Ok(Self {
            store,
            expenses,
            chart: ChartSlot::new(),
        })
    }

    /// Persist `expense` and append it to the list.
    ///
    /// # Errors
    /// Returns the store's error if the expense cannot be saved, in which
    /// case the list is left unchanged.
    pub fn add(&mut self, expense: NewExpense) -> Result<&Expense, Error> {
        let expense = self
            .store
            .insert(expense)
            .inspect_err(|error| tracing::error!("could not save expense: {error}"))?;

        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Delete the expense with `id` from the store and the list.
    ///
    /// Returns the number of expenses removed, zero if `id` was not found.
    ///
    /// # Errors
    /// Returns the store's error if the expense cannot be deleted.
    pub fn remove(&mut self, id: ExpenseId) -> Result<RowsAffected, Error> {
        let rows_affected = self
            .store
            .delete_by_id(id)
            .inspect_err(|error| tracing::error!("could not delete expense {id}: {error}"))?;

        self.expenses.retain(|expense| expense.id != Some(id));
        Ok(rows_affected)
    }

    /// The expenses in the order they were loaded and added.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Recompute everything shown to the user.
    ///
    /// The table rows are prepared first, then the chart is redrawn, then the
    /// total and finally the suggestions.
    pub fn render(&mut self) -> TrackerView<'_> {
        let rows = sort_by_date_descending(&self.expenses);

        // Aggregated over the sorted rows so category order, and with it the
        // slice colors, only depends on the list and not on how it was built.
        let totals = category_totals(&rows);
        self.chart.draw(&totals);

        let total = grand_total(&rows);
        let suggestions = evaluate_suggestions(&totals, total);

        TrackerView {
            rows,
            chart: &self.chart,
            totals,
            total,
            suggestions,
        }
    }
}

/// A snapshot of everything the tracker displays.
#[derive(Debug)]
pub struct TrackerView<'a> {
    /// The expenses sorted newest date first.
    pub rows: Vec<Expense>,
    /// The freshly drawn category chart.
    pub chart: &'a ChartSlot,
    /// Summed amounts per category.
    pub totals: CategoryTotals,
    /// The sum of all amounts.
    pub total: f64,
    /// The tips that apply, in display order.
    pub suggestions: Vec<Suggestion>,
}

impl TrackerView<'_> {
    /// Render the total, chart, table and suggestions as HTML.
    pub fn into_html(self, currency_symbol: &str) -> Markup {
        html!(
            section id="total" class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-2" { "Total Expenses" }
                p id="total-amount" class="text-3xl font-bold tabular-nums"
                {
                    (format_currency(self.total, currency_symbol))
                }
            }

            section id="chart" class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-2" { "Expenses by Category" }
                (chart_view(self.chart))
            }

            section id="expenses" class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-2" { "Expenses" }
                (expense_table(&self.rows, currency_symbol))
            }

            section id="suggestions" class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-2" { "Suggestions" }
                ul class="space-y-2"
                {
                    @for suggestion in &self.suggestions {
                        li
                            class="suggestion-item p-3 rounded bg-blue-50 dark:bg-gray-700
                                border-l-4 border-blue-500"
                        {
                            (suggestion.text())
                        }
                    }
                }
            }
        )
    }

    /// Render the table, category breakdown, total and suggestions as plain text.
    pub fn to_text(&self, currency_symbol: &str) -> String {
        let mut text = String::new();

        // Writing to a `String` cannot fail.
        let _ = writeln!(text, "Expenses");
        if self.rows.is_empty() {
            let _ = writeln!(text, "  No expenses recorded yet.");
        }
        for expense in &self.rows {
            let id = expense
                .id
                .map(|id| format!("#{id}"))
                .unwrap_or_else(|| "-".to_owned());
            let _ = writeln!(
                text,
                "  {id:>5}  {:<13} {:<15} {:>12}  {}",
                format_date(expense.date),
                expense.category,
                format_currency(expense.amount, currency_symbol),
                expense.description,
            );
        }

        let _ = writeln!(text, "\nBy category");
        if let Some(chart) = self.chart.current() {
            for slice in &chart.slices {
                let _ = writeln!(
                    text,
                    "  {:<15} {:>12}  {}",
                    slice.category,
                    format_currency(slice.total, currency_symbol),
                    slice.color
                );
            }
        } else {
            let _ = writeln!(text, "  Nothing to show.");
        }

        let _ = writeln!(
            text,
            "\nTotal: {}",
            format_currency(self.total, currency_symbol)
        );

        let _ = writeln!(text, "\nSuggestions");
        for suggestion in &self.suggestions {
            let _ = writeln!(text, "  - {}", suggestion.text());
        }

        text
    }
}
