//! The expense table.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    endpoints::{self, format_endpoint},
    expense::Expense,
    html::{
        BUTTON_DELETE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
        format_date,
    },
};

/// Sort `expenses` newest date first.
///
/// Only the date is compared and the sort is stable, so expenses on the same
/// date keep the order they had in the input.
pub fn sort_by_date_descending(expenses: &[Expense]) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn date_datetime_attr(date: Date) -> String {
    const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
    date.format(DATETIME_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Render `expenses` as a table in the order given.
///
/// Rows for stored expenses get a delete button that swaps the re-rendered
/// tracker content into `#tracker-content`.
pub fn expense_table(expenses: &[Expense], currency_symbol: &str) -> Markup {
    let table_row = |expense: &Expense| {
        html!(
            tr class=(TABLE_ROW_STYLE) data-expense-row="true"
            {
                td class=(TABLE_CELL_STYLE)
                {
                    time datetime=(date_datetime_attr(expense.date)) { (format_date(expense.date)) }
                }

                td class=(TABLE_CELL_STYLE) { (expense.category) }

                td class=(TABLE_CELL_STYLE) { (expense.description) }

                td class={(TABLE_CELL_STYLE) " text-right tabular-nums"}
                {
                    (format_currency(expense.amount, currency_symbol))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    @if let Some(id) = expense.id {
                        button
                            type="button"
                            class=(BUTTON_DELETE_STYLE)
                            hx-delete=(format_endpoint(endpoints::EXPENSE_VIEW, id))
                            hx-target="#tracker-content"
                            hx-target-error="#alert-container"
                            hx-swap="innerHTML"
                            hx-confirm={"Delete the expense '" (expense.description) "'?"}
                        {
                            "Delete"
                        }
                    }
                }
            }
        )
    };

    html!(
        div class="w-full overflow-x-auto rounded-lg shadow"
        {
            table id="expense-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (table_row(expense))
                    }

                    @if expenses.is_empty() {
                        tr
                        {
                            td
                                colspan="5"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No expenses recorded yet."
                            }
                        }
                    }
                }
            }
        }
    )
}
