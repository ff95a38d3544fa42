//! Expense tracker HTTP handlers and view rendering.
//!
//! This module contains:
//! - The handler for the client page with the expense form
//! - The htmx endpoints for adding and deleting expenses, which respond with
//!   the re-rendered tracker content
//! - The state and form types used by the handlers

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    config::DisplayConfig,
    dashboard::{charts::echarts_script_link, tracker::ExpenseTracker},
    database_id::ExpenseId,
    endpoints,
    expense::{ExpenseRequest, SqliteExpenseStore},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, base, currency_input_styles,
    },
    timezone::local_today,
};

/// The categories offered by the expense form.
pub const CATEGORIES: [&str; 6] = [
    "food",
    "transport",
    "entertainment",
    "bills",
    "shopping",
    "other",
];

/// The htmx event sent after an expense is created, used to reset the form.
pub const EXPENSE_CREATED_EVENT: &str = "expense-created";

/// The state needed by the expense tracker page and its htmx endpoints.
#[derive(Debug, Clone)]
pub struct TrackerState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The currency symbol and timezone to display with.
    pub display: DisplayConfig,
}

impl FromRef<AppState> for TrackerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            display: state.display.clone(),
        }
    }
}

/// The fields of the expense form.
///
/// Fields are plain text so that bad input is reported by validation rather
/// than rejected by the extractor.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// The amount as typed by the user.
    #[serde(default)]
    pub amount: String,
    /// One of [CATEGORIES].
    #[serde(default)]
    pub category: String,
    /// What the money was spent on.
    #[serde(default)]
    pub description: String,
    /// The date in the format YYYY-MM-DD.
    #[serde(default)]
    pub date: String,
}

impl From<ExpenseForm> for ExpenseRequest {
    fn from(form: ExpenseForm) -> Self {
        ExpenseRequest::from_text(&form.amount, &form.category, &form.description, &form.date)
    }
}

/// Display the expense form, total, chart, table and suggestions.
pub async fn get_tracker_page(State(state): State<TrackerState>) -> Result<Response, Error> {
    let today = local_today(&state.display.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let mut tracker = ExpenseTracker::load(SqliteExpenseStore::new(&connection))?;
    let content = tracker.render().into_html(&state.display.currency_symbol);

    Ok(tracker_view(today, &state.display.currency_symbol, content).into_response())
}

/// Add an expense from the form and respond with the re-rendered tracker content.
///
/// On success the response carries an `HX-Trigger` header with
/// [EXPENSE_CREATED_EVENT] so the page can reset the form.
pub async fn create_expense_view_endpoint(
    State(state): State<TrackerState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let new_expense = match ExpenseRequest::from(form).validate() {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("rejected expense form: {error}");
            return Error::from(error).into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let mut tracker = match ExpenseTracker::load(SqliteExpenseStore::new(&connection)) {
        Ok(tracker) => tracker,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = tracker.add(new_expense) {
        return error.into_alert_response();
    }

    let content = tracker.render().into_html(&state.display.currency_symbol);

    ([(HX_TRIGGER, EXPENSE_CREATED_EVENT)], content).into_response()
}

/// Delete an expense and respond with the re-rendered tracker content.
///
/// Deleting an expense that no longer exists is not an error.
pub async fn delete_expense_view_endpoint(
    State(state): State<TrackerState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let mut tracker = match ExpenseTracker::load(SqliteExpenseStore::new(&connection)) {
        Ok(tracker) => tracker,
        Err(error) => return error.into_alert_response(),
    };

    match tracker.remove(expense_id) {
        Ok(0) => tracing::debug!("expense {expense_id} was already deleted"),
        Ok(_) => {}
        Err(error) => return error.into_alert_response(),
    }

    tracker
        .render()
        .into_html(&state.display.currency_symbol)
        .into_response()
}

fn expense_form_view(today: Date) -> Markup {
    html!(
        form
            id="expense-form"
            hx-post=(endpoints::EXPENSES_VIEW)
            hx-target="#tracker-content"
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
            class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-4" { "Add Expense" }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper"
                    {
                        input
                            id="amount"
                            name="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        id="category"
                        name="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in CATEGORIES {
                            option value=(category) { (category) }
                        }
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        id="description"
                        name="description"
                        type="text"
                        placeholder="What did you spend money on?"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        id="date"
                        name="date"
                        type="date"
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" class={"mt-4 " (BUTTON_PRIMARY_STYLE)} { "Add Expense" }
        }
    )
}

fn tracker_view(today: Date, currency_symbol: &str, tracker_content: Markup) -> Markup {
    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-4"
            {
                header
                {
                    h1 class="text-2xl font-bold" { "Expense Tracker" }
                }

                (expense_form_view(today))

                div id="tracker-content" class="space-y-4"
                {
                    (tracker_content)
                }
            }
        }

        script
        {
            (PreEscaped(format!(
                "document.body.addEventListener('{EXPENSE_CREATED_EVENT}', () => {{
                    document.getElementById('expense-form').reset();
                }});"
            )))
        }
    );

    let head_elements = [
        echarts_script_link(),
        currency_input_styles(currency_symbol),
    ];

    base("Expenses", &head_elements, &content)
}
