//! An expense tracker for recording personal spending.
//!
//! Expenses are kept in a local SQLite database and served by a small web
//! server, both as a JSON API and as a server-rendered page with a table, a
//! category pie chart, a running total and budgeting suggestions.
//!
//! The same aggregation and rendering is available without a server through
//! [ExpenseTracker] and [LocalStore], which keep the expense list in a local
//! JSON file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod config;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_TIMEZONE, DisplayConfig};
pub use dashboard::{
    CategoryTotals, ChartSlot, ExpenseTracker, PALETTE, PieChart, PieSlice, Suggestion,
    TrackerView, category_totals, evaluate_suggestions, grand_total,
};
pub use database_id::{ExpenseId, RowsAffected};
pub use db::initialize as initialize_db;
pub use expense::{
    CategorySummary, CreatedResponse, DeletedResponse, ErrorResponse, Expense, ExpenseRequest,
    ExpenseStore, LocalStore, NewExpense, STORAGE_KEY, SqliteExpenseStore, SummaryResponse,
    ValidationError,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::{get_local_offset, local_today};

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client submitted an expense that failed validation.
    #[error("{0}")]
    InvalidExpense(#[from] ValidationError),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("{0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The local expense file could not be read, parsed or written.
    #[error("local store error: {0}")]
    LocalStoreError(String),

    /// The body of a request could not be read.
    #[error("could not read the request body: {0}")]
    InvalidRequestBody(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

fn invalid_timezone_fix(timezone: &str) -> String {
    format!(
        "Could not get local timezone \"{timezone}\". Check your server settings and \
        ensure the timezone has been set to valid, canonical timezone string"
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &invalid_timezone_fix(&timezone),
            }
            .into_response(),
            Error::InvalidExpense(error) => {
                Alert::error("Invalid expense", &error.to_string())
                    .into_response_with_status(StatusCode::BAD_REQUEST)
            }
            Error::InvalidRequestBody(_) => {
                (StatusCode::BAD_REQUEST, "Could not read the request body").into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx to swap into the alert container.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidExpense(error) => Alert::error("Invalid expense", &error.to_string())
                .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidTimezoneError(timezone) => {
                Alert::error("Invalid Timezone Settings", &invalid_timezone_fix(&timezone))
                    .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Render the error as a JSON body of the form `{"error": "..."}`.
    ///
    /// Validation errors are client errors (400). Everything else is a server
    /// error (500) and SQL errors carry the database driver's message as is.
    pub(crate) fn into_json_response(self) -> Response {
        let status = match self {
            Error::InvalidExpense(_) | Error::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            _ => {
                tracing::error!("An unexpected error occurred: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    use crate::{Error, ValidationError};

    async fn json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");

        serde_json::from_slice(&body).expect("Could not parse JSON body")
    }

    #[tokio::test]
    async fn validation_error_is_bad_request_json() {
        let error = Error::from(ValidationError::MissingField("amount"));

        let response = error.into_json_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "amount is required" })
        );
    }

    #[tokio::test]
    async fn sql_error_json_carries_driver_message() {
        let sql_error = rusqlite::Error::InvalidColumnName("nope".to_owned());
        let want_message = sql_error.to_string();

        let response = Error::from(sql_error).into_json_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], want_message);
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_expense_alert_is_bad_request() {
        let error = Error::from(ValidationError::EmptyField("category"));

        let response = error.into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lock_error_alert_is_server_error() {
        let response = Error::DatabaseLockError.into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
