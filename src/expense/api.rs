//! JSON endpoints for creating, listing and deleting expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    dashboard::{category_totals, evaluate_suggestions, grand_total},
    database_id::{ExpenseId, RowsAffected},
    expense::{ExpenseRequest, ExpenseStore, SqliteExpenseStore},
};

/// The state needed by the JSON API.
#[derive(Debug, Clone)]
pub struct ExpenseApiState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The body returned after creating an expense.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// The ID assigned to the new expense.
    pub id: ExpenseId,
}

/// The body returned after deleting an expense.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// The number of expenses removed, zero if the ID did not exist.
    pub deleted: RowsAffected,
}

/// The total spent on one category.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category label.
    pub category: String,
    /// The sum of all amounts in the category.
    pub total: f64,
}

/// Aggregated totals and tips for every stored expense.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// The sum of all amounts.
    pub total: f64,
    /// Per-category totals in the order each category first appears.
    pub categories: Vec<CategorySummary>,
    /// The texts of the suggestions that apply, in display order.
    pub suggestions: Vec<String>,
}

/// The body returned for any failed request.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A description of what went wrong.
    pub error: String,
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

/// List every expense, newest date first.
pub async fn list_expenses_endpoint(State(state): State<ExpenseApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match SqliteExpenseStore::new(&connection).list_all() {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Validate the request body and store it as a new expense.
///
/// Responds with the new expense's ID, or 400 if the body is not valid.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseApiState>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("rejected expense body: {rejection}");
            return bad_request(rejection.body_text());
        }
    };

    let new_expense = match request.validate() {
        Ok(new_expense) => new_expense,
        Err(error) => return Error::from(error).into_json_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match SqliteExpenseStore::new(&connection).insert(new_expense) {
        Ok(expense) => match expense.id {
            Some(id) => Json(CreatedResponse { id }).into_response(),
            None => {
                tracing::error!("stored expense was not assigned an ID: {expense:?}");
                Error::NotFound.into_json_response()
            }
        },
        Err(error) => error.into_json_response(),
    }
}

/// Delete the expense with the ID in the path.
///
/// Deleting an ID that does not exist succeeds with `{"deleted": 0}`.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseApiState>,
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let expense_id = match path {
        Ok(Path(expense_id)) => expense_id,
        Err(rejection) => {
            tracing::debug!("rejected expense ID: {rejection}");
            return bad_request(rejection.body_text());
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match SqliteExpenseStore::new(&connection).delete_by_id(expense_id) {
        Ok(deleted) => Json(DeletedResponse { deleted }).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Get the grand total, category totals and suggestions for all expenses.
pub async fn get_summary_endpoint(State(state): State<ExpenseApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    let expenses = match SqliteExpenseStore::new(&connection).list_all() {
        Ok(expenses) => expenses,
        Err(error) => return error.into_json_response(),
    };

    let totals = category_totals(&expenses);
    let total = grand_total(&expenses);
    let suggestions = evaluate_suggestions(&totals, total)
        .into_iter()
        .map(|suggestion| suggestion.text().to_owned())
        .collect();
    let categories = totals
        .iter()
        .map(|(category, total)| CategorySummary {
            category: category.to_owned(),
            total,
        })
        .collect();

    Json(SummaryResponse {
        total,
        categories,
        suggestions,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router,
        config::DisplayConfig,
        endpoints::{self, format_endpoint},
        expense::Expense,
    };

    use super::{CreatedResponse, DeletedResponse, ErrorResponse, SummaryResponse};

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, DisplayConfig::default())
            .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn created_expense_is_listed_once() {
        let server = get_test_server();

        let created = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({
                "amount": 12.3,
                "category": "food",
                "description": "Lunch",
                "date": "2024-01-01"
            }))
            .await;
        created.assert_status_ok();
        let CreatedResponse { id } = created.json();

        let listed: Vec<Expense> = server.get(endpoints::EXPENSES_API).await.json();

        let matching: Vec<_> = listed
            .iter()
            .filter(|expense| expense.id == Some(id))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].amount, 12.3);
        assert_eq!(matching[0].category, "food");
        assert_eq!(matching[0].description, "Lunch");
        assert_eq!(matching[0].date.to_string(), "2024-01-01");
    }

    #[tokio::test]
    async fn list_is_empty_for_new_database() {
        let server = get_test_server();

        let response = server.get(endpoints::EXPENSES_API).await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn list_is_sorted_by_date_descending() {
        let server = get_test_server();
        for date in ["2024-01-02", "2024-03-01", "2023-12-31"] {
            server
                .post(endpoints::EXPENSES_API)
                .json(&json!({
                    "amount": 1,
                    "category": "other",
                    "description": "Thing",
                    "date": date
                }))
                .await
                .assert_status_ok();
        }

        let listed: Vec<Expense> = server.get(endpoints::EXPENSES_API).await.json();

        let dates: Vec<_> = listed.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-02", "2023-12-31"]);
    }

    #[tokio::test]
    async fn invalid_expense_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({
                "amount": -5,
                "category": "food",
                "description": "Refund",
                "date": "2024-01-01"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "amount must be greater than zero, got -5");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn deletes_existing_expense() {
        let server = get_test_server();
        let CreatedResponse { id } = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({
                "amount": "4.50",
                "category": "transport",
                "description": "Bus",
                "date": "2024-02-02"
            }))
            .await
            .json();

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE_API, id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<DeletedResponse>(), DeletedResponse { deleted: 1 });
        server
            .get(endpoints::EXPENSES_API)
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn delete_missing_expense_returns_zero() {
        let server = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE_API, 999))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "deleted": 0 }));
    }

    #[tokio::test]
    async fn delete_with_non_numeric_id_is_bad_request_json() {
        let server = get_test_server();

        let response = server.delete("/api/expenses/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn summary_aggregates_all_expenses() {
        let server = get_test_server();
        for (amount, category, date) in [
            (100, "food", "2024-01-01"),
            (50, "entertainment", "2024-01-02"),
        ] {
            server
                .post(endpoints::EXPENSES_API)
                .json(&json!({
                    "amount": amount,
                    "category": category,
                    "description": "Test",
                    "date": date
                }))
                .await
                .assert_status_ok();
        }

        let summary: SummaryResponse = server.get(endpoints::SUMMARY_API).await.json();

        assert_eq!(summary.total, 150.0);
        let categories: Vec<_> = summary
            .categories
            .iter()
            .map(|category| (category.category.as_str(), category.total))
            .collect();
        // Listed newest first, so entertainment is seen before food.
        assert_eq!(categories, vec![("entertainment", 50.0), ("food", 100.0)]);
        assert_eq!(summary.suggestions.len(), 4);
        assert!(summary.suggestions[0].starts_with("Consider reducing entertainment"));
        assert!(summary.suggestions[1].starts_with("Try meal planning"));
    }
}
