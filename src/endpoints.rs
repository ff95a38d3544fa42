//! The route URIs served by the app.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The client page with the expense form, table, chart, total and suggestions.
pub const ROOT: &str = "/";
/// The route the expense form posts to. Responds with the re-rendered tracker content.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The route for deleting an expense from the client page.
pub const EXPENSE_VIEW: &str = "/expenses/{expense_id}";

/// The route to list and create expenses as JSON.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to delete a single expense as JSON.
pub const EXPENSE_API: &str = "/api/expenses/{expense_id}";
/// The route for the aggregated totals and suggestions as JSON.
pub const SUMMARY_API: &str = "/api/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
