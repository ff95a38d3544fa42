//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    dashboard::{create_expense_view_endpoint, delete_expense_view_endpoint, get_tracker_page},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_summary_endpoint,
        list_expenses_endpoint,
    },
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_tracker_page))
        .route(endpoints::EXPENSES_VIEW, post(create_expense_view_endpoint))
        .route(endpoints::EXPENSE_VIEW, delete(delete_expense_view_endpoint));

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::EXPENSE_API, delete(delete_expense_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        // The JSON API is for clients served from other origins.
        .layer(CorsLayer::permissive());

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
