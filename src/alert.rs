//! Alert fragments for showing failures to the user.
//!
//! Alerts are returned by htmx endpoints with an error status code and are
//! swapped into the page's alert container.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error message with optional details, rendered as a dismissible alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        html!(
            div
                role="alert"
                class="flex items-start p-4 mb-4 text-red-800 border border-red-300
                    rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400
                    dark:border-red-800"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="ms-3 text-red-500 hover:text-red-700"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        )
    }

    /// Render the alert with the given status code.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, self.into_html()).into_response()
    }
}
