//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base layout.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

const SUCCESS_STYLE: &str = "flex items-start p-4 mb-4 text-green-800 border border-green-300 \
    rounded-lg bg-green-50 dark:bg-gray-800 dark:text-green-400 dark:border-green-800 shadow";

const ERROR_STYLE: &str = "flex items-start p-4 mb-4 text-red-800 border border-red-300 \
    rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800 shadow";

/// An alert message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something worked, `details` says what happened.
    Success { message: String, details: String },
    /// Something went wrong, `details` explains what the user can do about it.
    Error { message: String, details: String },
    /// An error alert without details.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, Some(details)),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, None),
        };

        html! {
            div role="alert" class=(style)
            {
                div class="grow"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details.filter(|details| !details.is_empty()) {
                        p class="text-sm mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    class="ms-4 text-xl leading-none"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
