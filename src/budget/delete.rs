//! The endpoint for deleting a budget.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    alert::Alert,
    api::{ApiClient, ApiError, BudgetId},
    dashboard::invalidate_and_reload,
};

/// A route handler for deleting a budget.
///
/// Reloads the page on success, otherwise responds with an alert.
pub async fn delete_budget_endpoint(
    State(api): State<ApiClient>,
    Path(budget_id): Path<BudgetId>,
) -> Response {
    match api.delete_budget(budget_id).await {
        Ok(_) => {
            tracing::info!("Deleted budget {budget_id}");
            invalidate_and_reload()
        }
        Err(ApiError::Rejected(message)) => (
            StatusCode::BAD_REQUEST,
            Alert::Error {
                message: "Could not delete budget".to_owned(),
                details: message,
            },
        )
            .into_response(),
        Err(ApiError::Transport(error)) => {
            tracing::error!("Could not delete budget {budget_id}: {error}");
            (
                StatusCode::BAD_GATEWAY,
                Alert::ErrorSimple {
                    message: "Failed to delete budget. Please try again.".to_owned(),
                },
            )
                .into_response()
        }
        Err(error) => Error::from(error).into_alert_response(),
    }
}
