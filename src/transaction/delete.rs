//! The endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    alert::Alert,
    api::{ApiClient, ApiError, TransactionId},
    dashboard::invalidate_and_reload,
};

/// A route handler for deleting a transaction.
///
/// Reloads the page on success, otherwise responds with an alert.
pub async fn delete_transaction_endpoint(
    State(api): State<ApiClient>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match api.delete_transaction(transaction_id).await {
        Ok(_) => {
            tracing::info!("Deleted transaction {transaction_id}");
            invalidate_and_reload()
        }
        Err(ApiError::Rejected(message)) => (
            StatusCode::BAD_REQUEST,
            Alert::Error {
                message: "Could not delete transaction".to_owned(),
                details: message,
            },
        )
            .into_response(),
        Err(ApiError::Transport(error)) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            (
                StatusCode::BAD_GATEWAY,
                Alert::ErrorSimple {
                    message: "Failed to delete transaction. Please try again.".to_owned(),
                },
            )
                .into_response()
        }
        Err(error) => Error::from(error).into_alert_response(),
    }
}
