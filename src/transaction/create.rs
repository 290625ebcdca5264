//! The form and endpoint for adding a transaction.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    api::{ApiClient, ApiError, NewTransaction, Session, TransactionType},
    category::{CATEGORIES, is_known_category},
    dashboard::{invalidate_and_reload, modal},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
};

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The value of the transaction in dollars.
    pub amount: f64,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub category: String,
}

fn transaction_form(form: Option<&TransactionForm>, error_message: Option<&str>) -> Markup {
    let description = form.map(|form| form.description.as_str()).unwrap_or_default();
    let amount = form.map(|form| form.amount.to_string()).unwrap_or_default();
    let type_ = form
        .map(|form| form.type_)
        .unwrap_or(TransactionType::Expense);
    let category = form.map(|form| form.category.as_str());

    html! {
        form
            id="transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-disabled-elt="find button"
            class="space-y-4"
        {
            @if let Some(error_message) = error_message {
                p role="alert" class="text-red-500 text-base" { (error_message) }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                input
                    type="text"
                    name="description"
                    id="description"
                    value=(description)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus;
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    step="0.01"
                    min="0.01"
                    value=(amount)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    @for option in [TransactionType::Expense, TransactionType::Income] {
                        option value=(option.as_str()) selected[option == type_] { (option.label()) }
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    option value="" disabled selected[category.is_none()] { "Select a category" }

                    @for option in CATEGORIES {
                        option value=(option) selected[category == Some(option)] { (option) }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) "Processing..." }
                span class="htmx-idle-label" { "Add Transaction" }
            }
        }
    }
}

/// The modal with an empty form for adding a transaction.
pub async fn get_new_transaction_modal() -> Markup {
    modal("Add Transaction", &transaction_form(None, None))
}

/// Check the form data before sending it to the backend.
pub(crate) fn validate(form: &TransactionForm) -> Result<(), &'static str> {
    if form.description.trim().is_empty() {
        return Err("Enter a description.");
    }

    if !form.amount.is_finite() || form.amount <= 0.0 {
        return Err("The amount must be greater than zero.");
    }

    if !is_known_category(&form.category) {
        return Err("Choose a category from the list.");
    }

    Ok(())
}

/// A route handler for creating a new transaction.
///
/// On success the page is reloaded, otherwise the form is returned with an
/// error message.
pub async fn create_transaction_endpoint(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    Form(form): Form<TransactionForm>,
) -> Response {
    if let Err(error_message) = validate(&form) {
        return transaction_form(Some(&form), Some(error_message)).into_response();
    }

    let new_transaction = NewTransaction {
        user_id: session.user_id,
        description: form.description.trim().to_owned(),
        amount: form.amount,
        type_: form.type_,
        category: form.category.clone(),
    };

    match api.create_transaction(&new_transaction).await {
        Ok(transaction) => {
            tracing::info!(
                "Created transaction {} for user {}",
                transaction.id,
                session.user_id
            );
            invalidate_and_reload()
        }
        Err(ApiError::Rejected(message)) => {
            transaction_form(Some(&form), Some(&message)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            transaction_form(Some(&form), Some("An error occurred. Please try again."))
                .into_response()
        }
    }
}
