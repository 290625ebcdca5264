//! The form and endpoint for adding a budget.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    api::{ApiClient, ApiError, NewBudget, Session},
    category::{CATEGORIES, is_known_category},
    dashboard::{BudgetPeriod, invalidate_and_reload, modal},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    timezone::get_local_offset,
};

/// The state needed to show the budget form.
#[derive(Debug, Clone)]
pub struct NewBudgetState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a budget.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    pub category: String,
    /// The spending limit in dollars.
    pub amount: f64,
    /// The month of the year, 1 to 12.
    pub month: u8,
    pub year: i32,
}

fn budget_form(form: &BudgetFormValues<'_>, error_message: Option<&str>) -> Markup {
    html! {
        form
            id="budget-form"
            hx-post=(endpoints::BUDGETS_API)
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
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    option value="" disabled selected[form.category.is_none()] { "Select a category" }

                    @for option in CATEGORIES {
                        option value=(option) selected[form.category == Some(option)] { (option) }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Budget Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    step="0.01"
                    min="0.01"
                    value=[form.amount.map(|amount| amount.to_string())]
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div class="grid grid-cols-2 gap-4"
            {
                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }
                    select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE) required
                    {
                        @for month in 1..=12u8 {
                            option value=(month) selected[month == form.period.month] {
                                (Month::try_from(month).map(|month| month.to_string()).unwrap_or_default())
                            }
                        }
                    }
                }

                div
                {
                    label for="year" class=(FORM_LABEL_STYLE) { "Year" }
                    input
                        type="number"
                        name="year"
                        id="year"
                        min="2000"
                        max="2100"
                        value=(form.period.year)
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) "Processing..." }
                span class="htmx-idle-label" { "Add Budget" }
            }
        }
    }
}

/// The values shown in the budget form.
struct BudgetFormValues<'a> {
    category: Option<&'a str>,
    amount: Option<f64>,
    period: BudgetPeriod,
}

impl<'a> From<&'a BudgetForm> for BudgetFormValues<'a> {
    fn from(form: &'a BudgetForm) -> Self {
        Self {
            category: Some(&form.category),
            amount: Some(form.amount),
            period: BudgetPeriod {
                month: form.month,
                year: form.year,
            },
        }
    }
}

/// The modal with a budget form for the current month.
pub async fn get_new_budget_modal(State(state): State<NewBudgetState>) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let values = BudgetFormValues {
        category: None,
        amount: None,
        period: BudgetPeriod::current(local_offset),
    };

    modal("Add Budget", &budget_form(&values, None)).into_response()
}

/// Check the form data before sending it to the backend.
fn validate(form: &BudgetForm) -> Result<(), &'static str> {
    if !is_known_category(&form.category) {
        return Err("Choose a category from the list.");
    }

    if !form.amount.is_finite() || form.amount <= 0.0 {
        return Err("The amount must be greater than zero.");
    }

    if !(1..=12).contains(&form.month) {
        return Err("Choose a month from the list.");
    }

    Ok(())
}

/// A route handler for creating a new budget.
///
/// On success the page is reloaded, otherwise the form is returned with an
/// error message.
pub async fn create_budget_endpoint(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let values = BudgetFormValues::from(&form);

    if let Err(error_message) = validate(&form) {
        return budget_form(&values, Some(error_message)).into_response();
    }

    let new_budget = NewBudget {
        user_id: session.user_id,
        category: form.category.clone(),
        amount: form.amount,
        month: form.month,
        year: form.year,
    };

    match api.create_budget(&new_budget).await {
        Ok(budget) => {
            tracing::info!("Created budget {} for user {}", budget.id, session.user_id);
            invalidate_and_reload()
        }
        Err(ApiError::Rejected(message)) => budget_form(&values, Some(&message)).into_response(),
        Err(error) => {
            tracing::error!("Could not create budget: {error}");
            budget_form(&values, Some("An error occurred. Please try again.")).into_response()
        }
    }
}
