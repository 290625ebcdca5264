//! Dashboard module
//!
//! Shows the user's balance, transactions and budgets, loaded fresh from the
//! finance backend on every visit.

mod charts;
mod handlers;
mod loader;
mod modal;
mod stats;
mod views;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;

pub use handlers::{get_dashboard_content, get_dashboard_page};
pub(crate) use loader::BudgetPeriod;
pub(crate) use modal::modal;
pub(crate) use stats::derive_stats;

/// The response to a successful change to the user's data.
///
/// The page reloads, which closes any open modal and fetches all of the
/// dashboard data again.
pub(crate) fn invalidate_and_reload() -> Response {
    (HxRefresh(true), StatusCode::OK).into_response()
}
