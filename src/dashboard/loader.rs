//! Loads everything the dashboard shows from the finance backend.

use time::{OffsetDateTime, UtcOffset};

use crate::api::{ApiClient, ApiError, Budget, ExpensesByCategory, Transaction, UserId};

/// The month and year that budgets are shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetPeriod {
    /// 1 to 12
    pub month: u8,
    pub year: i32,
}

impl BudgetPeriod {
    /// The current month in the timezone with `local_offset`.
    pub(crate) fn current(local_offset: UtcOffset) -> Self {
        let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

        Self {
            month: today.month().into(),
            year: today.year(),
        }
    }
}

/// The data the dashboard is rendered from.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct DashboardData {
    pub transactions: Vec<Transaction>,
    pub expenses_by_category: ExpensesByCategory,
    pub budgets: Vec<Budget>,
}

/// Fetch a user's transactions, expenses by category and budgets for `period` concurrently.
///
/// Waits for all three requests. A request that fails is logged and its data
/// is shown as empty, so the dashboard always renders.
pub(crate) async fn load_dashboard_data(
    api: &ApiClient,
    user_id: UserId,
    period: BudgetPeriod,
) -> DashboardData {
    let (transactions, expenses_by_category, budgets) = tokio::join!(
        api.get_user_transactions(user_id),
        api.get_expenses_by_category(user_id),
        api.get_user_budgets(user_id, period.month, period.year),
    );

    DashboardData {
        transactions: or_empty(transactions, "transactions", user_id),
        expenses_by_category: or_empty(expenses_by_category, "expenses by category", user_id),
        budgets: or_empty(budgets, "budgets", user_id),
    }
}

fn or_empty<T: Default>(result: Result<T, ApiError>, what: &str, user_id: UserId) -> T {
    result
        .inspect_err(|error| tracing::error!("Error loading {what} for user {user_id}: {error}"))
        .unwrap_or_default()
}
