//! The summary of one month of transactions.

use std::collections::BTreeMap;

use crate::{
    api::{Transaction, TransactionType},
    dashboard::{BudgetPeriod, derive_stats},
    format::parse_date,
};

/// How many of the largest expenses a report lists.
const TOP_EXPENSE_COUNT: usize = 10;

/// Income, spending and savings for one month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyReport {
    pub period: BudgetPeriod,
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub net_savings: f64,
    /// Net savings as a percentage of income, `None` without income.
    pub savings_rate: Option<f64>,
    pub transaction_count: usize,
    pub expenses_by_category: BTreeMap<String, f64>,
    pub income_by_category: BTreeMap<String, f64>,
    /// Total expenses per day of the month.
    pub daily_spending: BTreeMap<u8, f64>,
    /// The largest expenses, largest first.
    pub top_expenses: Vec<Transaction>,
}

/// Whether `transaction` is dated within `period`.
fn is_in_period(transaction: &Transaction, period: BudgetPeriod) -> bool {
    transaction
        .date
        .as_deref()
        .and_then(parse_date)
        .is_some_and(|date| u8::from(date.month()) == period.month && date.year() == period.year)
}

/// Summarise the transactions dated in `period`.
///
/// Returns `None` if there are no transactions in that month. Transactions
/// without a readable date are left out.
pub(crate) fn generate_monthly_report(
    transactions: &[Transaction],
    period: BudgetPeriod,
) -> Option<MonthlyReport> {
    let in_month: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| is_in_period(transaction, period))
        .cloned()
        .collect();

    if in_month.is_empty() {
        return None;
    }

    let stats = derive_stats(&in_month);

    let mut expenses_by_category = BTreeMap::new();
    let mut income_by_category = BTreeMap::new();
    let mut daily_spending = BTreeMap::new();

    for transaction in &in_month {
        match transaction.type_ {
            TransactionType::Income => {
                *income_by_category
                    .entry(transaction.category.clone())
                    .or_insert(0.0) += transaction.amount;
            }
            TransactionType::Expense => {
                *expenses_by_category
                    .entry(transaction.category.clone())
                    .or_insert(0.0) += transaction.amount;

                if let Some(date) = transaction.date.as_deref().and_then(parse_date) {
                    *daily_spending.entry(date.day()).or_insert(0.0) += transaction.amount;
                }
            }
        }
    }

    let mut top_expenses: Vec<Transaction> = in_month
        .iter()
        .filter(|transaction| transaction.type_ == TransactionType::Expense)
        .cloned()
        .collect();
    top_expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    top_expenses.truncate(TOP_EXPENSE_COUNT);

    Some(MonthlyReport {
        period,
        total_income: stats.total_income,
        total_expenses: stats.total_expenses,
        net_savings: stats.balance,
        savings_rate: (stats.total_income > 0.0)
            .then(|| stats.balance / stats.total_income * 100.0),
        transaction_count: stats.transaction_count,
        expenses_by_category,
        income_by_category,
        daily_spending,
        top_expenses,
    })
}

#[cfg(test)]
mod monthly_report_tests {
    use crate::{
        analytics::test_transaction,
        api::TransactionType::{Expense, Income},
        dashboard::BudgetPeriod,
    };

    use super::generate_monthly_report;

    const MARCH: BudgetPeriod = BudgetPeriod {
        month: 3,
        year: 2025,
    };

    #[test]
    fn summarises_only_the_requested_month() {
        let transactions = vec![
            test_transaction(1, 4000.0, Income, "Salary", "2025-03-01T09:00:00"),
            test_transaction(2, 1200.0, Expense, "Bills & Utilities", "2025-03-02"),
            test_transaction(3, 300.0, Expense, "Food & Dining", "2025-03-02"),
            test_transaction(4, 500.0, Expense, "Food & Dining", "2025-03-15"),
            test_transaction(5, 999.0, Expense, "Travel", "2025-02-28"),
        ];

        let report = generate_monthly_report(&transactions, MARCH).unwrap();

        assert_eq!(report.transaction_count, 4);
        assert_eq!(report.total_income, 4000.0);
        assert_eq!(report.total_expenses, 2000.0);
        assert_eq!(report.net_savings, 2000.0);
        assert_eq!(report.savings_rate, Some(50.0));
        assert_eq!(report.expenses_by_category["Food & Dining"], 800.0);
        assert_eq!(report.income_by_category["Salary"], 4000.0);
        assert_eq!(report.daily_spending[&2], 1500.0);
        assert_eq!(report.daily_spending[&15], 500.0);
        let top: Vec<i64> = report.top_expenses.iter().map(|t| t.id).collect();
        assert_eq!(top, [2, 4, 3]);
    }

    #[test]
    fn savings_rate_needs_income() {
        let transactions = vec![test_transaction(1, 20.0, Expense, "Other", "2025-03-05")];

        let report = generate_monthly_report(&transactions, MARCH).unwrap();

        assert_eq!(report.savings_rate, None);
        assert_eq!(report.net_savings, -20.0);
    }

    #[test]
    fn month_without_transactions_has_no_report() {
        let transactions = vec![test_transaction(1, 20.0, Expense, "Other", "2024-03-05")];

        assert_eq!(generate_monthly_report(&transactions, MARCH), None);
    }
}
