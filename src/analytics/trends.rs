//! Month over month changes in income, spending and categories.

use std::collections::BTreeMap;

use crate::{
    api::{Transaction, TransactionType},
    dashboard::BudgetPeriod,
    format::parse_date,
};

/// Totals for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MonthTotals {
    pub period: BudgetPeriod,
    pub income: f64,
    pub expenses: f64,
}

/// How income and spending moved over recent months.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Trends {
    /// The months that have transactions, oldest first.
    pub months: Vec<MonthTotals>,
    /// The mean month over month change in income, as a percentage.
    pub income_change: Option<f64>,
    /// The mean month over month change in expenses, as a percentage.
    pub expense_change: Option<f64>,
    /// The mean month over month change per category, as a percentage.
    /// Only categories seen in more than one month are included.
    pub category_changes: BTreeMap<String, f64>,
}

/// Count months from year zero so that consecutive months differ by one.
fn month_index(year: i32, month: u8) -> i32 {
    year * 12 + i32::from(month) - 1
}

fn period_from_index(index: i32) -> BudgetPeriod {
    BudgetPeriod {
        year: index.div_euclid(12),
        month: (index.rem_euclid(12) + 1) as u8,
    }
}

/// The mean relative change between consecutive values, as a percentage.
///
/// Pairs that start from zero have no relative change and are skipped.
fn mean_percent_change(values: &[f64]) -> Option<f64> {
    let changes: Vec<f64> = values
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0] * 100.0)
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.iter().sum::<f64>() / changes.len() as f64)
    }
}

/// Work out trends over the `months` months that end with `end`.
///
/// Months without any transactions are left out, as are transactions without
/// a readable date.
pub(crate) fn calculate_trends(transactions: &[Transaction], end: BudgetPeriod, months: u8) -> Trends {
    let end_index = month_index(end.year, end.month);
    let start_index = end_index - i32::from(months.max(1)) + 1;

    let mut totals: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    let mut categories: BTreeMap<&str, BTreeMap<i32, f64>> = BTreeMap::new();

    for transaction in transactions {
        let Some(date) = transaction.date.as_deref().and_then(parse_date) else {
            continue;
        };
        let index = month_index(date.year(), date.month().into());
        if !(start_index..=end_index).contains(&index) {
            continue;
        }

        let (income, expenses) = totals.entry(index).or_insert((0.0, 0.0));
        match transaction.type_ {
            TransactionType::Income => *income += transaction.amount,
            TransactionType::Expense => *expenses += transaction.amount,
        }

        *categories
            .entry(transaction.category.as_str())
            .or_default()
            .entry(index)
            .or_insert(0.0) += transaction.amount;
    }

    let months: Vec<MonthTotals> = totals
        .iter()
        .map(|(&index, &(income, expenses))| MonthTotals {
            period: period_from_index(index),
            income,
            expenses,
        })
        .collect();

    let incomes: Vec<f64> = months.iter().map(|month| month.income).collect();
    let expenses: Vec<f64> = months.iter().map(|month| month.expenses).collect();

    let category_changes = categories
        .into_iter()
        .filter_map(|(category, by_month)| {
            let values: Vec<f64> = by_month.into_values().collect();
            let change = mean_percent_change(&values)?;
            Some((category.to_owned(), change))
        })
        .collect();

    Trends {
        income_change: mean_percent_change(&incomes),
        expense_change: mean_percent_change(&expenses),
        months,
        category_changes,
    }
}

#[cfg(test)]
mod trends_tests {
    use crate::{
        analytics::test_transaction,
        api::TransactionType::{Expense, Income},
        dashboard::BudgetPeriod,
    };

    use super::{calculate_trends, mean_percent_change};

    #[test]
    fn mean_change_skips_pairs_starting_at_zero() {
        assert_eq!(mean_percent_change(&[100.0, 150.0, 75.0]), Some(0.0));
        assert_eq!(mean_percent_change(&[0.0, 50.0]), None);
        assert_eq!(mean_percent_change(&[10.0]), None);
    }

    #[test]
    fn averages_monthly_changes_within_the_window() {
        let transactions = vec![
            // Outside the three month window.
            test_transaction(1, 9000.0, Income, "Salary", "2024-12-01"),
            test_transaction(2, 1000.0, Income, "Salary", "2025-01-01"),
            test_transaction(3, 200.0, Expense, "Food & Dining", "2025-01-10"),
            test_transaction(4, 1100.0, Income, "Salary", "2025-02-01"),
            test_transaction(5, 300.0, Expense, "Food & Dining", "2025-02-10"),
            test_transaction(6, 1210.0, Income, "Salary", "2025-03-01"),
            test_transaction(7, 110.0, Expense, "Food & Dining", "2025-03-10"),
            test_transaction(8, 40.0, Expense, "Travel", "2025-03-11"),
        ];

        let trends = calculate_trends(
            &transactions,
            BudgetPeriod {
                month: 3,
                year: 2025,
            },
            3,
        );

        assert_eq!(trends.months.len(), 3);
        assert_eq!(
            trends.months[0].period,
            BudgetPeriod {
                month: 1,
                year: 2025
            }
        );
        let income_change = trends.income_change.unwrap();
        assert!((income_change - 10.0).abs() < 1e-9, "got {income_change}");
        // +50% then -50%.
        let expense_change = trends.expense_change.unwrap();
        assert!(expense_change.abs() < 1e-9, "got {expense_change}");
        assert!(trends.category_changes.contains_key("Salary"));
        assert!(!trends.category_changes.contains_key("Travel"));
    }

    #[test]
    fn window_crosses_year_boundary() {
        let transactions = vec![
            test_transaction(1, 100.0, Expense, "Other", "2024-12-31"),
            test_transaction(2, 200.0, Expense, "Other", "2025-01-01"),
        ];

        let trends = calculate_trends(
            &transactions,
            BudgetPeriod {
                month: 1,
                year: 2025,
            },
            2,
        );

        assert_eq!(trends.months.len(), 2);
        assert_eq!(trends.expense_change, Some(100.0));
    }
}
