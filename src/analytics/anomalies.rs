//! Flags expenses that are unusually large.

use std::collections::BTreeMap;

use crate::api::{Transaction, TransactionType};

/// Categories need more expenses than this before their spread is trusted.
const MIN_CATEGORY_SIZE: usize = 5;

/// How serious an anomaly is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Medium,
    High,
}

/// Why an expense was flagged.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AnomalyKind {
    /// Far above the spread of all expenses.
    LargeExpense,
    /// More than two standard deviations above its category's mean.
    UnusualForCategory { mean: f64, spread: f64 },
}

/// An expense that stands out.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Anomaly {
    pub transaction: Transaction,
    pub kind: AnomalyKind,
    pub severity: Severity,
}

/// The `q` quantile of sorted `values`, interpolating linearly between ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;

    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn mean_and_sample_std(values: &[f64]) -> (f64, f64) {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (count - 1.0);

    (mean, variance.sqrt())
}

/// Find unusually large expenses, largest first.
///
/// An expense above `Q3 + 1.5 * IQR` of all expenses is flagged, with high
/// severity above `Q3 + 3 * IQR`. In categories with more than five expenses,
/// an expense above the category mean plus two standard deviations is flagged
/// as well. An expense can be flagged for both reasons.
pub(crate) fn detect_anomalies(transactions: &[Transaction]) -> Vec<Anomaly> {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.type_ == TransactionType::Expense)
        .collect();

    if expenses.is_empty() {
        return Vec::new();
    }

    let mut amounts: Vec<f64> = expenses.iter().map(|expense| expense.amount).collect();
    amounts.sort_by(f64::total_cmp);
    let q1 = quantile(&amounts, 0.25);
    let q3 = quantile(&amounts, 0.75);
    let iqr = q3 - q1;
    let upper_bound = q3 + 1.5 * iqr;
    let extreme_bound = q3 + 3.0 * iqr;

    let mut anomalies: Vec<Anomaly> = expenses
        .iter()
        .filter(|expense| expense.amount > upper_bound)
        .map(|&expense| Anomaly {
            transaction: expense.clone(),
            kind: AnomalyKind::LargeExpense,
            severity: if expense.amount > extreme_bound {
                Severity::High
            } else {
                Severity::Medium
            },
        })
        .collect();

    let mut by_category: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for &expense in &expenses {
        by_category
            .entry(expense.category.as_str())
            .or_default()
            .push(expense);
    }

    for category_expenses in by_category.values() {
        if category_expenses.len() <= MIN_CATEGORY_SIZE {
            continue;
        }

        let amounts: Vec<f64> = category_expenses.iter().map(|e| e.amount).collect();
        let (mean, std) = mean_and_sample_std(&amounts);
        let spread = 2.0 * std;

        anomalies.extend(
            category_expenses
                .iter()
                .filter(|expense| expense.amount > mean + spread)
                .map(|&expense| Anomaly {
                    transaction: expense.clone(),
                    kind: AnomalyKind::UnusualForCategory { mean, spread },
                    severity: Severity::Medium,
                }),
        );
    }

    anomalies.sort_by(|a, b| b.transaction.amount.total_cmp(&a.transaction.amount));
    anomalies
}

#[cfg(test)]
mod detect_anomalies_tests {
    use crate::{
        analytics::test_transaction,
        api::TransactionType::{Expense, Income},
    };

    use super::{AnomalyKind, Severity, detect_anomalies, quantile};

    #[test]
    fn quantile_interpolates_between_ranks() {
        let values = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(quantile(&values, 0.25), 1.75);
        assert_eq!(quantile(&values, 0.75), 3.25);
        assert_eq!(quantile(&[5.0], 0.75), 5.0);
    }

    #[test]
    fn flags_large_expenses_by_severity() {
        // Q1 = 20 and Q3 = 30, so the bounds are 45 and 60.
        let amounts = [20.0, 20.0, 20.0, 25.0, 25.0, 30.0, 30.0, 50.0, 200.0];
        let mut transactions: Vec<_> = amounts
            .into_iter()
            .zip(1..)
            .map(|(amount, id)| {
                test_transaction(id, amount, Expense, &format!("Category {id}"), "2025-03-01")
            })
            .collect();
        transactions.push(test_transaction(10, 5000.0, Income, "Salary", "2025-03-07"));

        let anomalies = detect_anomalies(&transactions);

        let found: Vec<(i64, Severity)> = anomalies
            .iter()
            .map(|anomaly| (anomaly.transaction.id, anomaly.severity))
            .collect();
        assert_eq!(found, [(9, Severity::High), (8, Severity::Medium)]);
        assert!(
            anomalies
                .iter()
                .all(|anomaly| anomaly.kind == AnomalyKind::LargeExpense)
        );
    }

    #[test]
    fn flags_outliers_within_large_categories() {
        let mut transactions: Vec<_> = (1..=9)
            .map(|id| test_transaction(id, 10.0, Expense, "Food & Dining", "2025-03-01"))
            .collect();
        transactions.push(test_transaction(10, 40.0, Expense, "Food & Dining", "2025-03-02"));

        let anomalies = detect_anomalies(&transactions);

        let category_anomaly = anomalies
            .iter()
            .find(|anomaly| matches!(anomaly.kind, AnomalyKind::UnusualForCategory { .. }))
            .expect("No category anomaly found");
        assert_eq!(category_anomaly.transaction.id, 10);
        match category_anomaly.kind {
            AnomalyKind::UnusualForCategory { mean, .. } => assert_eq!(mean, 13.0),
            AnomalyKind::LargeExpense => unreachable!(),
        }
    }

    #[test]
    fn no_expenses_means_no_anomalies() {
        let transactions = vec![test_transaction(1, 10.0, Income, "Salary", "2025-03-01")];

        assert!(detect_anomalies(&transactions).is_empty());
    }
}
