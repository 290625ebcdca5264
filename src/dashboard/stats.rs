//! Summary statistics derived from the loaded transactions.

use crate::api::{Transaction, TransactionType};

/// Totals over a list of transactions.
///
/// Always computed from the transactions that were just loaded, never stored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct DerivedStats {
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub balance: f64,
    pub transaction_count: usize,
}

/// Sum the income and expenses in `transactions`.
pub(crate) fn derive_stats(transactions: &[Transaction]) -> DerivedStats {
    let (total_income, total_expenses) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expenses), transaction| {
                match transaction.type_ {
                    TransactionType::Income => (income + transaction.amount, expenses),
                    TransactionType::Expense => (income, expenses + transaction.amount),
                }
            });

    DerivedStats {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count: transactions.len(),
    }
}
