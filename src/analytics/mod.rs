//! Insights worked out from the user's transactions: a summary of the current
//! month, month over month trends and unusually large expenses.

mod anomalies;
mod report;
mod trends;
mod views;

pub(crate) use views::insights_view;

#[cfg(test)]
pub(crate) fn test_transaction(
    id: i64,
    amount: f64,
    type_: crate::api::TransactionType,
    category: &str,
    date: &str,
) -> crate::api::Transaction {
    crate::api::Transaction {
        id,
        description: format!("Transaction {id}"),
        amount,
        type_,
        category: category.to_owned(),
        date: Some(date.to_owned()),
        user_id: None,
    }
}
