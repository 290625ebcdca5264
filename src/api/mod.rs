//! Client side of the finance REST backend: the HTTP client and the JSON models.

mod client;
mod models;

pub use client::{ApiClient, ApiError};
pub use models::{
    Acknowledgement, Budget, BudgetId, ExpensesByCategory, NewBudget, NewTransaction,
    Registration, Session, Transaction, TransactionId, TransactionType, UserId,
};
