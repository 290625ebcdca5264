//! The JSON shapes exchanged with the finance backend.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// The ID of a user in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw ID from the backend.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The ID as an integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ID of a transaction in the backend.
pub type TransactionId = i64;

/// The ID of a budget in the backend.
pub type BudgetId = i64;

/// The identity of the logged-in user, as returned by a successful log-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// The response to a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub message: String,
    pub user_id: UserId,
}

/// A plain acknowledgement, e.g. after deleting something.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: String,
}

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The value used on the wire and in HTML forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    /// A human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

/// A transaction owned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// The amount in dollars, always positive. [Transaction::type_] gives the direction.
    pub amount: f64,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub category: String,
    /// An ISO 8601 date-time string.
    #[serde(default, alias = "transactionDate")]
    pub date: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// The request body for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: UserId,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub category: String,
}

/// A spending limit for one category in one month.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    pub category: String,
    pub amount: f64,
    pub month: u8,
    pub year: i32,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// The request body for creating a budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub user_id: UserId,
    pub category: String,
    pub amount: f64,
    pub month: u8,
    pub year: i32,
}

/// The total amount spent in each category, computed by the backend.
pub type ExpensesByCategory = BTreeMap<String, f64>;

#[derive(Serialize)]
pub(super) struct LogInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}
