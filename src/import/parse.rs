//! Parses CSV files of transactions.
//!
//! A file needs a header row with the columns `description`, `amount`, `type`,
//! `category` and `date`. Other columns are ignored, as are rows whose type is
//! neither income nor expense.

use serde::Deserialize;

use crate::{api::TransactionType, transaction::TransactionForm};

/// The columns a CSV file must have.
pub(crate) const REQUIRED_COLUMNS: [&str; 5] = ["description", "amount", "type", "category", "date"];

/// The errors that stop a whole file from being imported.
#[derive(Debug, thiserror::Error, PartialEq)]
pub(crate) enum ParseError {
    #[error("the file is missing the columns: {0}")]
    MissingColumns(String),

    #[error("line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("the file is not valid CSV: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    description: String,
    amount: f64,
    #[serde(rename = "type")]
    type_: String,
    category: String,
}

/// A transaction read from one line of a CSV file.
#[derive(Debug)]
pub(crate) struct ImportRow {
    /// The line of the file the row came from, counting the header as line 1.
    pub line: u64,
    pub form: TransactionForm,
}

/// Read the income and expense rows of `text`.
///
/// # Errors
///
/// Returns [ParseError::MissingColumns] if the header lacks a required column
/// and [ParseError::InvalidRow] if a row cannot be read, e.g. its amount is
/// not a number.
pub(crate) fn parse_transactions_csv(text: &str) -> Result<Vec<ImportRow>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| ParseError::Malformed(error.to_string()))?
        .clone();

    let missing_columns: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing_columns.is_empty() {
        return Err(ParseError::MissingColumns(missing_columns.join(", ")));
    }

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|error| ParseError::Malformed(error.to_string()))?;
        let line = record.position().map_or(0, |position| position.line());

        let row: CsvRow = record
            .deserialize(Some(&headers))
            .map_err(|error| ParseError::InvalidRow {
                line,
                reason: error.to_string(),
            })?;

        let type_ = match row.type_.to_uppercase().as_str() {
            "INCOME" => TransactionType::Income,
            "EXPENSE" => TransactionType::Expense,
            other => {
                tracing::debug!("skipping line {line} with transaction type {other:?}");
                continue;
            }
        };

        rows.push(ImportRow {
            line,
            form: TransactionForm {
                description: row.description,
                amount: row.amount,
                type_,
                category: row.category,
            },
        });
    }

    Ok(rows)
}
