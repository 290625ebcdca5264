//! Importing transactions from CSV files.

mod endpoint;
mod parse;

pub(crate) use endpoint::TRANSACTIONS_IMPORTED_EVENT;
pub use endpoint::{get_import_modal, import_transactions_endpoint};
