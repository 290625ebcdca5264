//! Creating, listing and deleting transactions.

mod create;
mod delete;
mod list;

pub(crate) use create::{TransactionForm, validate as validate_transaction};
pub use create::{create_transaction_endpoint, get_new_transaction_modal};
pub use delete::delete_transaction_endpoint;
pub(crate) use list::transaction_list;
