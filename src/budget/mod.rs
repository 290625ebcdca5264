//! Monthly spending limits per category.

mod create;
mod delete;
mod list;

pub use create::{NewBudgetState, create_budget_endpoint, get_new_budget_modal};
pub use delete::delete_budget_endpoint;
pub(crate) use list::budget_list;
