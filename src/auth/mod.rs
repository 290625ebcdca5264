//! Log-in and registration pages.

mod form;
mod handlers;

pub use handlers::{get_log_in_page, post_log_in, post_register};
