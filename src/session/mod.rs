//! The logged-in user's session: where it is stored and how handlers get it.

mod guard;
mod store;

pub use guard::{SessionState, session_guard, session_guard_hx};
pub use store::{SESSION_COOKIE, clear, load, save};
