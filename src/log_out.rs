//! Log-out route handler that removes the session cookie and redirects users.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{endpoints, session};

/// Remove the session cookie and redirect the client to the log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    if let Some(session) = session::load(&jar) {
        tracing::info!("User {} logged out", session.user_id);
    }

    let jar = session::clear(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
