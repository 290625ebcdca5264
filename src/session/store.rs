//! Persists the session in a private cookie.
//!
//! The cookie is encrypted and authenticated with the app's cookie key, so the
//! browser can hold on to the session without being able to read or forge it.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};

use crate::{Error, api::Session};

/// The name of the cookie that holds the JSON serialized session.
pub const SESSION_COOKIE: &str = "financeUser";

/// Read the session stored in `jar`.
///
/// Returns `None` if there is no session cookie or if its contents are not a
/// valid session.
pub fn load(jar: &PrivateCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;

    serde_json::from_str(cookie.value())
        .inspect_err(|error| tracing::warn!("ignoring malformed session cookie: {error}"))
        .ok()
}

/// Store `session` in `jar`, replacing any existing session.
///
/// The cookie never expires on its own; it lasts until [clear] is called.
/// Set `secure` when the site is served over HTTPS so the browser only sends
/// the cookie over encrypted connections.
///
/// # Errors
///
/// Returns [Error::SessionSerialization] if the session cannot be serialized.
pub fn save(
    jar: PrivateCookieJar,
    session: &Session,
    secure: bool,
) -> Result<PrivateCookieJar, Error> {
    let value = serde_json::to_string(session)
        .map_err(|error| Error::SessionSerialization(error.to_string()))?;

    let mut cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .build();
    cookie.make_permanent();

    Ok(jar.add(cookie))
}

/// Remove the session from `jar`.
pub fn clear(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
