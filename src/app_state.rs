//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{Error, api::ApiClient, timezone::get_local_offset};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The client for the finance REST backend.
    pub api: ApiClient,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// Whether the session cookie is marked `Secure`. Only enable this when
    /// the site is reached over HTTPS, e.g. behind a TLS terminating proxy.
    pub secure_cookies: bool,
}

impl AppState {
    /// Create a new [AppState] that talks to the finance backend at `api_url`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    /// `secure_cookies` marks the session cookie as HTTPS only.
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a known timezone or the
    /// HTTP client cannot be created.
    pub fn new(
        api_url: &str,
        cookie_secret: &str,
        local_timezone: &str,
        secure_cookies: bool,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            api: ApiClient::new(api_url)?,
            local_timezone: local_timezone.to_owned(),
            secure_cookies,
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for ApiClient {
    fn from_ref(state: &AppState) -> Self {
        state.api.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod app_state_tests {
    use crate::Error;

    use super::AppState;

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new(
            "http://localhost:8080/api",
            "secret",
            "Nowhere/Special",
            false,
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Nowhere/Special".to_owned()))
        );
    }

    #[test]
    fn keeps_api_url_and_timezone() {
        let state = AppState::new(
            "http://localhost:8080/api/",
            "secret",
            "Pacific/Auckland",
            true,
        )
        .expect("Could not create app state");

        assert_eq!(state.api.base_url(), "http://localhost:8080/api");
        assert_eq!(state.local_timezone, "Pacific/Auckland");
        assert!(state.secure_cookies);
    }
}
