use axum::{Router, http::header::SET_COOKIE, response::IntoResponse};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key},
};
use sha2::{Digest, Sha512};
use tokio::net::TcpListener;

use crate::{
    AppState,
    api::{ApiClient, Session, UserId},
    session,
};

/// Serve `router` under "/api" on a free local port and return a client for it.
pub(crate) async fn spawn_stub_api(router: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind stub API listener");
    let address = listener
        .local_addr()
        .expect("Could not get stub API address");

    tokio::spawn(async move {
        axum::serve(listener, Router::new().nest("/api", router))
            .await
            .expect("Stub API stopped unexpectedly");
    });

    ApiClient::new(&format!("http://{address}/api")).expect("Could not create API client")
}

pub(crate) fn test_cookie_key() -> Key {
    Key::from(&Sha512::digest("correct horse battery staple"))
}

/// App state backed by a stub API serving `router`.
pub(crate) async fn test_app_state(router: Router) -> AppState {
    AppState {
        cookie_key: test_cookie_key(),
        api: spawn_stub_api(router).await,
        local_timezone: "Etc/UTC".to_owned(),
        secure_cookies: false,
    }
}

pub(crate) fn test_session() -> Session {
    Session {
        user_id: UserId::new(7),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
    }
}

/// The encrypted session cookie a browser would send after logging in as `session`.
pub(crate) fn session_cookie(key: &Key, session: &Session) -> Cookie<'static> {
    let jar = session::save(PrivateCookieJar::new(key.clone()), session, false)
        .expect("Could not save session");
    let response = jar.into_response();
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header missing")
        .to_str()
        .expect("Could not convert Set-Cookie header to str")
        .to_owned();

    Cookie::parse(header).expect("Could not parse session cookie")
}

/// Decrypt the session set by `response_cookie`, if any.
///
/// Set-Cookie values are percent-encoded, so the value is decoded before it
/// is decrypted.
pub(crate) fn decrypt_session(key: &Key, response_cookie: Cookie<'static>) -> Option<Session> {
    let encoded = format!("{}={}", response_cookie.name(), response_cookie.value());
    let response_cookie = Cookie::parse_encoded(encoded).ok()?.into_owned();
    let jar = PrivateCookieJar::new(key.clone());
    let cookie = jar.decrypt(response_cookie)?;

    serde_json::from_str(cookie.value()).ok()
}

#[cfg(test)]
mod backend_tests {
    use super::{decrypt_session, session_cookie, test_cookie_key, test_session};

    #[test]
    fn decrypts_percent_encoded_session_cookie() {
        let key = test_cookie_key();
        let cookie = session_cookie(&key, &test_session());

        assert_eq!(decrypt_session(&key, cookie), Some(test_session()));
    }

    #[test]
    fn session_from_another_key_is_rejected() {
        let cookie = session_cookie(&test_cookie_key(), &test_session());
        let other_key = axum_extra::extract::cookie::Key::generate();

        assert_eq!(decrypt_session(&other_key, cookie), None);
    }
}
