//! Middleware that only lets requests with a session through to protected routes.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;

use crate::{AppState, endpoints, session::load};

/// The state needed by the session guard.
#[derive(Clone)]
pub struct SessionState {
    /// The key used for decrypting the session cookie.
    pub cookie_key: Key,
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<SessionState> for Key {
    fn from_ref(state: &SessionState) -> Self {
        state.cookie_key.clone()
    }
}

/// Load the session and place it in the request extensions, otherwise answer
/// with the response from `get_redirect`.
#[inline]
async fn session_guard_internal(
    state: SessionState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Redirecting to log in page.");
            return get_redirect(endpoints::LOG_IN_VIEW);
        }
    };

    let session = match load(&jar) {
        Some(session) => session,
        None => {
            tracing::debug!("No session for {}, redirecting to log in page.", parts.uri);
            return get_redirect(endpoints::LOG_IN_VIEW);
        }
    };

    parts.extensions.insert(session);
    next.run(Request::from_parts(parts, body)).await
}

/// Middleware function that checks for a session cookie.
///
/// The session is placed into the request and the request is executed normally
/// if the cookie holds a session, otherwise a redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(session): Extension<Session>` to receive the session.
pub async fn session_guard(
    State(state): State<SessionState>,
    request: Request,
    next: Next,
) -> Response {
    session_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Same as [session_guard], but redirects with the `HX-Redirect` header so
/// that requests made by htmx navigate the whole page.
pub async fn session_guard_hx(
    State(state): State<SessionState>,
    request: Request,
    next: Next,
) -> Response {
    session_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}

#[cfg(test)]
mod session_guard_tests {
    use axum::{
        Extension, Router, middleware,
        routing::{get, post},
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use axum_test::TestServer;
    use sha2::{Digest, Sha512};

    use crate::{
        api::{Session, UserId},
        endpoints,
        session::{SESSION_COOKIE, SessionState, save, session_guard, session_guard_hx},
    };

    const TEST_LOG_IN_ROUTE: &str = "/test/log_in";
    const TEST_PROTECTED_ROUTE: &str = "/protected";
    const TEST_API_ROUTE: &str = "/api/protected";

    async fn stub_log_in_route(jar: PrivateCookieJar) -> PrivateCookieJar {
        save(
            jar,
            &Session {
                user_id: UserId::new(3),
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
            },
            false,
        )
        .unwrap()
    }

    async fn echo_name(Extension(session): Extension<Session>) -> String {
        session.name
    }

    fn get_test_server() -> TestServer {
        let state = SessionState {
            cookie_key: Key::from(&Sha512::digest("nafstenoas")),
        };

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(echo_name))
            .route_layer(middleware::from_fn_with_state(state.clone(), session_guard))
            .merge(
                Router::new()
                    .route(TEST_API_ROUTE, post(echo_name))
                    .route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        session_guard_hx,
                    )),
            )
            .route(TEST_LOG_IN_ROUTE, post(stub_log_in_route))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn redirects_to_log_in_without_session() {
        let server = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn hx_redirects_to_log_in_without_session() {
        let server = get_test_server();

        let response = server.post(TEST_API_ROUTE).await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn passes_session_to_handler() {
        let server = get_test_server();
        let response = server.post(TEST_LOG_IN_ROUTE).await;
        response.assert_status_ok();
        let session_cookie = response.cookie(SESSION_COOKIE);

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(session_cookie)
            .await;

        response.assert_status_ok();
        response.assert_text("Ada");
    }

    #[tokio::test]
    async fn forged_session_cookie_redirects_to_log_in() {
        let server = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(axum_extra::extract::cookie::Cookie::new(
                SESSION_COOKIE,
                r#"{"userId":1,"name":"Mallory","email":"m@example.com"}"#,
            ))
            .await;

        response.assert_status_see_other();
    }
}
