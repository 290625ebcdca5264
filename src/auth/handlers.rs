//! This file defines the routes for displaying the log-in page and handling
//! log-in and registration requests.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState,
    api::{ApiClient, ApiError},
    auth::form::{AuthMode, AuthQuery, FormMessage, FormValues, auth_form},
    endpoints,
    html::base,
    session,
};

/// Shown when the backend could not be reached or answered with something unexpected.
pub const GENERIC_ERROR_MSG: &str = "An error occurred. Please try again.";
/// Shown in the log-in form after a successful registration.
pub const REGISTRATION_SUCCESS_MSG: &str = "Registration successful! Please log in.";

/// The state needed to log in and register.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    pub api: ApiClient,
    /// Whether the session cookie is restricted to HTTPS.
    pub secure_cookies: bool,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            api: state.api.clone(),
            secure_cookies: state.secure_cookies,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// The data entered by the user in the log-in form.
#[derive(Clone, Deserialize)]
pub struct LogInData {
    pub email: String,
    pub password: String,
}

/// The data entered by the user in the registration form.
#[derive(Clone, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Display the log-in page, or the registration page for `?mode=register`.
pub async fn get_log_in_page(Query(query): Query<AuthQuery>) -> Response {
    let mode = AuthMode::from_query(query.mode.as_deref());
    let content = auth_form(mode, FormValues::default(), None);

    base(
        match mode {
            AuthMode::LogIn => "Log In",
            AuthMode::Register => "Register",
        },
        &[],
        &content,
    )
    .into_response()
}

/// The message to show in the form for a failed call to the backend.
fn failure_message(error: ApiError) -> FormMessage {
    match error {
        ApiError::Rejected(message) => FormMessage::Error(message),
        error => {
            tracing::error!("Unhandled error from the finance API: {error}");
            FormMessage::Error(GENERIC_ERROR_MSG.to_owned())
        }
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in the session cookie is set and the client is
/// redirected to the dashboard page. Otherwise, the form is returned with an
/// error message explaining the problem.
pub async fn post_log_in(
    State(state): State<AuthState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let values = FormValues {
        name: "",
        email: &user_data.email,
    };

    let session = match state.api.login(&user_data.email, &user_data.password).await {
        Ok(session) => session,
        Err(error) => {
            return auth_form(AuthMode::LogIn, values, Some(&failure_message(error)))
                .into_response();
        }
    };

    tracing::info!("User {} logged in", session.user_id);

    match session::save(jar, &session, state.secure_cookies) {
        Ok(jar) => (
            StatusCode::OK,
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
                .into_response()
        }
    }
}

/// Handler for registration requests via the POST method.
///
/// A successful registration shows the log-in form with a confirmation
/// message, otherwise the registration form is returned with an error message.
pub async fn post_register(
    State(state): State<AuthState>,
    Form(user_data): Form<RegisterData>,
) -> Response {
    match state
        .api
        .register(&user_data.name, &user_data.email, &user_data.password)
        .await
    {
        Ok(registration) => {
            tracing::info!("Registered user {}", registration.user_id);
            auth_form(
                AuthMode::LogIn,
                FormValues {
                    name: "",
                    email: &user_data.email,
                },
                Some(&FormMessage::Success(REGISTRATION_SUCCESS_MSG.to_owned())),
            )
            .into_response()
        }
        Err(error) => auth_form(
            AuthMode::Register,
            FormValues {
                name: &user_data.name,
                email: &user_data.email,
            },
            Some(&failure_message(error)),
        )
        .into_response(),
    }
}
