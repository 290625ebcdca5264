//! A thin client for the finance REST backend.
//!
//! Each backend operation is one JSON HTTP request. Every operation returns a
//! [Result] so that callers can pattern match on failures instead of
//! inspecting the shape of the response body.

use axum::http::{Method, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::api::models::{
    Acknowledgement, Budget, BudgetId, ExpensesByCategory, LogInRequest, NewBudget,
    NewTransaction, RegisterRequest, Registration, Session, Transaction, TransactionId, UserId,
};

const USER_AGENT: &str = concat!("finance_tracker/", env!("CARGO_PKG_VERSION"));

/// The ways a call to the backend can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("could not reach the finance API: {0}")]
    Transport(String),

    /// The request body could not be encoded as JSON, so nothing was sent.
    #[error("could not encode the request for the finance API: {0}")]
    InvalidRequest(String),

    /// The response body was not JSON, or not the JSON that was expected.
    #[error("the finance API sent an unexpected response: {0}")]
    InvalidResponse(String),

    /// The backend answered with an error message meant for the user.
    #[error("{0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport(error.to_string())
    }
}

/// Issues requests against a fixed base URL, e.g. "http://localhost:8080/api".
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend served at `base_url`.
    ///
    /// # Errors
    /// Returns [ApiError::Transport] if the underlying HTTP client cannot be
    /// initialised.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL that relative paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    ///
    /// Paths are appended rather than joined so that a base URL with a path
    /// component, such as "/api", is kept.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Log in with an email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.request(
            Method::POST,
            "/auth/login",
            Some(&LogInRequest { email, password }),
        )
        .await
    }

    /// Create a new user account.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, ApiError> {
        self.request(
            Method::POST,
            "/auth/register",
            Some(&RegisterRequest {
                name,
                email,
                password,
            }),
        )
        .await
    }

    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        self.request(Method::POST, "/transactions", Some(transaction))
            .await
    }

    /// Get all of a user's transactions, most recent first.
    pub async fn get_user_transactions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.request(
            Method::GET,
            &format!("/transactions/user/{user_id}"),
            None::<&()>,
        )
        .await
    }

    /// Get the total amount a user has spent in each category.
    pub async fn get_expenses_by_category(
        &self,
        user_id: UserId,
    ) -> Result<ExpensesByCategory, ApiError> {
        self.request(
            Method::GET,
            &format!("/transactions/user/{user_id}/expenses-by-category"),
            None::<&()>,
        )
        .await
    }

    pub async fn delete_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Acknowledgement, ApiError> {
        self.request(
            Method::DELETE,
            &format!("/transactions/{transaction_id}"),
            None::<&()>,
        )
        .await
    }

    pub async fn create_budget(&self, budget: &NewBudget) -> Result<Budget, ApiError> {
        self.request(Method::POST, "/budgets", Some(budget)).await
    }

    /// Get a user's budgets for one month of one year.
    pub async fn get_user_budgets(
        &self,
        user_id: UserId,
        month: u8,
        year: i32,
    ) -> Result<Vec<Budget>, ApiError> {
        self.request(
            Method::GET,
            &format!("/budgets/user/{user_id}?month={month}&year={year}"),
            None::<&()>,
        )
        .await
    }

    pub async fn delete_budget(&self, budget_id: BudgetId) -> Result<Acknowledgement, ApiError> {
        self.request(
            Method::DELETE,
            &format!("/budgets/{budget_id}"),
            None::<&()>,
        )
        .await
    }

    /// Send one JSON request and decode the JSON response.
    ///
    /// A response object with a string `error` field is turned into
    /// [ApiError::Rejected], whatever the HTTP status code.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!("{method} {url}");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            let body = serde_json::to_vec(body).map_err(|error| {
                tracing::error!("could not serialize the body for {method} {url}: {error}");
                ApiError::InvalidRequest(error.to_string())
            })?;
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .inspect_err(|error| tracing::error!("{method} {url} failed: {error}"))?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|error| {
            tracing::error!("{method} {url} returned {status} with a non-JSON body: {error}");
            ApiError::InvalidResponse(error.to_string())
        })?;

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            tracing::info!("{method} {url} was rejected with {status}: {message}");
            return Err(ApiError::Rejected(message.to_owned()));
        }

        serde_json::from_value(value).map_err(|error| {
            tracing::error!("{method} {url} returned {status} with an unexpected body: {error}");
            ApiError::InvalidResponse(error.to_string())
        })
    }
}
