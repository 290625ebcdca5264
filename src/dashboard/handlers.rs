//! Dashboard HTTP handlers.
//!
//! The dashboard page is served in two steps: the page itself only holds a
//! loading placeholder, which htmx replaces with the content once the data
//! has been fetched from the backend.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::PreEscaped;
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::{ApiClient, Session},
    dashboard::{
        loader::{BudgetPeriod, load_dashboard_data},
        stats::derive_stats,
        views::{
            TAB_SCRIPT, Tab, content_url, dashboard_loading_view, dashboard_ready_view,
            dashboard_shell,
        },
    },
    html::{HeadElement, base},
    timezone::get_local_offset,
};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub api: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string of the dashboard, e.g. "?tab=budgets".
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

/// Display the dashboard page in its loading state.
pub async fn get_dashboard_page(
    Extension(session): Extension<Session>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let tab = Tab::from_query(query.tab.as_deref());
    let content = dashboard_shell(&session.name, dashboard_loading_view(&content_url(tab)));

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        HeadElement::ScriptSource(PreEscaped(TAB_SCRIPT.to_owned())),
    ];

    base("Dashboard", &scripts, &content).into_response()
}

/// Load the user's data and render the dashboard content.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    Extension(session): Extension<Session>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let tab = Tab::from_query(query.tab.as_deref());
    let period = BudgetPeriod::current(local_offset);
    let data = load_dashboard_data(&state.api, session.user_id, period).await;
    let stats = derive_stats(&data.transactions);

    dashboard_ready_view(&data, &stats, period, tab).into_response()
}

#[cfg(test)]
mod dashboard_handler_tests {
    use axum::{
        Extension, Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::{Html, Selector};
    use serde_json::json;

    use crate::{
        endpoints,
        test_utils::{
            assert_valid_html, parse_html_document, parse_html_fragment, spawn_stub_api,
            test_session,
        },
    };

    use super::{DashboardQuery, DashboardState, get_dashboard_content, get_dashboard_page};

    fn query(tab: &str) -> Query<DashboardQuery> {
        Query(DashboardQuery {
            tab: Some(tab.to_owned()),
        })
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/transactions/user/{user_id}",
                get(|Path(user_id): Path<i64>| async move {
                    assert_eq!(user_id, 7);
                    Json(json!([
                        { "id": 1, "description": "Pay", "amount": 1000.0, "type": "INCOME", "category": "Salary", "transactionDate": "2025-03-01T09:00:00" },
                        { "id": 2, "description": "Groceries", "amount": 120.0, "type": "EXPENSE", "category": "Food & Dining", "transactionDate": "2025-03-02T09:00:00" }
                    ]))
                }),
            )
            .route(
                "/transactions/user/{user_id}/expenses-by-category",
                get(|| async { Json(json!({ "Food & Dining": 120.0 })) }),
            )
            .route(
                "/budgets/user/{user_id}",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
            )
    }

    #[tokio::test]
    async fn page_shows_loading_placeholder_for_requested_tab() {
        let response = get_dashboard_page(Extension(test_session()), query("budgets")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let placeholder = html
            .select(&Selector::parse("#dashboard-content").unwrap())
            .next()
            .expect("No dashboard placeholder found");
        assert_eq!(
            placeholder.value().attr("hx-get"),
            Some(format!("{}?tab=budgets", endpoints::DASHBOARD_CONTENT).as_str())
        );
        assert_eq!(placeholder.value().attr("hx-trigger"), Some("load"));
        assert!(html.html().contains("Welcome back, Ada!"));
    }

    #[tokio::test]
    async fn page_falls_back_to_overview_for_unknown_tab() {
        let response = get_dashboard_page(Extension(test_session()), query("secrets")).await;

        let html = parse_html_document(response).await;
        let placeholder = html
            .select(&Selector::parse("#dashboard-content").unwrap())
            .next()
            .unwrap();
        assert_eq!(
            placeholder.value().attr("hx-get"),
            Some("/dashboard/content?tab=overview")
        );
    }

    #[tokio::test]
    async fn content_renders_stats_even_when_a_fetch_fails() {
        let state = DashboardState {
            api: spawn_stub_api(backend()).await,
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response =
            get_dashboard_content(State(state), Extension(test_session()), query("overview"))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html: Html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let values: Vec<String> = html
            .select(&Selector::parse(".stat-value").unwrap())
            .map(|value| value.text().collect())
            .collect();
        assert_eq!(values, ["$880.00", "$1,000.00", "$120.00", "2"]);
        assert!(html.html().contains("No budgets"));
        assert!(
            html.select(&Selector::parse("#expenses-chart").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn content_with_invalid_timezone_renders_alert() {
        let state = DashboardState {
            api: spawn_stub_api(backend()).await,
            local_timezone: "Middle/Earth".to_owned(),
        };

        let response =
            get_dashboard_content(State(state), Extension(test_session()), query("overview"))
                .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
