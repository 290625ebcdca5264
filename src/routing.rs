//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    AppState,
    auth::{get_log_in_page, post_log_in, post_register},
    budget::{create_budget_endpoint, delete_budget_endpoint, get_new_budget_modal},
    dashboard::{get_dashboard_content, get_dashboard_page},
    endpoints,
    import::{get_import_modal, import_transactions_endpoint},
    internal_server_error::get_internal_server_error_page,
    log_out::get_log_out,
    not_found::get_404_not_found,
    session::{self, session_guard, session_guard_hx},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_new_transaction_modal,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::REGISTER_API, post(post_register))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), session_guard));

    // These routes are called by htmx, so they need the HX-Redirect header for
    // the redirect to the log-in page to navigate the whole page.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
            .route(endpoints::TRANSACTION_MODAL, get(get_new_transaction_modal))
            .route(endpoints::BUDGET_MODAL, get(get_new_budget_modal))
            .route(endpoints::IMPORT_MODAL, get(get_import_modal))
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(
                endpoints::DELETE_TRANSACTION,
                delete(delete_transaction_endpoint),
            )
            .route(endpoints::BUDGETS_API, post(create_budget_endpoint))
            .route(endpoints::DELETE_BUDGET, delete(delete_budget_endpoint))
            .route(endpoints::IMPORT_API, post(import_transactions_endpoint))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                session_guard_hx,
            )),
    );

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard if the user is logged in,
/// otherwise to the log-in page.
async fn get_index_page(jar: PrivateCookieJar) -> Redirect {
    match session::load(&jar) {
        Some(_) => Redirect::to(endpoints::DASHBOARD_VIEW),
        None => Redirect::to(endpoints::LOG_IN_VIEW),
    }
}

#[cfg(test)]
mod router_tests {
    use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        build_router, endpoints,
        test_utils::{session_cookie, test_app_state, test_session},
    };

    fn backend() -> Router {
        Router::new()
            .route(
                "/transactions/user/{user_id}",
                get(|Path(user_id): Path<i64>| async move {
                    assert_eq!(user_id, 7);
                    Json(json!([{
                        "id": 1,
                        "description": "Salary",
                        "amount": 2500.0,
                        "type": "INCOME",
                        "category": "Salary",
                        "transactionDate": "2025-03-01T09:00:00"
                    }]))
                }),
            )
            .route(
                "/transactions/user/{user_id}/expenses-by-category",
                get(|| async { Json(json!({})) }),
            )
            .route(
                "/budgets/user/{user_id}",
                get(|| async { Json(json!([])) }),
            )
    }

    async fn get_test_server() -> (TestServer, axum_extra::extract::cookie::Cookie<'static>) {
        let state = test_app_state(backend()).await;
        let cookie = session_cookie(&state.cookie_key, &test_session());
        let server = TestServer::new(build_router(state));

        (server, cookie)
    }

    #[tokio::test]
    async fn root_redirects_to_log_in_without_session() {
        let (server, _) = get_test_server().await;

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard_with_session() {
        let (server, cookie) = get_test_server().await;

        let response = server.get(endpoints::ROOT).add_cookie(cookie).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn dashboard_requires_session() {
        let (server, _) = get_test_server().await;

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn htmx_routes_redirect_with_header_without_session() {
        let (server, _) = get_test_server().await;

        let response = server.post(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn htmx_fragments_redirect_with_header_without_session() {
        let (server, _) = get_test_server().await;

        for endpoint in [
            endpoints::DASHBOARD_CONTENT,
            endpoints::TRANSACTION_MODAL,
            endpoints::BUDGET_MODAL,
            endpoints::IMPORT_MODAL,
        ] {
            let response = server.get(endpoint).await;

            response.assert_status_ok();
            assert_eq!(response.header("hx-redirect"), endpoints::LOG_IN_VIEW);
        }

        let response = server.post(endpoints::IMPORT_API).await;
        assert_eq!(response.header("hx-redirect"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn dashboard_content_loads_with_session() {
        let (server, cookie) = get_test_server().await;

        let response = server
            .get(endpoints::DASHBOARD_CONTENT)
            .add_query_param("tab", "transactions")
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("$2,500.00"), "got {text}");
        assert!(text.contains("3/1/2025"), "got {text}");
    }

    #[tokio::test]
    async fn modals_are_served_with_session() {
        let (server, cookie) = get_test_server().await;

        for endpoint in [
            endpoints::TRANSACTION_MODAL,
            endpoints::BUDGET_MODAL,
            endpoints::IMPORT_MODAL,
        ] {
            let response = server.get(endpoint).add_cookie(cookie.clone()).await;

            response.assert_status_ok();
            assert!(response.text().contains("id=\"modal\""));
        }
    }

    #[tokio::test]
    async fn log_in_page_is_public() {
        let (server, _) = get_test_server().await;

        server.get(endpoints::LOG_IN_VIEW).await.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _) = get_test_server().await;

        let response = server.get("/definitely/not/a/page").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
