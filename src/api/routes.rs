//! API route definitions

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use super::middleware::{buffer_request_body, HttpLoggingLayer};
use super::server::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (not logged)
        .route("/health", get(handlers::health::health_check))
        .merge(order_routes(&state))
        .with_state(state)
}

/// Routes tagged for HTTP exchange logging
fn order_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/orders", post(handlers::orders::create_order))
        .route("/orders/:id", get(handlers::orders::get_order));

    match state.interceptors.http() {
        // The buffering middleware is added last so it runs first.
        Some(interceptor) => routes
            .route_layer(HttpLoggingLayer::new(interceptor.clone()))
            .route_layer(middleware::from_fn_with_state(
                interceptor.body_limit(),
                buffer_request_body,
            )),
        None => routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::store::OrderStore;
    use crate::config::LoggingConfig;
    use crate::interceptor::{Interceptors, CALL_TARGET, HTTP_TARGET, TIMED_TARGET};
    use crate::models::{LogLevel, Settings};
    use crate::test_support::capture;
    use axum::body::Body;
    use axum::extract::Request;
    use axum::http::{header, Method, StatusCode};
    use std::time::Instant;
    use tower::ServiceExt;

    fn state(method: Settings, http: Settings) -> AppState {
        AppState {
            interceptors: Interceptors::new(method, http),
            orders: OrderStore::new(),
            started_at: Instant::now(),
        }
    }

    fn post_order(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_order_logs_every_family() {
        let (captured, _guard) = capture();
        let app = create_router(state(Settings::default(), Settings::default()));

        let response = app.oneshot(post_order(r#"{"id":7}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/orders/7");

        let events = captured.events();
        let targets: Vec<&str> = events
            .iter()
            .filter(|e| e.target.starts_with("log_interceptors::") && !e.target.contains("::api"))
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(
            targets,
            vec![
                HTTP_TARGET,
                CALL_TARGET,
                CALL_TARGET,
                TIMED_TARGET,
                TIMED_TARGET,
                HTTP_TARGET
            ]
        );

        let messages = captured.messages();
        assert!(messages.contains(&"Before: method invoked - compute_total()".to_string()));
        assert!(messages.contains(
            &"AfterReturning: method completed successfully. Result: 0".to_string()
        ));
        assert!(messages.contains(&"Calling method: save_order()".to_string()));
        assert!(messages
            .last()
            .unwrap()
            .contains(r#"Response body: {"status":"ok"}"#));
    }

    #[tokio::test]
    async fn test_missing_order_logs_failure_and_returns_404() {
        let (captured, _guard) = capture();
        let app = create_router(state(Settings::default(), Settings::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/orders/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let failure = captured
            .events()
            .into_iter()
            .find(|e| e.message.starts_with("AfterThrowing"))
            .unwrap();
        assert_eq!(failure.level, tracing::Level::ERROR);
        assert_eq!(
            failure.message,
            "AfterThrowing: method threw exception - Not found: Order with id 42 not found"
        );
        assert!(captured
            .messages()
            .last()
            .unwrap()
            .starts_with("\n= HTTP response =\nStatus: 404\n"));
    }

    #[tokio::test]
    async fn test_disabled_families_only_run_handlers() {
        let (captured, _guard) = capture();
        let disabled = Settings::new(false, LogLevel::Info, LogLevel::Info);
        let app = create_router(state(disabled, disabled));

        let response = app.oneshot(post_order(r#"{"id":9}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(captured
            .events()
            .iter()
            .all(|e| !e.target.starts_with("log_interceptors::call")
                && !e.target.starts_with("log_interceptors::timed")
                && !e.target.starts_with("log_interceptors::http")));
    }

    #[tokio::test]
    async fn test_health_is_not_tagged() {
        let (captured, _guard) = capture();
        let app = create_router(state(Settings::default(), Settings::default()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(captured.events().iter().all(|e| e.target != HTTP_TARGET));
    }

    #[tokio::test]
    async fn test_oversized_order_is_not_printed() {
        let (captured, _guard) = capture();
        let mut state = state(Settings::default(), Settings::default());
        state.interceptors = Interceptors::from_config(&LoggingConfig {
            http_body_limit: 64,
            ..LoggingConfig::default()
        });
        let app = create_router(state);
        let payload = format!(r#"{{"id":11,"items":[],"note":"{}"}}"#, "x".repeat(4096));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/orders")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let request_block = captured
            .messages()
            .into_iter()
            .find(|m| m.starts_with("\n= HTTP request ="))
            .unwrap();
        assert!(request_block.ends_with("Could not log request body\n"));
        assert!(request_block.len() < 512);
    }
}
