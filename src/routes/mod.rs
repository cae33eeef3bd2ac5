pub mod analytics;
pub mod error;
pub mod extract;
pub mod health;
pub mod tools;

use axum::{Router, routing::get};

use crate::{AppState, services::Services};
use error::ApiError;

/// Health endpoints, mounted at the root.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
}

/// Tools and analytics endpoints, nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/tools", get(tools::list_tools).post(tools::create_tool))
        .route(
            "/tools/{id}",
            get(tools::get_tool)
                .put(tools::update_tool)
                .delete(tools::delete_tool),
        )
        .route("/analytics/department-costs", get(analytics::department_costs))
        .route("/analytics/expensive-tools", get(analytics::expensive_tools))
        .route("/analytics/tools-by-category", get(analytics::tools_by_category))
        .route("/analytics/low-usage-tools", get(analytics::low_usage_tools))
        .route("/analytics/vendor-summary", get(analytics::vendor_summary))
}

fn get_services(state: &AppState) -> Result<&Services, ApiError> {
    state.services.as_ref().ok_or(ApiError::DatabaseRequired)
}

/// Router fixtures shared by the handler tests.
#[cfg(all(test, feature = "database-sqlite"))]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{Router, body::Body};
    use http::{Request, StatusCode, header::CONTENT_TYPE};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        AppState, build_app,
        config::ServiceConfig,
        db::{
            DbPool,
            tests::harness::{create_sqlite_pool, create_sqlite_schema},
        },
    };

    /// App backed by a fresh in-memory SQLite store with seeded categories.
    pub async fn test_app() -> Router {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let pool = create_sqlite_pool().await;
        create_sqlite_schema(&pool).await;

        let config = ServiceConfig::default();
        let state = AppState::with_db(config.clone(), Arc::new(DbPool::from_sqlite(pool)));
        build_app(&config, state)
    }

    /// App started without a `[database]` section.
    pub async fn test_app_no_db() -> Router {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let config = ServiceConfig::default();
        let state = AppState::new(config.clone())
            .await
            .expect("Failed to create AppState");
        build_app(&config, state)
    }

    /// GET `uri` and parse the body as JSON (`Null` when empty).
    pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send_json(app, "GET", uri, Value::Null).await
    }

    /// Send a request with a JSON body (none when `body` is `Null`).
    pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = if body.is_null() {
            builder.body(Body::empty()).unwrap()
        } else {
            builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap()
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
