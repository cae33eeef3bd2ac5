//! Inventory of the software subscriptions a company pays for, with cost
//! reports over the active ones.
//!
//! The HTTP surface lives in [`routes`]; [`build_app`] assembles it into a
//! router with the standard middleware stack.

pub mod analytics;
pub mod config;
pub mod db;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod openapi;
pub mod routes;
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::Router;
#[cfg(feature = "utoipa")]
use axum::{Json, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
#[cfg(feature = "utoipa")]
use utoipa::OpenApi;
#[cfg(feature = "utoipa")]
use utoipa_scalar::{Scalar, Servable};

use crate::{
    config::ServiceConfig,
    db::{DbError, DbPool},
    services::Services,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub db: Option<Arc<DbPool>>,
    /// Present exactly when `db` is.
    pub services: Option<Services>,
}

impl AppState {
    /// Connect to the configured database, if any.
    ///
    /// A config without a `[database]` section yields a state whose tools and
    /// analytics endpoints answer 503.
    pub async fn new(config: ServiceConfig) -> Result<Self, DbError> {
        if config.database.is_none() {
            tracing::warn!("No database configured, tools and analytics endpoints are disabled");
            return Ok(Self {
                config: Arc::new(config),
                db: None,
                services: None,
            });
        }

        let db = Arc::new(DbPool::from_config(&config.database).await?);
        tracing::info!("Database connection established");
        Ok(Self::with_db(config, db))
    }

    /// Build a state around an existing pool.
    pub fn with_db(config: ServiceConfig, db: Arc<DbPool>) -> Self {
        Self {
            config: Arc::new(config),
            services: Some(Services::new(Arc::clone(&db))),
            db: Some(db),
        }
    }
}

#[cfg(feature = "utoipa")]
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::ApiDoc::openapi())
}

/// Assemble the full router: health probes at the root, the API under `/api`.
pub fn build_app(config: &ServiceConfig, state: AppState) -> Router {
    let mut app = Router::new().merge(routes::health_routes());

    #[cfg(feature = "utoipa")]
    {
        app = app
            .route("/openapi.json", get(openapi_json))
            .merge(Scalar::with_url("/api/docs", openapi::ApiDoc::openapi()));
    }

    app = app.nest("/api", routes::api_routes());

    if let Some(cors) = config.server.cors.clone().into_layer() {
        app = app.layer(cors);
    }

    app.layer(TimeoutLayer::new(Duration::from_secs(
        config.server.timeout_secs,
    )))
    .layer(axum::middleware::from_fn(middleware::request_id_middleware))
    .layer(TraceLayer::new_for_http())
    .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes))
    .with_state(state)
}
