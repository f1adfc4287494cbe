use axum::{
    Router,
    extract::Request,
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod anime;
pub mod auth;
mod error;
mod observability;
pub mod policy;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use observability::{REQUEST_ID_HEADER, RequestId};
pub use policy::{Access, AuthorizationPolicy};
pub use types::*;

use crate::services::{AnimeService, UserService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub policy: Arc<AuthorizationPolicy>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn anime_service(&self) -> &Arc<dyn AnimeService> {
        &self.shared.anime_service
    }

    #[must_use]
    pub fn user_service(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let policy = AuthorizationPolicy::for_anime_api(&shared.config.server.public_paths);

    Arc::new(AppState {
        shared,
        policy: Arc::new(policy),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(cors::Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/anime", get(anime::list_anime).post(anime::create_anime))
        .route("/anime/batch", post(anime::create_anime_batch))
        .route(
            "/anime/{id}",
            get(anime::get_anime)
                .put(anime::update_anime)
                .delete(anime::delete_anime),
        )
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .fallback(no_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::security_filter,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::format_errors,
        ))
        .layer(cors_layer.allow_methods(cors::Any).allow_headers(cors::Any))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn no_handler(request: Request) -> ApiError {
    ApiError::NotFound(format!(
        "No handler found for {} {}",
        request.method(),
        request.uri().path()
    ))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = detail, "Handler panicked");
    ApiError::internal(format!("Handler panicked: {detail}")).into_response()
}
