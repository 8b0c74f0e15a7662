use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::{HttpConfig, OpenDataClient};
use crate::config::Config;
use crate::services::{OpenDataStatsService, StatsService};

mod competitions;
mod error;
mod events;
mod leaders;
mod observability;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub stats: Arc<dyn StatsService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: Config,
        stats: Arc<dyn StatsService>,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config,
            stats,
            prometheus_handle,
        }
    }
}

/// Builds the state served by [`router`] with the open-data client as source.
pub fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let source = OpenDataClient::new(
        HttpConfig::from(&config.upstream),
        config.upstream.fetch_concurrency,
    )
    .map_err(|e| anyhow::anyhow!("Failed to build upstream client: {e}"))?;

    let stats = Arc::new(OpenDataStatsService::new(
        Arc::new(source),
        config.upstream.fetch_concurrency,
    ));

    Ok(Arc::new(AppState::new(config, stats, prometheus_handle)))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/competitions", get(competitions::list_competitions))
        .route("/matches", get(competitions::list_matches))
        .route("/players", get(competitions::list_players))
        .route("/top_scorers", get(leaders::top_scorers))
        .route("/top_assists", get(leaders::top_assists))
        .route("/match_events", get(events::list_match_events))
        .route("/health", get(system::health));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .fallback(system::fallback)
        .with_state(state)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(
            cors_layer
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_credentials(false),
        )
        .layer(TraceLayer::new_for_http())
}
