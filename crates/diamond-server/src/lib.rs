// Read-only REST facade over an ingested league dataset.

use std::sync::Arc;

use axum::Router;
use diamond_core::config::LeadersConfig;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod dataset;

use dataset::Dataset;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    /// Top-N sizes for the leader endpoints.
    pub leaders: LeadersConfig,
}

impl AppState {
    pub fn new(dataset: Dataset, leaders: LeadersConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            leaders,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::player_routes())
        .merge(api::game_routes())
        .merge(api::stats_routes())
        .merge(api::team_routes())
        .fallback(api::route_not_found)
        .layer(CatchPanicLayer::custom(api::panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
