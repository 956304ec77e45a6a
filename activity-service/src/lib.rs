pub mod api_client;
pub mod cache;
pub mod complexity;
pub mod config;
pub mod handlers;
pub mod openapi;
pub mod orchestrator;
pub mod scoring;

use axum::{Router, routing::get};
use common::errors::FetchError;
use common::http_client::HttpClient;
use common::retry::RetryPolicy;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api_client::OpenMeteoClient;
use crate::cache::ProviderCache;
use crate::config::Config;
use crate::handlers::AppState;
use crate::orchestrator::Orchestrator;

/// Wire the cache, provider client and orchestrator from configuration.
pub fn build_state(config: &Config) -> Result<AppState, FetchError> {
    let cache = Arc::new(ProviderCache::new(
        config.cache_max_entries,
        config.cache_ttl(),
    ));
    let http_client = HttpClient::new(
        config.http_timeout(),
        config.request_deadline(),
        config.max_concurrent_requests,
    )?;
    let api_client = Arc::new(OpenMeteoClient::new(
        http_client,
        cache,
        config.geocoding_api_url.clone(),
        config.forecast_api_url.clone(),
        RetryPolicy::on_rate_limit(config.rate_limit_max_attempts, config.rate_limit_backoff()),
    ));

    Ok(AppState {
        orchestrator: Arc::new(Orchestrator::new(api_client, config.max_query_complexity)),
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/cities", get(handlers::city_suggestions))
        .route("/api/weather", get(handlers::weather_forecast))
        .route("/api/activities", get(handlers::activity_ranking))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
