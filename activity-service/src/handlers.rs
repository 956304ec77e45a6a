use axum::{
    extract::{Query, State},
    response::Json,
};
use common::errors::QueryError;
use common::models::{ActivityScore, City, DailyWeather};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::api_client::OpenMeteoClient;
use crate::orchestrator::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator<OpenMeteoClient>>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "activity-service" }))
}

fn default_limit() -> u32 {
    10
}

fn default_days() -> u32 {
    7
}

#[derive(Deserialize)]
pub struct CityQuery {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Deserialize)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_days")]
    pub days: u32,
}

#[utoipa::path(
    get,
    path = "/api/cities",
    params(
        ("query" = String, Query, description = "City name to search for"),
        ("limit" = Option<u32>, Query, description = "Page size (default 10)"),
        ("offset" = Option<u32>, Query, description = "Matches to skip (default 0)")
    ),
    responses(
        (status = 200, description = "Matching cities in provider order", body = [City]),
        (status = 400, description = "Query too complex", body = common::errors::ErrorResponse),
        (status = 404, description = "No cities found", body = common::errors::ErrorResponse),
        (status = 502, description = "Provider failure", body = common::errors::ErrorResponse)
    ),
    tag = "cities"
)]
pub async fn city_suggestions(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Result<Json<Vec<City>>, QueryError> {
    info!(query = %params.query, limit = params.limit, offset = params.offset, "City suggestions request received");

    let cities = state
        .orchestrator
        .city_suggestions(&params.query, params.limit, params.offset)
        .await?;

    Ok(Json(cities))
}

#[utoipa::path(
    get,
    path = "/api/weather",
    params(
        ("latitude" = f64, Query, description = "Latitude in degrees"),
        ("longitude" = f64, Query, description = "Longitude in degrees"),
        ("days" = Option<u32>, Query, description = "Forecast days (default 7)")
    ),
    responses(
        (status = 200, description = "Daily forecast in chronological order", body = [DailyWeather]),
        (status = 400, description = "Query too complex", body = common::errors::ErrorResponse),
        (status = 404, description = "No forecast available", body = common::errors::ErrorResponse),
        (status = 502, description = "Provider failure", body = common::errors::ErrorResponse)
    ),
    tag = "weather"
)]
pub async fn weather_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<Vec<DailyWeather>>, QueryError> {
    info!(latitude = params.latitude, longitude = params.longitude, days = params.days, "Forecast request received");

    let forecast = state
        .orchestrator
        .weather_forecast(params.latitude, params.longitude, params.days)
        .await?;

    Ok(Json(forecast))
}

#[utoipa::path(
    get,
    path = "/api/activities",
    params(
        ("latitude" = f64, Query, description = "Latitude in degrees"),
        ("longitude" = f64, Query, description = "Longitude in degrees"),
        ("days" = Option<u32>, Query, description = "Forecast days to aggregate (default 7)")
    ),
    responses(
        (status = 200, description = "Activities ranked best first", body = [ActivityScore]),
        (status = 400, description = "Query too complex", body = common::errors::ErrorResponse),
        (status = 404, description = "No forecast available", body = common::errors::ErrorResponse),
        (status = 502, description = "Provider failure", body = common::errors::ErrorResponse)
    ),
    tag = "activities"
)]
pub async fn activity_ranking(
    State(state): State<AppState>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<Vec<ActivityScore>>, QueryError> {
    info!(latitude = params.latitude, longitude = params.longitude, days = params.days, "Activity ranking request received");

    let ranking = state
        .orchestrator
        .activity_ranking(params.latitude, params.longitude, params.days)
        .await?;

    Ok(Json(ranking))
}
