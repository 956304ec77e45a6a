use common::errors::QueryError;
use common::models::{ActivityScore, City, DailyWeather};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::api_client::WeatherProvider;
use crate::complexity::{self, QueryShape};
use crate::scoring::rank_activities;

/// Entry point for the three queries: prices the request, calls the
/// provider and turns every failure into a [`QueryError`].
pub struct Orchestrator<P> {
    provider: Arc<P>,
    max_complexity: u64,
}

impl<P: WeatherProvider + 'static> Orchestrator<P> {
    pub fn new(provider: Arc<P>, max_complexity: u64) -> Self {
        Self {
            provider,
            max_complexity,
        }
    }

    fn check_complexity(&self, shape: QueryShape) -> Result<(), QueryError> {
        match complexity::check(shape, self.max_complexity) {
            Ok(cost) => {
                info!(cost, "Query complexity accepted");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Query rejected");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn city_suggestions(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<City>, QueryError> {
        self.check_complexity(QueryShape::CitySuggestions { limit, offset })?;

        let cities = self
            .provider
            .search_cities(query, limit.saturating_add(offset))
            .await
            .map_err(|e| {
                error!(error = %e, "City search failed");
                QueryError::search_failed(e)
            })?;

        if cities.is_empty() {
            return Err(QueryError::not_found("no cities found for the given query"));
        }

        let page = paginate(&cities, offset, limit);
        info!(total = cities.len(), returned = page.len(), "City suggestions resolved");

        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn weather_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Vec<DailyWeather>, QueryError> {
        self.check_complexity(QueryShape::WeatherForecast { days })?;

        let forecast = self
            .provider
            .get_weather_forecast(latitude, longitude, days)
            .await
            .map_err(|e| {
                error!(error = %e, "Forecast fetch failed");
                QueryError::forecast_failed(e)
            })?;

        if forecast.is_empty() {
            return Err(QueryError::no_forecast("no weather forecast available"));
        }

        Ok(forecast)
    }

    #[instrument(skip(self))]
    pub async fn activity_ranking(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Vec<ActivityScore>, QueryError> {
        self.check_complexity(QueryShape::ActivityRanking { days })?;

        let forecast = self
            .provider
            .get_weather_forecast(latitude, longitude, days)
            .await
            .map_err(|e| {
                error!(error = %e, "Forecast fetch for ranking failed");
                QueryError::ranking_failed(e)
            })?;

        if forecast.is_empty() {
            return Err(QueryError::no_forecast(
                "no weather forecast available for ranking",
            ));
        }

        // A panic inside scoring comes back as a JoinError
        let ranking = tokio::task::spawn_blocking(move || rank_activities(&forecast))
            .await
            .map_err(|e| {
                error!(error = %e, "Scoring task failed");
                QueryError::ranking_failed(e)
            })?;

        if let Some(best) = ranking.first() {
            info!(best = ?best.activity, score = best.score, "Activities ranked");
        }

        Ok(ranking)
    }
}

/// Clamped `[offset, offset + limit)` window.
fn paginate<T: Clone>(items: &[T], offset: u32, limit: u32) -> Vec<T> {
    let start = (offset as usize).min(items.len());
    let end = start.saturating_add(limit as usize).min(items.len());
    items[start..end].to_vec()
}
