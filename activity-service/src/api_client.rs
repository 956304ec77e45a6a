use crate::cache::{CachedValue, ProviderCache, cities_key, forecast_key};
use chrono::NaiveDate;
use common::errors::FetchError;
use common::http_client::HttpClient;
use common::models::{City, DailyWeather};
use common::retry::RetryPolicy;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument};

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

/// Data access the orchestrator depends on.
pub trait WeatherProvider: Send + Sync {
    fn search_cities(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<City>, FetchError>> + Send;

    fn get_weather_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> impl Future<Output = Result<Vec<DailyWeather>, FetchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    id: u64,
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    population: Option<u64>,
}

impl From<GeocodingResult> for City {
    fn from(result: GeocodingResult) -> Self {
        City {
            id: result.id.to_string(),
            name: result.name,
            latitude: result.latitude,
            longitude: result.longitude,
            country: result.country,
            population: result.population,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailySeries,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<f64>,
    wind_speed_10m_max: Vec<f64>,
}

impl DailySeries {
    /// Zip the index-aligned arrays into one entry per day.
    fn into_days(self) -> Result<Vec<DailyWeather>, FetchError> {
        let len = self.time.len();
        if [
            self.temperature_2m_max.len(),
            self.temperature_2m_min.len(),
            self.precipitation_sum.len(),
            self.wind_speed_10m_max.len(),
        ]
        .iter()
        .any(|&n| n != len)
        {
            return Err(FetchError::malformed(
                "daily forecast arrays have different lengths",
            ));
        }

        Ok(self
            .time
            .into_iter()
            .zip(self.temperature_2m_max)
            .zip(self.temperature_2m_min)
            .zip(self.precipitation_sum)
            .zip(self.wind_speed_10m_max)
            .map(
                |((((date, temperature_max), temperature_min), precipitation_sum), wind_speed_max)| {
                    DailyWeather {
                        date,
                        temperature_max,
                        temperature_min,
                        precipitation_sum,
                        wind_speed_max,
                    }
                },
            )
            .collect())
    }
}

/// Open-Meteo geocoding and forecast client with caching
pub struct OpenMeteoClient {
    http_client: HttpClient,
    cache: Arc<ProviderCache>,
    geocoding_url: String,
    forecast_url: String,
    forecast_retry: RetryPolicy,
}

impl OpenMeteoClient {
    pub fn new(
        http_client: HttpClient,
        cache: Arc<ProviderCache>,
        geocoding_url: String,
        forecast_url: String,
        forecast_retry: RetryPolicy,
    ) -> Self {
        Self {
            http_client,
            cache,
            geocoding_url: geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
            forecast_retry,
        }
    }
}

impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search_cities(&self, query: &str, limit: u32) -> Result<Vec<City>, FetchError> {
        let key = cities_key(query, limit);

        if let Some(cached) = self.cache.get_cities(&key).await {
            info!(query = %query, "Cache hit");
            return Ok(cached);
        }

        info!(query = %query, limit, "Searching cities via API");

        let url = format!(
            "{}/search?name={}&count={}&language=en",
            self.geocoding_url,
            urlencoding::encode(query.trim()),
            limit
        );

        let response: GeocodingResponse = self
            .http_client
            .get_json(&url, &RetryPolicy::no_retry())
            .await?;
        let cities: Vec<City> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(City::from)
            .collect();

        self.cache.set(key, CachedValue::Cities(cities.clone())).await;

        Ok(cities)
    }

    #[instrument(skip(self))]
    async fn get_weather_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Vec<DailyWeather>, FetchError> {
        let key = forecast_key(latitude, longitude, days);

        if let Some(cached) = self.cache.get_forecast(&key).await {
            info!(latitude, longitude, days, "Cache hit");
            return Ok(cached);
        }

        info!(latitude, longitude, days, "Fetching forecast from API");

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&timezone=auto&forecast_days={}",
            self.forecast_url, latitude, longitude, DAILY_FIELDS, days
        );

        let response: ForecastResponse = self
            .http_client
            .get_json(&url, &self.forecast_retry)
            .await?;
        let forecast = response.daily.into_days()?;

        self.cache
            .set(key, CachedValue::Forecast(forecast.clone()))
            .await;

        Ok(forecast)
    }
}
