use std::env;
use std::str::FromStr;
use std::time::Duration;

pub struct Config {
    pub port: u16,
    pub geocoding_api_url: String,
    pub forecast_api_url: String,
    pub cache_ttl_seconds: u64,
    pub cache_max_entries: u64,
    pub http_timeout_seconds: u64,
    pub request_deadline_seconds: u64,
    pub rate_limit_max_attempts: u32,
    pub rate_limit_backoff_ms: u64,
    pub max_concurrent_requests: usize,
    pub max_query_complexity: u64,
    pub log_format: String,
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parsed_or("PORT", 3002),
            geocoding_api_url: env::var("GEOCODING_API_URL")
                .unwrap_or_else(|_| "https://geocoding-api.open-meteo.com/v1".to_string()),
            forecast_api_url: env::var("FORECAST_API_URL")
                .unwrap_or_else(|_| "https://api.open-meteo.com/v1".to_string()),
            cache_ttl_seconds: parsed_or("CACHE_TTL_SECONDS", 3600), // 1 hour
            cache_max_entries: parsed_or("CACHE_MAX_ENTRIES", 1000),
            http_timeout_seconds: parsed_or("HTTP_TIMEOUT_SECONDS", 10),
            request_deadline_seconds: parsed_or("REQUEST_DEADLINE_SECONDS", 20),
            rate_limit_max_attempts: parsed_or("RATE_LIMIT_MAX_ATTEMPTS", 3),
            rate_limit_backoff_ms: parsed_or("RATE_LIMIT_BACKOFF_MS", 500),
            max_concurrent_requests: parsed_or("MAX_CONCURRENT_REQUESTS", 10),
            max_query_complexity: parsed_or("MAX_QUERY_COMPLEXITY", 1000),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_seconds)
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }
}
