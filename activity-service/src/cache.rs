use common::models::{City, DailyWeather};
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum CachedValue {
    Cities(Vec<City>),
    Forecast(Vec<DailyWeather>),
}

/// Process-lifetime response cache shared by city search and forecasts.
///
/// Entries expire after the TTL and the least recently used entries are
/// evicted once `max_entries` is exceeded.
pub struct ProviderCache {
    cache: Cache<String, CachedValue>,
}

impl ProviderCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { cache }
    }

    pub async fn get_cities(&self, key: &str) -> Option<Vec<City>> {
        match self.cache.get(key).await {
            Some(CachedValue::Cities(cities)) => Some(cities),
            _ => None,
        }
    }

    pub async fn get_forecast(&self, key: &str) -> Option<Vec<DailyWeather>> {
        match self.cache.get(key).await {
            Some(CachedValue::Forecast(days)) => Some(days),
            _ => None,
        }
    }

    pub async fn set(&self, key: String, value: CachedValue) {
        self.cache.insert(key, value).await;
    }

    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

pub fn cities_key(query: &str, limit: u32) -> String {
    format!("cities:{}:{}", query.trim().to_lowercase(), limit)
}

pub fn forecast_key(latitude: f64, longitude: f64, days: u32) -> String {
    format!("forecast:{:.4}:{:.4}:{}", latitude, longitude, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> City {
        City {
            id: "2988507".to_string(),
            name: "Paris".to_string(),
            latitude: 48.85341,
            longitude: 2.3488,
            country: Some("France".to_string()),
            population: Some(2_138_551),
        }
    }

    #[test]
    fn test_keys_are_normalized() {
        assert_eq!(cities_key("  Paris ", 5), cities_key("paris", 5));
        assert_ne!(cities_key("paris", 5), cities_key("paris", 6));
        assert_eq!(forecast_key(48.85341, 2.3488, 3), "forecast:48.8534:2.3488:3");
        assert_ne!(forecast_key(48.85, 2.35, 3), forecast_key(48.85, 2.35, 4));
    }

    #[tokio::test]
    async fn test_hit_returns_stored_value() {
        let cache = ProviderCache::new(10, Duration::from_secs(60));
        let key = cities_key("paris", 1);
        cache.set(key.clone(), CachedValue::Cities(vec![paris()])).await;

        assert_eq!(cache.get_cities(&key).await, Some(vec![paris()]));
    }

    #[tokio::test]
    async fn test_empty_results_are_cached() {
        let cache = ProviderCache::new(10, Duration::from_secs(60));
        let key = cities_key("atlantis", 5);
        cache.set(key.clone(), CachedValue::Cities(Vec::new())).await;

        assert_eq!(cache.get_cities(&key).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_value_kinds_do_not_cross() {
        let cache = ProviderCache::new(10, Duration::from_secs(60));
        let key = "shared".to_string();
        cache.set(key.clone(), CachedValue::Forecast(Vec::new())).await;

        assert_eq!(cache.get_cities(&key).await, None);
        assert_eq!(cache.get_forecast(&key).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = ProviderCache::new(10, Duration::from_millis(100));
        let key = cities_key("paris", 1);
        cache.set(key.clone(), CachedValue::Cities(vec![paris()])).await;

        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(cache.get_cities(&key).await, None);
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let cache = ProviderCache::new(2, Duration::from_secs(60));
        for i in 0..5 {
            cache
                .set(cities_key(&format!("city-{}", i), 1), CachedValue::Cities(Vec::new()))
                .await;
        }

        assert!(cache.entry_count().await <= 2);
    }

    #[tokio::test]
    async fn test_least_recently_used_entry_is_evicted() {
        let cache = ProviderCache::new(2, Duration::from_secs(60));
        cache.set("a".to_string(), CachedValue::Cities(vec![paris()])).await;
        cache.set("b".to_string(), CachedValue::Cities(Vec::new())).await;

        // touch "a" so "b" becomes the least recently used
        assert!(cache.get_cities("a").await.is_some());
        cache.entry_count().await;

        cache.set("c".to_string(), CachedValue::Forecast(Vec::new())).await;
        assert_eq!(cache.entry_count().await, 2);

        assert_eq!(cache.get_cities("b").await, None);
        assert_eq!(cache.get_cities("a").await, Some(vec![paris()]));
        assert_eq!(cache.get_forecast("c").await, Some(Vec::new()));
    }
}
