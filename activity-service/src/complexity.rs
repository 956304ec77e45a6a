//! Request cost estimation.
//!
//! Each query is priced before it runs: one point for the root field plus one
//! point per result field the caller can receive. City offsets also cost one
//! point per skipped match, since those matches are still fetched upstream.
//! Requests priced above the configured maximum are rejected without touching
//! the provider.

use common::errors::QueryError;

pub const DEFAULT_MAX_COMPLEXITY: u64 = 1000;

const ROOT_COST: u64 = 1;
const CITY_FIELDS: u64 = 6;
const SKIPPED_CITY_COST: u64 = 1;
const DAILY_WEATHER_FIELDS: u64 = 5;
const ACTIVITY_SCORE_FIELDS: u64 = 3;
const ACTIVITY_COUNT: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    CitySuggestions { limit: u32, offset: u32 },
    WeatherForecast { days: u32 },
    ActivityRanking { days: u32 },
}

impl QueryShape {
    pub fn complexity(&self) -> u64 {
        let body = match *self {
            Self::CitySuggestions { limit, offset } => u64::from(limit)
                .saturating_mul(CITY_FIELDS)
                .saturating_add(u64::from(offset).saturating_mul(SKIPPED_CITY_COST)),
            Self::WeatherForecast { days } => {
                u64::from(days).saturating_mul(DAILY_WEATHER_FIELDS)
            }
            Self::ActivityRanking { days } => u64::from(days)
                .saturating_mul(DAILY_WEATHER_FIELDS)
                .saturating_add(ACTIVITY_COUNT * ACTIVITY_SCORE_FIELDS),
        };

        ROOT_COST.saturating_add(body)
    }
}

/// Returns the computed complexity, or `ComplexityExceeded` when it is above `max`.
pub fn check(shape: QueryShape, max: u64) -> Result<u64, QueryError> {
    let complexity = shape.complexity();
    if complexity > max {
        return Err(QueryError::ComplexityExceeded { complexity, max });
    }
    Ok(complexity)
}
