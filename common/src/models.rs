use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// City match returned by the geocoding provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub population: Option<u64>,
}

/// One forecast day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyWeather {
    pub date: NaiveDate,
    /// °C
    pub temperature_max: f64,
    /// °C
    pub temperature_min: f64,
    /// mm
    pub precipitation_sum: f64,
    /// km/h
    pub wind_speed_max: f64,
}

/// Activities the ranking knows about, in tie-break priority order
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Skiing,
    Surfing,
    IndoorSightseeing,
    OutdoorSightseeing,
}

/// Suitability of one activity for a forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityScore {
    pub activity: ActivityKind,
    /// 1 = best
    pub rank: u32,
    /// Between 0 and 1
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_daily_weather_wire_shape() {
        let day = DailyWeather {
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            temperature_max: 26.5,
            temperature_min: 24.5,
            precipitation_sum: 0.0,
            wind_speed_max: 14.5,
        };

        assert_eq!(
            serde_json::to_value(&day).unwrap(),
            json!({
                "date": "2024-07-01",
                "temperatureMax": 26.5,
                "temperatureMin": 24.5,
                "precipitationSum": 0.0,
                "windSpeedMax": 14.5
            })
        );
    }

    #[test]
    fn test_activity_kind_wire_names() {
        assert_eq!(
            serde_json::to_value(ActivityKind::IndoorSightseeing).unwrap(),
            json!("INDOOR_SIGHTSEEING")
        );
        assert_eq!(
            serde_json::to_value(ActivityKind::Skiing).unwrap(),
            json!("SKIING")
        );
    }
}
