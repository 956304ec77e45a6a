//! Heuristic ranking of tourist activities from a daily forecast.
//!
//! The rule table is fixed. An empty forecast yields all-zero aggregates,
//! which still produces a full ranking.

use common::models::{ActivityKind, ActivityScore, DailyWeather};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Aggregates {
    mean_temperature: f64,
    mean_precipitation: f64,
    mean_wind_speed: f64,
}

impl Aggregates {
    fn from_forecast(forecast: &[DailyWeather]) -> Self {
        if forecast.is_empty() {
            return Self {
                mean_temperature: 0.0,
                mean_precipitation: 0.0,
                mean_wind_speed: 0.0,
            };
        }

        let n = forecast.len() as f64;
        let mean = |f: fn(&DailyWeather) -> f64| forecast.iter().map(f).sum::<f64>() / n;

        Self {
            mean_temperature: mean(|d| (d.temperature_max + d.temperature_min) / 2.0),
            mean_precipitation: mean(|d| d.precipitation_sum),
            mean_wind_speed: mean(|d| d.wind_speed_max),
        }
    }
}

fn score(activity: ActivityKind, agg: &Aggregates) -> f64 {
    let Aggregates {
        mean_temperature: temp,
        mean_precipitation: precip,
        mean_wind_speed: wind,
    } = *agg;

    match activity {
        ActivityKind::Skiing => {
            if temp < 5.0 && precip > 0.0 {
                0.9
            } else {
                0.1
            }
        }
        ActivityKind::Surfing => {
            if temp > 20.0 && (15.0..=30.0).contains(&wind) {
                0.7
            } else {
                0.2
            }
        }
        ActivityKind::IndoorSightseeing => {
            if precip > 2.0 {
                0.8
            } else {
                0.3
            }
        }
        ActivityKind::OutdoorSightseeing => {
            if (15.0..=30.0).contains(&temp) && precip < 2.0 {
                0.9
            } else {
                0.2
            }
        }
    }
}

/// Declaration order doubles as the tie-break order.
const ACTIVITIES: [ActivityKind; 4] = [
    ActivityKind::Skiing,
    ActivityKind::Surfing,
    ActivityKind::IndoorSightseeing,
    ActivityKind::OutdoorSightseeing,
];

pub fn rank_activities(forecast: &[DailyWeather]) -> Vec<ActivityScore> {
    let agg = Aggregates::from_forecast(forecast);

    let mut scored: Vec<(ActivityKind, f64)> = ACTIVITIES
        .iter()
        .map(|&activity| (activity, score(activity, &agg)))
        .collect();

    // sort_by is stable, so equal scores keep table order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .zip(1..)
        .map(|((activity, score), rank)| ActivityScore {
            activity,
            rank,
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(max: f64, min: f64, precip: f64, wind: f64) -> DailyWeather {
        DailyWeather {
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            temperature_max: max,
            temperature_min: min,
            precipitation_sum: precip,
            wind_speed_max: wind,
        }
    }

    fn summary(scores: &[ActivityScore]) -> Vec<(ActivityKind, f64, u32)> {
        scores
            .iter()
            .map(|s| (s.activity, s.score, s.rank))
            .collect()
    }

    #[test]
    fn test_empty_forecast_uses_zero_aggregates() {
        assert_eq!(
            summary(&rank_activities(&[])),
            vec![
                (ActivityKind::IndoorSightseeing, 0.3, 1),
                (ActivityKind::Surfing, 0.2, 2),
                (ActivityKind::OutdoorSightseeing, 0.2, 3),
                (ActivityKind::Skiing, 0.1, 4),
            ]
        );
    }

    #[test]
    fn test_warm_dry_day_favours_outdoor() {
        let forecast = [day(26.5, 24.5, 0.0, 14.5)];

        assert_eq!(
            summary(&rank_activities(&forecast)),
            vec![
                (ActivityKind::OutdoorSightseeing, 0.9, 1),
                (ActivityKind::IndoorSightseeing, 0.3, 2),
                (ActivityKind::Surfing, 0.2, 3),
                (ActivityKind::Skiing, 0.1, 4),
            ]
        );
    }

    #[test]
    fn test_cold_snowy_days_favour_skiing() {
        let forecast = [day(2.0, -6.0, 4.0, 10.0), day(0.0, -8.0, 6.0, 12.0)];
        let ranking = rank_activities(&forecast);

        assert_eq!(
            summary(&ranking),
            vec![
                (ActivityKind::Skiing, 0.9, 1),
                (ActivityKind::IndoorSightseeing, 0.8, 2),
                (ActivityKind::Surfing, 0.2, 3),
                (ActivityKind::OutdoorSightseeing, 0.2, 4),
            ]
        );
    }

    #[test]
    fn test_hot_windy_day_favours_surfing() {
        let forecast = [day(34.0, 26.0, 0.0, 22.0)];
        let ranking = rank_activities(&forecast);

        // mean temp 30 still counts for outdoor, so outdoor wins on score
        assert_eq!(ranking[0].activity, ActivityKind::OutdoorSightseeing);
        assert_eq!(ranking[1].activity, ActivityKind::Surfing);
        assert_eq!(ranking[1].score, 0.7);
    }

    #[test]
    fn test_wind_bounds_are_inclusive() {
        for wind in [15.0, 30.0] {
            let ranking = rank_activities(&[day(40.0, 36.0, 0.0, wind)]);
            let surfing = ranking
                .iter()
                .find(|s| s.activity == ActivityKind::Surfing)
                .unwrap();
            assert_eq!(surfing.score, 0.7);
        }
    }

    #[test]
    fn test_ranks_are_a_permutation_and_scores_bounded() {
        let forecasts = [
            vec![day(10.0, 5.0, 1.0, 5.0)],
            vec![day(-20.0, -30.0, 0.0, 80.0), day(45.0, 30.0, 50.0, 0.0)],
            vec![day(22.0, 18.0, 2.0, 15.0); 14],
        ];

        for forecast in forecasts {
            let ranking = rank_activities(&forecast);
            assert_eq!(ranking.len(), 4);

            let mut ranks: Vec<u32> = ranking.iter().map(|s| s.rank).collect();
            ranks.sort_unstable();
            assert_eq!(ranks, vec![1, 2, 3, 4]);

            assert!(ranking.iter().all(|s| (0.0..=1.0).contains(&s.score)));
            assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    fn score_of(ranking: &[ActivityScore], activity: ActivityKind) -> f64 {
        ranking
            .iter()
            .find(|s| s.activity == activity)
            .map(|s| s.score)
            .unwrap()
    }

    #[test]
    fn test_precipitation_of_exactly_two_misses_both_rules() {
        // indoor needs > 2, outdoor needs < 2
        let ranking = rank_activities(&[day(22.0, 18.0, 2.0, 5.0)]);

        assert_eq!(score_of(&ranking, ActivityKind::IndoorSightseeing), 0.3);
        assert_eq!(score_of(&ranking, ActivityKind::OutdoorSightseeing), 0.2);
    }

    #[test]
    fn test_outdoor_temperature_bounds_are_inclusive() {
        for (max, min) in [(16.0, 14.0), (31.0, 29.0)] {
            let ranking = rank_activities(&[day(max, min, 0.0, 5.0)]);
            assert_eq!(score_of(&ranking, ActivityKind::OutdoorSightseeing), 0.9);
        }

        for (max, min) in [(15.0, 14.0), (31.0, 30.0)] {
            let ranking = rank_activities(&[day(max, min, 0.0, 5.0)]);
            assert_eq!(score_of(&ranking, ActivityKind::OutdoorSightseeing), 0.2);
        }
    }

    #[test]
    fn test_dry_cold_day_is_not_for_skiing() {
        let ranking = rank_activities(&[day(0.0, -10.0, 0.0, 5.0)]);
        assert_eq!(score_of(&ranking, ActivityKind::Skiing), 0.1);

        let ranking = rank_activities(&[day(0.0, -10.0, 0.1, 5.0)]);
        assert_eq!(score_of(&ranking, ActivityKind::Skiing), 0.9);
    }

    #[test]
    fn test_surfing_needs_temperature_above_twenty() {
        let ranking = rank_activities(&[day(21.0, 19.0, 0.0, 20.0)]);
        assert_eq!(score_of(&ranking, ActivityKind::Surfing), 0.2);
    }
}
