use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyForecast {
    pub time: DateTime<Utc>,
    /// Percentage of sky covered, 0-100.
    pub cloud_cover: u8,
}

/// Hourly cloud forecast together with today's sunset.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub hourly: Vec<HourlyForecast>,
    pub sunset: DateTime<Utc>,
}

/// Returns the first sample strictly after `instant`. Expects `hourly` ascending by time.
pub fn forecast_after(hourly: &[HourlyForecast], instant: DateTime<Utc>) -> Option<&HourlyForecast> {
    hourly.iter().find(|h| h.time > instant)
}

#[cfg(test)]
mod tests {
    use super::{forecast_after, HourlyForecast};
    use chrono::{TimeZone, Utc};

    fn sample(hour: u32, cloud_cover: u8) -> HourlyForecast {
        HourlyForecast {
            time: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            cloud_cover,
        }
    }

    #[test]
    fn picks_next_sample_strictly_after() {
        let hourly = vec![sample(20, 5), sample(21, 40), sample(22, 90)];

        let at_boundary = Utc.with_ymd_and_hms(2024, 3, 1, 21, 0, 0).unwrap();
        assert_eq!(forecast_after(&hourly, at_boundary).unwrap().cloud_cover, 90);

        let between = Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 0).unwrap();
        assert_eq!(forecast_after(&hourly, between).unwrap().cloud_cover, 40);
    }

    #[test]
    fn none_past_horizon() {
        let hourly = vec![sample(20, 5)];
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap();
        assert!(forecast_after(&hourly, late).is_none());
        assert!(forecast_after(&[], late).is_none());
    }
}
