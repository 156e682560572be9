use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::core::bedtime::Bedtime;
use crate::core::forecast::{forecast_after, HourlyForecast};
use crate::core::pass::Pass;

/// User thresholds a pass must meet to be worth a notification.
#[derive(Debug, Clone)]
pub struct SightingCriteria {
    pub max_magnitude: f64,
    pub max_cloud_cover: u8,
    /// Local "HH:MM"; parsed on every selection.
    pub bedtime: String,
}

/// The selected pass, in local time, with the cloud cover forecast for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sighting {
    pub start_time: DateTime<FixedOffset>,
    pub duration_secs: u32,
    pub magnitude: f64,
    pub start_compass: String,
    pub end_compass: String,
    pub cloud_cover: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rejection {
    TooDim(f64),
    BeforeSunset,
    AfterBedtime,
    NoForecast,
    TooCloudy(u8),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooDim(mag) => write!(f, "it is too dim (Mag: {mag})"),
            Rejection::BeforeSunset => write!(f, "it is before sunset"),
            Rejection::AfterBedtime => write!(f, "it is after bedtime"),
            Rejection::NoForecast => write!(f, "no forecast data is available"),
            Rejection::TooCloudy(c) => write!(f, "it has too much cloud cover (Cloud Cover: {c})"),
        }
    }
}

struct Filters<'a> {
    criteria: &'a SightingCriteria,
    hourly: &'a [HourlyForecast],
    sunset: DateTime<Utc>,
    today: NaiveDate,
    bedtime_today: DateTime<Utc>,
}

impl Filters<'_> {
    /// Runs every filter in order and returns the cloud cover used by the last one.
    fn check(&self, pass: &Pass, local_start: &DateTime<FixedOffset>) -> Result<u8, Rejection> {
        self.brightness(pass)?;
        self.daylight(pass)?;
        self.bedtime(pass, local_start)?;
        self.cloud_cover(pass)
    }

    fn brightness(&self, pass: &Pass) -> Result<(), Rejection> {
        if pass.magnitude > self.criteria.max_magnitude {
            return Err(Rejection::TooDim(pass.magnitude));
        }
        Ok(())
    }

    fn daylight(&self, pass: &Pass) -> Result<(), Rejection> {
        if pass.start < self.sunset {
            return Err(Rejection::BeforeSunset);
        }
        Ok(())
    }

    // Only passes on today's local date are held to bedtime; later nights are not checked.
    fn bedtime(&self, pass: &Pass, local_start: &DateTime<FixedOffset>) -> Result<(), Rejection> {
        if local_start.date_naive() == self.today && pass.start > self.bedtime_today {
            return Err(Rejection::AfterBedtime);
        }
        Ok(())
    }

    fn cloud_cover(&self, pass: &Pass) -> Result<u8, Rejection> {
        let forecast = forecast_after(self.hourly, pass.start).ok_or(Rejection::NoForecast)?;
        if forecast.cloud_cover > self.criteria.max_cloud_cover {
            return Err(Rejection::TooCloudy(forecast.cloud_cover));
        }
        Ok(forecast.cloud_cover)
    }
}

/// Returns the first pass, in input order, that is bright enough, after sunset,
/// before tonight's bedtime and under an acceptably clear sky.
///
/// `now` fixes both "today" and the local time zone. An unusable bedtime is
/// logged and yields `None`.
pub fn find_best_sighting<Tz: TimeZone>(
    passes: &[Pass],
    hourly: &[HourlyForecast],
    sunset: DateTime<Utc>,
    criteria: &SightingCriteria,
    now: &DateTime<Tz>,
) -> Option<Sighting> {
    let tz = now.timezone();
    let today = now.date_naive();
    let bedtime_today = match criteria.bedtime.parse::<Bedtime>().and_then(|b| {
        info!(
            bedtime = %b,
            max_magnitude = criteria.max_magnitude,
            max_cloud_cover = criteria.max_cloud_cover,
            "Filtering sighting opportunities"
        );
        b.on(today, &tz)
    }) {
        Ok(at) => at.with_timezone(&Utc),
        Err(e) => {
            error!(error = %e, "Invalid bedtime, please use HH:MM format");
            return None;
        }
    };

    let filters = Filters { criteria, hourly, sunset, today, bedtime_today };

    for pass in passes {
        let local_start = pass.start.with_timezone(&tz).fixed_offset();
        let at = local_start.format("%I:%M %p");
        match filters.check(pass, &local_start) {
            Ok(cloud_cover) => {
                info!("Found a good sighting at {at}");
                return Some(Sighting {
                    start_time: local_start,
                    duration_secs: pass.duration_secs,
                    magnitude: pass.magnitude,
                    start_compass: pass.start_compass.clone(),
                    end_compass: pass.end_compass.clone(),
                    cloud_cover,
                });
            }
            Err(reason) => info!("Skipping pass at {at} because {reason}"),
        }
    }

    info!("No good sightings found in the forecast window");
    None
}
