use std::future::Future;

use chrono::{DateTime, TimeZone};
use tracing::{error, info, warn};

use crate::collectors::Fetched;
use crate::core::forecast::WeatherReport;
use crate::core::pass::Pass;
use crate::notify::message::build_notification_message;
use crate::predictors::sighting::{find_best_sighting, Sighting, SightingCriteria};

/// How a single notifier run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Pass or weather data could not be fetched.
    DataUnavailable,
    NoSighting,
    Notified { sighting: Sighting, message: String },
}

/// Selects a sighting from the fetched pass and weather data and renders the
/// notification. `fetch_crew` is only awaited once a sighting has been found;
/// an unavailable crew falls back to the generic crew sentence.
pub async fn run<Tz, F, Fut>(
    passes: Fetched<Vec<Pass>>,
    weather: Fetched<WeatherReport>,
    criteria: &SightingCriteria,
    now: &DateTime<Tz>,
    fetch_crew: F,
) -> RunOutcome
where
    Tz: TimeZone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Fetched<Vec<String>>>,
{
    let (passes, weather) = match (passes, weather) {
        (Fetched::Available(p), Fetched::Available(w)) => (p, w),
        _ => {
            error!("Failed to get data from APIs, exiting");
            return RunOutcome::DataUnavailable;
        }
    };

    let Some(sighting) = find_best_sighting(&passes, &weather.hourly, weather.sunset, criteria, now) else {
        info!("No suitable ISS sightings found matching your criteria");
        return RunOutcome::NoSighting;
    };

    info!("ALERT: good sighting found");
    match serde_json::to_string_pretty(&sighting) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!(error = %e, "Failed to serialize sighting"),
    }

    info!("Fetching crew data to build notification");
    let crew = match fetch_crew().await {
        Fetched::Available(crew) => Some(crew),
        Fetched::Unavailable(reason) => {
            info!(%reason, "Continuing without crew names");
            None
        }
    };

    let message = build_notification_message(&sighting, crew.as_deref());
    RunOutcome::Notified { sighting, message }
}
