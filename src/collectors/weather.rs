use chrono::Local;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{fetch_json, utc_from_unix, FetchError, Fetched};
use crate::core::forecast::{HourlyForecast, WeatherReport};
use crate::utils::config::Config;

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: Option<Current>,
    hourly: Option<Vec<RawHourly>>,
}

#[derive(Debug, Deserialize)]
struct Current {
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawHourly {
    dt: i64,
    clouds: u8,
}

/// Fetches the ~48 hour hourly forecast and today's sunset from OpenWeatherMap.
/// Both come from one response, so they are available together or not at all.
pub async fn fetch_weather_and_sunset(client: &Client, config: &Config) -> Fetched<WeatherReport> {
    info!("Connecting to OpenWeatherMap API");
    let url = format!("{}/data/3.0/onecall", config.owm_base_url.trim_end_matches('/'));
    let request = client.get(url).query(&[
        ("lat", config.latitude.to_string()),
        ("lon", config.longitude.to_string()),
        ("exclude", "minutely,daily".to_string()),
        ("appid", config.owm_api_key.clone()),
        ("units", "imperial".to_string()),
    ]);
    let result = fetch_json(request).await.and_then(into_report);
    Fetched::from_result("openweathermap", result)
}

fn into_report(resp: OneCallResponse) -> Result<WeatherReport, FetchError> {
    let raw = resp.hourly.ok_or(FetchError::MissingField("hourly"))?;
    let sunset = resp
        .current
        .ok_or(FetchError::MissingField("current"))?
        .sunset
        .ok_or(FetchError::MissingField("current.sunset"))?;
    let sunset = utc_from_unix(sunset)?;

    let hourly = raw
        .into_iter()
        .map(|h| {
            Ok(HourlyForecast {
                time: utc_from_unix(h.dt)?,
                cloud_cover: h.clouds,
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    info!(
        samples = hourly.len(),
        "Fetched weather, today's sunset is at {}",
        sunset.with_timezone(&Local).format("%I:%M %p")
    );
    Ok(WeatherReport { hourly, sunset })
}
