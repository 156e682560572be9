use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{fetch_json, utc_from_unix, FetchError, Fetched};
use crate::core::pass::Pass;
use crate::utils::config::Config;

const ISS_NORAD_ID: u32 = 25544;
const FORECAST_DAYS: u32 = 10;
const MIN_VISIBILITY: u32 = 0;

#[derive(Debug, Deserialize)]
struct VisualPassesResponse {
    info: Option<PassesInfo>,
    passes: Option<Vec<RawPass>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PassesInfo {
    passescount: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPass {
    #[serde(rename = "startUTC")]
    start_utc: i64,
    duration: u32,
    mag: f64,
    start_az_compass: String,
    end_az_compass: String,
}

/// Fetches the visual pass forecast for the ISS over the configured location.
pub async fn fetch_iss_passes(client: &Client, config: &Config) -> Fetched<Vec<Pass>> {
    info!("Connecting to N2YO API to fetch ISS pass data");
    let url = format!(
        "{}/satellite/visualpasses/{ISS_NORAD_ID}/{}/{}/{}/{FORECAST_DAYS}/{MIN_VISIBILITY}/&apiKey={}",
        config.n2yo_base_url.trim_end_matches('/'),
        config.latitude,
        config.longitude,
        config.altitude_m,
        config.n2yo_api_key,
    );
    let result = fetch_json(client.get(url)).await.and_then(into_passes);
    Fetched::from_result("n2yo", result)
}

fn into_passes(resp: VisualPassesResponse) -> Result<Vec<Pass>, FetchError> {
    if let Some(msg) = resp.error {
        return Err(FetchError::Provider(msg));
    }
    let raw = resp.passes.ok_or(FetchError::MissingField("passes"))?;
    let passes = raw
        .into_iter()
        .map(|p| {
            Ok(Pass {
                start: utc_from_unix(p.start_utc)?,
                duration_secs: p.duration,
                magnitude: p.mag,
                start_compass: p.start_az_compass,
                end_compass: p.end_az_compass,
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    let count = resp.info.map_or(passes.len() as u32, |i| i.passescount);
    info!(count, "Fetched potential passes");
    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::{into_passes, VisualPassesResponse};
    use crate::collectors::FetchError;

    fn decode(body: &str) -> VisualPassesResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn decodes_visual_passes() {
        let body = r#"{
            "info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 4, "passescount": 2},
            "passes": [
                {"startAz": 307.21, "startAzCompass": "NW", "startEl": 13.08, "startUTC": 1709345640,
                 "maxAz": 225.56, "maxAzCompass": "SW", "maxEl": 79.85, "maxUTC": 1709345900,
                 "endAz": 132.41, "endAzCompass": "SE", "endEl": 0, "endUTC": 1709346230,
                 "mag": -2.4, "duration": 390},
                {"startAz": 250.0, "startAzCompass": "WSW", "startUTC": 1709431000,
                 "endAzCompass": "S", "mag": 100000, "duration": 120}
            ]
        }"#;
        let passes = into_passes(decode(body)).unwrap();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].start.to_rfc3339(), "2024-03-02T02:14:00+00:00");
        assert_eq!(passes[0].duration_secs, 390);
        assert_eq!(passes[0].magnitude, -2.4);
        assert_eq!(passes[0].start_compass, "NW");
        assert_eq!(passes[0].end_compass, "SE");
        assert_eq!(passes[1].magnitude, 100000.0);
    }

    #[test]
    fn missing_passes_is_an_error() {
        let body = r#"{"info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 1, "passescount": 0}}"#;
        assert!(matches!(into_passes(decode(body)), Err(FetchError::MissingField("passes"))));
    }

    #[test]
    fn provider_error_is_reported() {
        let body = r#"{"error": "Invalid API Key!"}"#;
        match into_passes(decode(body)) {
            Err(FetchError::Provider(msg)) => assert_eq!(msg, "Invalid API Key!"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_pass_fails_decode() {
        let body = r#"{"passes": [{"startUTC": "soon", "duration": 10, "mag": 1.0}]}"#;
        assert!(serde_json::from_str::<VisualPassesResponse>(body).is_err());
    }
}
