mod collectors;
mod core;
mod notify;
mod pipeline;
mod predictors;
mod utils;

use std::process::ExitCode;

use chrono::Local;
use pipeline::RunOutcome;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = utils::config::Config::load();
    utils::logging::init(config.as_ref().map_or("info", |c| c.log_level.as_str()));
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Configuration could not be loaded");
            return ExitCode::FAILURE;
        }
    };

    info!("ISS Sighting Notifier running at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!(lat = config.latitude, lon = config.longitude, alt = config.altitude_m, "Observer location");
    for key in config.missing_keys() {
        warn!(key, "API key is not configured");
    }

    let client = match collectors::http_client() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let passes = collectors::n2yo::fetch_iss_passes(&client, &config).await;
    let weather = collectors::weather::fetch_weather_and_sunset(&client, &config).await;

    let outcome = pipeline::run(passes, weather, &config.criteria(), &Local::now(), || {
        collectors::crew::fetch_iss_crew(&client, &config)
    })
    .await;

    match outcome {
        RunOutcome::DataUnavailable => ExitCode::FAILURE,
        RunOutcome::NoSighting => ExitCode::SUCCESS,
        RunOutcome::Notified { sighting, message } => {
            println!("{message}");
            info!(
                start = %sighting.start_time,
                "Notification delivery is not implemented; message printed only"
            );
            ExitCode::SUCCESS
        }
    }
}
