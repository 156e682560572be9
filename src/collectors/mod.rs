pub mod crew;
pub mod n2yo;
pub mod weather;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("invalid unix timestamp {0}")]
    InvalidTimestamp(i64),
}

impl From<reqwest::Error> for FetchError {
    // URLs carry API keys; keep them out of logs.
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(e.without_url())
    }
}

/// Outcome of a single provider call. Failures never escape a fetcher, they become `Unavailable`.
#[derive(Debug)]
pub enum Fetched<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Fetched<T> {
    pub fn from_result(source: &'static str, result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => Fetched::Available(data),
            Err(e) => {
                warn!(source, error = %e, "Provider unavailable");
                Fetched::Unavailable(e.to_string())
            }
        }
    }
}

/// Client shared by all fetchers. Idle connections are not pooled, so each
/// request's connection is closed once its response has been read or dropped.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(0)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
}

/// Sends the request and decodes a JSON body. The response is fully consumed before returning.
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let body = request.send().await?.error_for_status()?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn utc_from_unix(secs: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::from_timestamp(secs, 0).ok_or(FetchError::InvalidTimestamp(secs))
}
