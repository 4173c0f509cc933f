use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::SourceError;

pub const AVIATION_WEATHER_URL: &str = "https://aviationweather.gov/cgi-bin/data/dataserver.php";
pub const NWS_API_URL: &str = "https://api.weather.gov";
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const NDFD_URL: &str =
    "https://graphical.weather.gov/xml/sample_products/browser_interface/ndfdXMLclient.php";

/// Base URLs of every upstream service
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub aviation_weather: String,
    pub nws_api: String,
    pub open_meteo: String,
    pub ndfd: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            aviation_weather: AVIATION_WEATHER_URL.to_string(),
            nws_api: NWS_API_URL.to_string(),
            open_meteo: OPEN_METEO_URL.to_string(),
            ndfd: NDFD_URL.to_string(),
        }
    }
}

/// Thin wrapper over a shared reqwest client; one attempt per call, no retries.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<HttpFetcher, SourceError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, timeout })
    }

    pub async fn fetch_text(&self, url: &Url) -> Result<String, SourceError> {
        debug!("requesting: {}", url);
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, SourceError> {
        let body = self.fetch_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Joins `base` with url-encoded query parameters
pub fn build_url(base: &str, params: &[(&str, String)]) -> Result<Url, SourceError> {
    Url::parse_with_params(base, params).map_err(|e| SourceError::InvalidUrl(e.to_string()))
}

/// Station identifiers end up in request paths, so only plain ICAO-style codes are allowed
pub fn validate_station_id(station_id: &str) -> Result<&str, SourceError> {
    if station_id.is_empty() || !station_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SourceError::InvalidStation(station_id.to_string()));
    }
    Ok(station_id)
}

/// Blank upstream text counts as missing
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
