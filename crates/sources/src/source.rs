use async_trait::async_trait;
use reqwest::Url;
use time::{macros::format_description, OffsetDateTime};

use crate::{
    build_url, parse_metar, parse_ndfd, parse_station, parse_taf, validate_station_id, Endpoints,
    HourlySeries, HttpFetcher, Metar, NdfdForecast, OpenMeteoResponse, SourceError, Station,
    HOURLY_VARIABLES,
};

/// Every upstream lookup a briefing needs. One call is one attempt.
#[async_trait]
pub trait WeatherSource: Sync + Send {
    async fn station(&self, station_id: &str) -> Result<Station, SourceError>;
    async fn metar(&self, station_id: &str) -> Result<Metar, SourceError>;
    async fn taf(&self, station_id: &str) -> Result<String, SourceError>;
    /// Open-Meteo hourly series for a point, UTC timestamps, wind in knots
    async fn hourly_series(&self, latitude: f64, longitude: f64)
        -> Result<HourlySeries, SourceError>;
    async fn ndfd_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        target: OffsetDateTime,
    ) -> Result<NdfdForecast, SourceError>;
}

pub struct WeatherClient {
    fetcher: HttpFetcher,
    endpoints: Endpoints,
}

impl WeatherClient {
    pub fn new(fetcher: HttpFetcher, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    async fn data_server(&self, data_source: &str, station_id: &str) -> Result<String, SourceError> {
        let station_id = validate_station_id(station_id)?;
        let url = build_url(
            &self.endpoints.aviation_weather,
            &[
                ("requestType", "retrieve".to_string()),
                ("dataSource", data_source.to_string()),
                ("format", "xml".to_string()),
                ("stationString", station_id.to_string()),
                ("hoursBeforeNow", "1".to_string()),
            ],
        )?;
        self.fetcher.fetch_text(&url).await
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn station(&self, station_id: &str) -> Result<Station, SourceError> {
        let station_id = validate_station_id(station_id)?;
        let url = Url::parse(&format!(
            "{}/stations/{}",
            self.endpoints.nws_api.trim_end_matches('/'),
            station_id
        ))
        .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        let body = self.fetcher.fetch_text(&url).await?;
        parse_station(station_id, &body)
    }

    async fn metar(&self, station_id: &str) -> Result<Metar, SourceError> {
        let xml = self.data_server("metars", station_id).await?;
        parse_metar(station_id, &xml)
    }

    async fn taf(&self, station_id: &str) -> Result<String, SourceError> {
        let xml = self.data_server("tafs", station_id).await?;
        parse_taf(station_id, &xml)
    }

    async fn hourly_series(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlySeries, SourceError> {
        let url = build_url(
            &self.endpoints.open_meteo,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("wind_speed_unit", "kn".to_string()),
                ("timezone", "UTC".to_string()),
            ],
        )?;
        let response: OpenMeteoResponse = self.fetcher.fetch_json(&url).await?;
        Ok(response.hourly)
    }

    async fn ndfd_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        target: OffsetDateTime,
    ) -> Result<NdfdForecast, SourceError> {
        let time = target.format(format_description!("[year]-[month]-[day]T[hour]:[minute]"))?;
        let url = build_url(
            &self.endpoints.ndfd,
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("product", "time-series".to_string()),
                ("begin", time.clone()),
                ("end", time),
                ("Unit", "e".to_string()),
            ],
        )?;
        let xml = self.fetcher.fetch_text(&url).await?;
        parse_ndfd(&xml)
    }
}
