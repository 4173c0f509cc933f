use async_trait::async_trait;
use axum::Router;
use mockall::mock;
use std::sync::Arc;
use time::OffsetDateTime;
use wx_briefing::{app, AppState, AssembleOptions};
use wx_sources::{HourlySeries, Metar, NdfdForecast, SourceError, Station, WeatherSource};

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(weather: Arc<dyn WeatherSource>) -> TestApp {
    spawn_app_with_options(weather, AssembleOptions::default()).await
}

pub async fn spawn_app_with_options(
    weather: Arc<dyn WeatherSource>,
    options: AssembleOptions,
) -> TestApp {
    let app_state = AppState {
        static_dir: String::from("./static"),
        remote_url: String::from("http://127.0.0.1:5000"),
        weather,
        options,
    };

    TestApp {
        app: app(app_state),
    }
}

mock! {
    pub WeatherSources {}
    #[async_trait]
    impl WeatherSource for WeatherSources {
        async fn station(&self, station_id: &str) -> Result<Station, SourceError>;
        async fn metar(&self, station_id: &str) -> Result<Metar, SourceError>;
        async fn taf(&self, station_id: &str) -> Result<String, SourceError>;
        async fn hourly_series(&self, latitude: f64, longitude: f64)
            -> Result<HourlySeries, SourceError>;
        async fn ndfd_forecast(
            &self,
            latitude: f64,
            longitude: f64,
            target: OffsetDateTime,
        ) -> Result<NdfdForecast, SourceError>;
    }
}

pub fn mock_station(station_id: &str) -> Station {
    match station_id {
        "KCOS" => Station {
            station_id: String::from("KCOS"),
            latitude: 38.81,
            longitude: -104.71,
            elevation_ft: 6187,
        },
        _ => Station {
            station_id: station_id.to_string(),
            latitude: 39.85,
            longitude: -104.66,
            elevation_ft: 5430,
        },
    }
}

pub fn mock_metar() -> Metar {
    Metar {
        raw_text: Some(String::from(
            "KDEN 181453Z 18012KT 10SM FEW080 18/02 A2972",
        )),
        report_time: Some(String::from("2026-10-18T14:53:00Z")),
        temperature_c: Some(String::from("18")),
        dewpoint_c: Some(String::from("2")),
        altimeter_inhg: Some(String::from("29.72")),
        wind_direction_deg: Some(String::from("180")),
        wind_speed_kt: Some(String::from("12")),
        visibility_sm: Some(String::from("10+")),
        sky_condition: Some(String::from("FEW080")),
    }
}

/// Hourly values for 2026-10-18 from 12Z through 18Z
pub fn mock_hourly_series() -> HourlySeries {
    let hours = 12..=18;
    HourlySeries {
        time: hours
            .clone()
            .map(|hour| format!("2026-10-18T{:02}:00", hour))
            .collect(),
        temperature_2m: hours.clone().map(|hour| Some(hour as f64)).collect(),
        dewpoint_2m: hours.clone().map(|_| Some(2.0)).collect(),
        pressure_msl: hours.clone().map(|_| Some(1013.25)).collect(),
        visibility: hours.clone().map(|_| Some(24140.0)).collect(),
        cloudcover: hours.clone().map(|_| Some(0.0)).collect(),
        windspeed_10m: hours.clone().map(|_| Some(9.0)).collect(),
        winddirection_10m: hours.map(|_| Some(200.0)).collect(),
    }
}

pub fn mock_ndfd() -> NdfdForecast {
    NdfdForecast {
        temperature_f: Some(String::from("61")),
        wind_speed_kt: Some(String::from("10")),
        wind_direction_deg: Some(String::from("190")),
        cloud_amount_pct: Some(String::from("15")),
    }
}

/// Every source answers for every station
pub fn healthy_sources() -> MockWeatherSources {
    let mut weather_data = MockWeatherSources::new();
    weather_data
        .expect_station()
        .returning(|station_id| Ok(mock_station(station_id)));
    weather_data.expect_metar().returning(|_| Ok(mock_metar()));
    weather_data
        .expect_taf()
        .returning(|station_id| Ok(format!("TAF {} 181120Z 1812/1912 18012KT P6SM FEW080", station_id)));
    weather_data
        .expect_hourly_series()
        .returning(|_, _| Ok(mock_hourly_series()));
    weather_data
        .expect_ndfd_forecast()
        .returning(|_, _, _| Ok(mock_ndfd()));
    weather_data
}
