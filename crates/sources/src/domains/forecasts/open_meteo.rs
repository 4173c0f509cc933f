use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};
use utoipa::ToSchema;

use crate::{round_to, SourceError};

/// hPa to inHg
pub const INHG_PER_HPA: f64 = 0.02953;
/// Spread-to-base rule of thumb: 400 ft per °C of temperature/dewpoint spread
pub const CLOUD_BASE_FT_PER_DEGREE: f64 = 400.0;

pub const HOURLY_VARIABLES: &str = "temperature_2m,dewpoint_2m,pressure_msl,visibility,cloudcover,windspeed_10m,winddirection_10m";

#[derive(Debug, Default, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub hourly: HourlySeries,
}

/// Column-oriented hourly series as returned by Open-Meteo (`timezone=UTC`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub dewpoint_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub pressure_msl: Vec<Option<f64>>,
    #[serde(default)]
    pub visibility: Vec<Option<f64>>,
    #[serde(default)]
    pub cloudcover: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub winddirection_10m: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Index of the first entry in the same UTC hour as `target`
    pub fn hour_index(&self, target: OffsetDateTime) -> Result<usize, SourceError> {
        let prefix = target.format(format_description!("[year]-[month]-[day]T[hour]"))?;
        self.time
            .iter()
            .position(|t| t.starts_with(&prefix))
            .ok_or(SourceError::MissingHour(prefix))
    }

    pub fn value_at(
        series: &[Option<f64>],
        index: usize,
        field: &'static str,
    ) -> Result<f64, SourceError> {
        series
            .get(index)
            .copied()
            .flatten()
            .ok_or(SourceError::MissingField(field))
    }
}

/// Open-Meteo model values for the target hour, normalized to aviation units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OpenMeteoForecast {
    pub temperature_c: f64,
    pub dewpoint_c: f64,
    pub altimeter_inhg: f64,
    pub wind_direction_deg: f64,
    pub wind_speed_kt: f64,
    pub visibility_km: Option<f64>,
    pub cloud_cover_pct: f64,
    pub cloud_base_ft: i64,
    pub sky_condition: String,
}

impl OpenMeteoForecast {
    pub fn from_series(series: &HourlySeries, target: OffsetDateTime) -> Result<Self, SourceError> {
        let i = series.hour_index(target)?;
        let temperature_c = HourlySeries::value_at(&series.temperature_2m, i, "temperature_2m")?;
        let dewpoint_c = HourlySeries::value_at(&series.dewpoint_2m, i, "dewpoint_2m")?;
        let pressure_hpa = HourlySeries::value_at(&series.pressure_msl, i, "pressure_msl")?;
        let cloud_cover_pct = HourlySeries::value_at(&series.cloudcover, i, "cloudcover")?;
        let wind_speed_kt = HourlySeries::value_at(&series.windspeed_10m, i, "windspeed_10m")?;
        let wind_direction_deg =
            HourlySeries::value_at(&series.winddirection_10m, i, "winddirection_10m")?;
        let visibility_km = series
            .visibility
            .get(i)
            .copied()
            .flatten()
            .map(|meters| round_to(meters / 1000.0, 1));

        let cloud_base_ft = cloud_base_ft(temperature_c, dewpoint_c);
        Ok(OpenMeteoForecast {
            temperature_c,
            dewpoint_c,
            altimeter_inhg: round_to(pressure_hpa * INHG_PER_HPA, 2),
            wind_direction_deg,
            wind_speed_kt,
            visibility_km,
            cloud_cover_pct,
            cloud_base_ft,
            sky_condition: sky_condition(cloud_cover_pct, cloud_base_ft),
        })
    }
}

/// Estimated convective cloud base above ground, never negative
pub fn cloud_base_ft(temperature_c: f64, dewpoint_c: f64) -> i64 {
    let base = ((temperature_c - dewpoint_c) * CLOUD_BASE_FT_PER_DEGREE).round() as i64;
    base.max(0)
}

/// METAR-style sky cover group from a total cloud cover percentage
pub fn sky_condition(cloud_cover_pct: f64, cloud_base_ft: i64) -> String {
    if cloud_cover_pct <= 5.0 {
        return "SKC".to_string();
    }
    let cover = if cloud_cover_pct <= 25.0 {
        "FEW"
    } else if cloud_cover_pct <= 50.0 {
        "SCT"
    } else if cloud_cover_pct <= 87.0 {
        "BKN"
    } else {
        "OVC"
    };
    let hundreds = (cloud_base_ft as f64 / 100.0).round() as i64;
    format!("{}{:03}", cover, hundreds)
}
