use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{round_to, HourlySeries, SourceError, FEET_PER_METER};

/// Standard lapse rate used for the estimate, °C per 1000 ft
pub const LAPSE_RATE_C_PER_1000FT: f64 = 2.0;

pub const FALLBACK_WIND_DIRECTION_DEG: f64 = 250.0;
pub const FALLBACK_WIND_SPEED_KT: f64 = 40.0;
pub const FALLBACK_TEMPERATURE_C: f64 = -42.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindsAloftSource {
    /// Surface wind with a lapse-rate temperature
    Estimated,
    /// Fixed placeholder used when no estimate could be made
    Fallback,
}

impl WindsAloftSource {
    pub fn label(&self) -> &'static str {
        match self {
            WindsAloftSource::Estimated => "HRRR (est)",
            WindsAloftSource::Fallback => "RAP (fallback)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WindsAloft {
    pub source: WindsAloftSource,
    pub wind_direction_deg: f64,
    pub wind_speed_kt: f64,
    pub temperature_c: f64,
}

impl WindsAloft {
    pub fn estimate(
        series: &HourlySeries,
        altitude_m: i64,
        target: OffsetDateTime,
    ) -> Result<Self, SourceError> {
        let i = series.hour_index(target)?;
        let surface_temp = HourlySeries::value_at(&series.temperature_2m, i, "temperature_2m")?;
        let wind_speed_kt = HourlySeries::value_at(&series.windspeed_10m, i, "windspeed_10m")?;
        let wind_direction_deg =
            HourlySeries::value_at(&series.winddirection_10m, i, "winddirection_10m")?;

        let altitude_ft = altitude_m as f64 * FEET_PER_METER;
        let temperature_c = surface_temp - altitude_ft / 1000.0 * LAPSE_RATE_C_PER_1000FT;

        Ok(WindsAloft {
            source: WindsAloftSource::Estimated,
            wind_direction_deg,
            wind_speed_kt,
            temperature_c: round_to(temperature_c, 1),
        })
    }

    pub fn fallback() -> Self {
        WindsAloft {
            source: WindsAloftSource::Fallback,
            wind_direction_deg: FALLBACK_WIND_DIRECTION_DEG,
            wind_speed_kt: FALLBACK_WIND_SPEED_KT,
            temperature_c: FALLBACK_TEMPERATURE_C,
        }
    }

    pub fn wind(&self) -> String {
        format!("{}° at {} kt", self.wind_direction_deg, self.wind_speed_kt)
    }

    pub fn temperature(&self) -> String {
        match self.source {
            WindsAloftSource::Estimated => format!("{:.1}°C (estimated)", self.temperature_c),
            WindsAloftSource::Fallback => format!("{}°C", self.temperature_c),
        }
    }
}
