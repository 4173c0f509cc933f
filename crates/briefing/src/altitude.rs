use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wx_sources::{Metar, OpenMeteoForecast};

pub const STANDARD_ALTIMETER_INHG: f64 = 29.92;
pub const STANDARD_TEMPERATURE_C: f64 = 15.0;
/// ISA lapse rate, °C per 1000 ft
pub const ISA_LAPSE_RATE_C: f64 = 2.0;
/// Density altitude rule of thumb, ft per °C above ISA
pub const DENSITY_ALTITUDE_FT_PER_C: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AltitudePair {
    pub pressure_altitude_ft: i64,
    pub density_altitude_ft: i64,
}

pub fn calculate_altitudes(
    elevation_ft: Option<i64>,
    altimeter_inhg: Option<f64>,
    temperature_c: Option<f64>,
) -> Option<AltitudePair> {
    let elevation = elevation_ft? as f64;
    let altimeter = altimeter_inhg?;
    let temperature = temperature_c?;

    let pressure_altitude = elevation + (STANDARD_ALTIMETER_INHG - altimeter) * 1000.0;
    let isa_temperature = STANDARD_TEMPERATURE_C - (elevation / 1000.0 * ISA_LAPSE_RATE_C);
    let density_altitude =
        pressure_altitude + DENSITY_ALTITUDE_FT_PER_C * (temperature - isa_temperature);

    Some(AltitudePair {
        pressure_altitude_ft: pressure_altitude.round() as i64,
        density_altitude_ft: density_altitude.round() as i64,
    })
}

/// The single temperature and altimeter value used for the altitude calculations.
///
/// Both are present or both are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconciledWeather {
    pub temperature_c: Option<f64>,
    pub altimeter_inhg: Option<f64>,
}

/// Observed values win over the model; a value that does not parse drops both.
pub fn reconcile(metar: Option<&Metar>, open_meteo: Option<&OpenMeteoForecast>) -> ReconciledWeather {
    let temperature = match metar.and_then(|m| m.temperature_c.as_deref()) {
        Some(text) => text.parse::<f64>().ok(),
        None => open_meteo.map(|f| f.temperature_c),
    };
    let altimeter = match metar.and_then(|m| m.altimeter_inhg.as_deref()) {
        Some(text) => text.parse::<f64>().ok(),
        None => open_meteo.map(|f| f.altimeter_inhg),
    };

    match (temperature, altimeter) {
        (Some(temperature_c), Some(altimeter_inhg)) => ReconciledWeather {
            temperature_c: Some(temperature_c),
            altimeter_inhg: Some(altimeter_inhg),
        },
        _ => ReconciledWeather::default(),
    }
}
