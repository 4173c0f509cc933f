use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::SourceError;

pub const FEET_PER_METER: f64 = 3.28084;

/// A resolved airport location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Station {
    pub station_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_ft: i64,
}

// https://api.weather.gov/stations/KDEN
#[derive(Debug, Default, Deserialize)]
struct StationResponse {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<StationProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct StationProperties {
    #[serde(default)]
    elevation: Option<QuantitativeValue>,
}

#[derive(Debug, Default, Deserialize)]
struct QuantitativeValue {
    #[serde(default)]
    value: Option<f64>,
}

/// Extracts coordinates and elevation from an NWS station document.
///
/// GeoJSON coordinates are `[lon, lat]`; a missing elevation counts as 0 ft.
pub fn parse_station(station_id: &str, body: &str) -> Result<Station, SourceError> {
    let response: StationResponse = serde_json::from_str(body)?;
    let coordinates = response
        .geometry
        .map(|g| g.coordinates)
        .unwrap_or_default();
    if coordinates.len() < 2 {
        return Err(SourceError::MissingField("geometry.coordinates"));
    }

    let elevation_m = response
        .properties
        .and_then(|p| p.elevation)
        .and_then(|e| e.value)
        .unwrap_or(0.0);

    Ok(Station {
        station_id: station_id.to_string(),
        latitude: coordinates[1],
        longitude: coordinates[0],
        elevation_ft: (elevation_m * FEET_PER_METER).round() as i64,
    })
}
