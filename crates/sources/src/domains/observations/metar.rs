use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{non_blank, parse_awc_response, MetarRecord, SkyCondition, SourceError};

/// Latest surface observation for a station.
///
/// Values are kept as the upstream text; numeric parsing happens during
/// reconciliation so an odd value never hides the rest of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Metar {
    pub raw_text: Option<String>,
    pub report_time: Option<String>,
    pub temperature_c: Option<String>,
    pub dewpoint_c: Option<String>,
    pub altimeter_inhg: Option<String>,
    pub wind_direction_deg: Option<String>,
    pub wind_speed_kt: Option<String>,
    pub visibility_sm: Option<String>,
    pub sky_condition: Option<String>,
}

impl From<MetarRecord> for Metar {
    fn from(val: MetarRecord) -> Self {
        Metar {
            raw_text: non_blank(val.raw_text),
            report_time: non_blank(val.observation_time),
            temperature_c: non_blank(val.temp_c),
            dewpoint_c: non_blank(val.dewpoint_c),
            altimeter_inhg: non_blank(val.altim_in_hg),
            wind_direction_deg: non_blank(val.wind_dir_degrees),
            wind_speed_kt: non_blank(val.wind_speed_kt),
            visibility_sm: non_blank(val.visibility_statute_mi),
            sky_condition: sky_summary(&val.sky_condition),
        }
    }
}

impl Metar {
    /// `"{dir}° at {speed} kt"`, with N/A standing in for a missing half
    pub fn wind_summary(&self) -> Option<String> {
        if self.wind_direction_deg.is_none() && self.wind_speed_kt.is_none() {
            return None;
        }
        Some(format!(
            "{}° at {} kt",
            self.wind_direction_deg.as_deref().unwrap_or("N/A"),
            self.wind_speed_kt.as_deref().unwrap_or("N/A")
        ))
    }
}

/// Joins every reported layer as `"{cover} at {base} ft"`
pub fn sky_summary(layers: &[SkyCondition]) -> Option<String> {
    let described: Vec<String> = layers
        .iter()
        .filter_map(|layer| {
            let cover = non_blank(layer.sky_cover.clone())?;
            Some(match non_blank(layer.cloud_base_ft_agl.clone()) {
                Some(base) => format!("{} at {} ft", cover, base),
                // CLR/SKC layers carry no base
                None => cover,
            })
        })
        .collect();

    if described.is_empty() {
        None
    } else {
        Some(described.join(", "))
    }
}

/// Takes the most recent METAR out of a data server response
pub fn parse_metar(station_id: &str, xml: &str) -> Result<Metar, SourceError> {
    let response = parse_awc_response(xml)?;
    response
        .data
        .metars
        .into_iter()
        .next()
        .map(Metar::from)
        .ok_or_else(|| SourceError::NoReport(station_id.to_string()))
}
