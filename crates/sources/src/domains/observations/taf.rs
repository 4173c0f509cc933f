use crate::{non_blank, parse_awc_response, SourceError};

/// Shown in place of the forecast text whenever no TAF could be fetched
pub const TAF_UNAVAILABLE: &str = "TAF data unavailable.";

/// Raw text of the most recent TAF, trimmed
pub fn parse_taf(station_id: &str, xml: &str) -> Result<String, SourceError> {
    let response = parse_awc_response(xml)?;
    response
        .data
        .tafs
        .into_iter()
        .next()
        .and_then(|taf| non_blank(taf.raw_text))
        .ok_or_else(|| SourceError::NoReport(station_id.to_string()))
}
