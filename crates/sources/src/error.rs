/// Why a single upstream source produced nothing.
///
/// Callers degrade the affected field to absent; the variant is kept so the
/// cause can be logged.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("failed to parse xml: {0}")]
    Xml(#[from] serde_xml_rs::Error),
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to format time: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid station identifier: {0:?}")]
    InvalidStation(String),
    #[error("no report available for {0}")]
    NoReport(String),
    #[error("hour {0} not present in hourly series")]
    MissingHour(String),
    #[error("missing field in upstream response: {0}")]
    MissingField(&'static str),
    #[error("upstream error response: {0}")]
    Upstream(String),
}
