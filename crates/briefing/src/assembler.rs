use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use wx_sources::{
    model_forecasts, winds_aloft, Metar, ModelForecasts, SourceError, Station, WeatherSource,
    WindsAloft,
};

use crate::{
    calculate_altitudes, parse_flight_level, parse_zulu_time_at, reconcile, AltitudePair,
    FlightLevel, FlightLevelInput, ReconciledWeather,
};

pub const MAX_DESTINATIONS: u8 = 3;

/// A briefing request, field names match the HTML form
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BriefingRequest {
    /// Departure station, e.g. `KDEN`
    pub station: String,
    /// `HHMMZ` or `YYYY-MM-DD HH:MMZ`
    pub takeoff: String,
    /// `FL` followed by the flight level, e.g. `FL085`
    #[serde(default)]
    pub flight_level: Option<String>,
    #[serde(default)]
    pub dest1_station: Option<String>,
    #[serde(default)]
    pub dest1_time: Option<String>,
    #[serde(default)]
    pub dest2_station: Option<String>,
    #[serde(default)]
    pub dest2_time: Option<String>,
    #[serde(default)]
    pub dest3_station: Option<String>,
    #[serde(default)]
    pub dest3_time: Option<String>,
}

/// A request that cannot produce a briefing at all
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("departure station is required")]
    MissingStation,
    #[error("takeoff time is required")]
    MissingTakeoff,
}

impl BriefingRequest {
    /// Only blank required fields are rejected; malformed values become report warnings
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.station.trim().is_empty() {
            return Err(RequestError::MissingStation);
        }
        if self.takeoff.trim().is_empty() {
            return Err(RequestError::MissingTakeoff);
        }
        Ok(())
    }

    pub fn departure_station(&self) -> String {
        self.station.trim().to_uppercase()
    }

    /// (index, station, time) for each destination slot, blank values as empty strings
    pub fn destinations(&self) -> Vec<(u8, String, String)> {
        [
            (&self.dest1_station, &self.dest1_time),
            (&self.dest2_station, &self.dest2_time),
            (&self.dest3_station, &self.dest3_time),
        ]
        .into_iter()
        .zip(1..=MAX_DESTINATIONS)
        .map(|((station, time), index)| {
            (
                index,
                station.as_deref().unwrap_or_default().trim().to_uppercase(),
                time.as_deref().unwrap_or_default().trim().to_string(),
            )
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleOptions {
    /// Estimate destination winds aloft at the arrival time instead of the takeoff time
    pub winds_aloft_at_arrival: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Departure,
    Destination(u8),
}

impl StopKind {
    pub fn route_label(&self, station_id: &str) -> String {
        match self {
            StopKind::Departure => format!("Takeoff: {}", station_id),
            StopKind::Destination(index) => format!("Dest {}: {}", index, station_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub kind: StopKind,
}

/// Everything known about one stop of the route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StopBriefing {
    pub kind: StopKind,
    pub station_id: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub time: OffsetDateTime,
    /// Absent when the station could not be located, in which case nothing else was fetched
    pub station: Option<Station>,
    pub metar: Option<Metar>,
    pub taf: Option<String>,
    pub forecasts: ModelForecasts,
    pub weather: ReconciledWeather,
    pub altitudes: Option<AltitudePair>,
    pub winds_aloft: Option<WindsAloft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BriefingEntry {
    Warning(String),
    Stop(Box<StopBriefing>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Briefing {
    pub flight_level: Option<FlightLevel>,
    /// Warnings and stops in the order they were produced
    pub entries: Vec<BriefingEntry>,
    /// Index into `entries` where destination processing begins
    pub destinations_start: usize,
    pub route: Vec<RoutePoint>,
}

impl Briefing {
    pub fn stops(&self) -> impl Iterator<Item = &StopBriefing> {
        self.entries.iter().filter_map(|entry| match entry {
            BriefingEntry::Stop(stop) => Some(stop.as_ref()),
            BriefingEntry::Warning(_) => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            BriefingEntry::Warning(warning) => Some(warning.as_str()),
            BriefingEntry::Stop(_) => None,
        })
    }

    fn warn(&mut self, message: String) {
        debug!("briefing warning: {}", message);
        self.entries.push(BriefingEntry::Warning(message));
    }
}

pub async fn assemble(
    source: &dyn WeatherSource,
    request: &BriefingRequest,
    options: AssembleOptions,
) -> Briefing {
    assemble_at(source, request, options, OffsetDateTime::now_utc()).await
}

/// Builds the briefing with short `HHMMZ` times resolved against `now`.
///
/// Never fails: every upstream failure becomes an absent value.
pub async fn assemble_at(
    source: &dyn WeatherSource,
    request: &BriefingRequest,
    options: AssembleOptions,
    now: OffsetDateTime,
) -> Briefing {
    let mut briefing = Briefing::default();

    match parse_flight_level(request.flight_level.as_deref().unwrap_or_default()) {
        FlightLevelInput::Valid(flight_level) => briefing.flight_level = Some(flight_level),
        FlightLevelInput::Invalid(text) => {
            briefing.warn(format!("Invalid flight level format: {}", text))
        }
        FlightLevelInput::None => {}
    }

    let departure = request.departure_station();
    let takeoff = parse_zulu_time_at(request.takeoff.trim(), now);
    info!(
        "building briefing for {} (takeoff {:?}, flight level {:?})",
        departure,
        takeoff,
        briefing.flight_level.as_ref().map(|fl| fl.text.as_str())
    );

    match takeoff {
        Some(takeoff) => {
            brief_stop(
                source,
                &mut briefing,
                StopKind::Departure,
                &departure,
                takeoff,
                Some(takeoff),
            )
            .await
        }
        None => briefing.warn(format!(
            "Invalid takeoff time format for {}. Use HHMMZ or YYYY-MM-DD HH:MMZ.",
            departure
        )),
    }

    briefing.destinations_start = briefing.entries.len();
    for (index, station_id, time_text) in request.destinations() {
        if station_id.is_empty() || time_text.is_empty() {
            continue;
        }
        let Some(arrival) = parse_zulu_time_at(&time_text, now) else {
            briefing.warn(format!(
                "Invalid time format for {}. Use HHMMZ.",
                station_id
            ));
            continue;
        };
        let winds_time = if options.winds_aloft_at_arrival {
            Some(arrival)
        } else {
            takeoff
        };
        brief_stop(
            source,
            &mut briefing,
            StopKind::Destination(index),
            &station_id,
            arrival,
            winds_time,
        )
        .await;
    }

    briefing
}

async fn brief_stop(
    source: &dyn WeatherSource,
    briefing: &mut Briefing,
    kind: StopKind,
    station_id: &str,
    time: OffsetDateTime,
    winds_time: Option<OffsetDateTime>,
) {
    let mut stop = StopBriefing {
        kind,
        station_id: station_id.to_string(),
        time,
        station: None,
        metar: None,
        taf: None,
        forecasts: ModelForecasts::default(),
        weather: ReconciledWeather::default(),
        altitudes: None,
        winds_aloft: None,
    };

    let station = match source.station(station_id).await {
        Ok(station) => station,
        Err(e) => {
            warn!("could not locate station {}, skipping its weather: {}", station_id, e);
            briefing.entries.push(BriefingEntry::Stop(Box::new(stop)));
            return;
        }
    };

    stop.metar = absent_on_error("metar", station_id, source.metar(station_id).await);
    stop.taf = absent_on_error("taf", station_id, source.taf(station_id).await);
    stop.forecasts = model_forecasts(source, station.latitude, station.longitude, time).await;
    stop.weather = reconcile(stop.metar.as_ref(), stop.forecasts.open_meteo.as_ref());
    stop.altitudes = calculate_altitudes(
        Some(station.elevation_ft),
        stop.weather.altimeter_inhg,
        stop.weather.temperature_c,
    );

    if let (Some(flight_level), Some(winds_time)) = (briefing.flight_level.as_ref(), winds_time) {
        stop.winds_aloft = Some(
            winds_aloft(
                source,
                station.latitude,
                station.longitude,
                flight_level.altitude_m,
                winds_time,
            )
            .await,
        );
    }

    briefing.route.push(RoutePoint {
        latitude: station.latitude,
        longitude: station.longitude,
        label: kind.route_label(station_id),
        kind,
    });
    stop.station = Some(station);
    briefing.entries.push(BriefingEntry::Stop(Box::new(stop)));
}

fn absent_on_error<T>(what: &str, station_id: &str, result: Result<T, SourceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(SourceError::NoReport(_)) => {
            debug!("no {} available for {}", what, station_id);
            None
        }
        Err(e) => {
            warn!("error fetching {} for {}: {}", what, station_id, e);
            None
        }
    }
}
