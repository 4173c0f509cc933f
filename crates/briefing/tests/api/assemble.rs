use crate::helpers::{healthy_sources, mock_hourly_series, mock_station, MockWeatherSources};
use time::{macros::datetime, OffsetDateTime};
use wx_briefing::{
    assemble_at, AltitudePair, AssembleOptions, BriefingEntry, BriefingRequest, StopKind,
};
use wx_sources::{SourceError, WindsAloftSource};

const NOW: OffsetDateTime = datetime!(2026-10-18 09:05 UTC);

fn request(station: &str, takeoff: &str) -> BriefingRequest {
    BriefingRequest {
        station: station.to_string(),
        takeoff: takeoff.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn departure_and_destination_are_briefed_in_order() {
    let weather_data = healthy_sources();
    let mut request = request("kden", "2026-10-18 14:30Z");
    request.flight_level = Some(String::from("FL120"));
    request.dest1_station = Some(String::from("KCOS"));
    request.dest1_time = Some(String::from("1615Z"));

    let briefing = assemble_at(&weather_data, &request, AssembleOptions::default(), NOW).await;

    assert_eq!(briefing.warnings().count(), 0);
    let stops: Vec<_> = briefing.stops().collect();
    assert_eq!(stops.len(), 2);

    let departure = stops[0];
    assert_eq!(departure.kind, StopKind::Departure);
    assert_eq!(departure.station_id, "KDEN");
    assert_eq!(departure.time, datetime!(2026-10-18 14:30 UTC));
    assert_eq!(
        departure.altitudes,
        Some(AltitudePair {
            pressure_altitude_ft: 5630,
            density_altitude_ft: 7293,
        })
    );
    let winds = departure.winds_aloft.as_ref().unwrap();
    assert_eq!(winds.source, WindsAloftSource::Estimated);
    assert_eq!(winds.temperature_c, -10.0);

    let destination = stops[1];
    assert_eq!(destination.kind, StopKind::Destination(1));
    assert_eq!(destination.time, datetime!(2026-10-18 16:15 UTC));
    let open_meteo = destination.forecasts.open_meteo.as_ref().unwrap();
    assert_eq!(open_meteo.temperature_c, 16.0);
    assert_eq!(open_meteo.sky_condition, "SKC");

    let labels: Vec<_> = briefing.route.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Takeoff: KDEN", "Dest 1: KCOS"]);
}

#[tokio::test]
async fn destination_winds_aloft_default_to_takeoff_time() {
    let weather_data = healthy_sources();
    let mut request = request("KDEN", "2026-10-18 14:30Z");
    request.flight_level = Some(String::from("FL120"));
    request.dest1_station = Some(String::from("KCOS"));
    request.dest1_time = Some(String::from("2026-10-18 16:15Z"));

    let briefing = assemble_at(&weather_data, &request, AssembleOptions::default(), NOW).await;
    let destination = briefing.stops().nth(1).unwrap();
    assert_eq!(destination.winds_aloft.as_ref().unwrap().temperature_c, -10.0);

    let weather_data = healthy_sources();
    let options = AssembleOptions {
        winds_aloft_at_arrival: true,
    };
    let briefing = assemble_at(&weather_data, &request, options, NOW).await;
    let destination = briefing.stops().nth(1).unwrap();
    assert_eq!(destination.winds_aloft.as_ref().unwrap().temperature_c, -8.0);
}

#[tokio::test]
async fn unlocated_station_skips_every_other_lookup() {
    let mut weather_data = MockWeatherSources::new();
    weather_data
        .expect_station()
        .times(1)
        .returning(|station_id| Err(SourceError::Status {
            status: 404,
            url: format!("https://api.weather.gov/stations/{}", station_id),
        }));
    weather_data.expect_metar().never();
    weather_data.expect_taf().never();
    weather_data.expect_hourly_series().never();
    weather_data.expect_ndfd_forecast().never();

    let mut request = request("KZZZ", "1430Z");
    request.flight_level = Some(String::from("FL085"));
    let briefing = assemble_at(&weather_data, &request, AssembleOptions::default(), NOW).await;

    let stop = briefing.stops().next().unwrap();
    assert!(stop.station.is_none());
    assert!(stop.metar.is_none());
    assert!(stop.taf.is_none());
    assert!(stop.forecasts.is_empty());
    assert!(stop.altitudes.is_none());
    assert!(stop.winds_aloft.is_none());
    assert!(briefing.route.is_empty());
}

#[tokio::test]
async fn model_data_stands_in_for_missing_metar() {
    let mut weather_data = MockWeatherSources::new();
    weather_data
        .expect_station()
        .returning(|station_id| Ok(mock_station(station_id)));
    weather_data
        .expect_metar()
        .returning(|station_id| Err(SourceError::NoReport(station_id.to_string())));
    weather_data
        .expect_taf()
        .returning(|station_id| Err(SourceError::NoReport(station_id.to_string())));
    weather_data
        .expect_hourly_series()
        .returning(|_, _| Ok(mock_hourly_series()));
    weather_data
        .expect_ndfd_forecast()
        .returning(|_, _, _| Err(SourceError::Upstream(String::from("point outside grid"))));

    let briefing = assemble_at(
        &weather_data,
        &request("KDEN", "2026-10-18 14:30Z"),
        AssembleOptions::default(),
        NOW,
    )
    .await;

    let stop = briefing.stops().next().unwrap();
    assert!(stop.metar.is_none());
    assert!(stop.taf.is_none());
    assert!(stop.forecasts.ndfd.is_none());
    assert_eq!(stop.weather.temperature_c, Some(14.0));
    assert_eq!(stop.weather.altimeter_inhg, Some(29.92));
    assert_eq!(
        stop.altitudes,
        Some(AltitudePair {
            pressure_altitude_ft: 5430,
            density_altitude_ft: 6613,
        })
    );
    assert!(stop.winds_aloft.is_none());
}

#[tokio::test]
async fn winds_aloft_fall_back_when_model_is_unavailable() {
    let mut weather_data = MockWeatherSources::new();
    weather_data
        .expect_station()
        .returning(|station_id| Ok(mock_station(station_id)));
    weather_data
        .expect_metar()
        .returning(|_| Ok(crate::helpers::mock_metar()));
    weather_data
        .expect_taf()
        .returning(|_| Ok(String::from("TAF KDEN 181120Z 1812/1912 18012KT P6SM FEW080")));
    weather_data
        .expect_hourly_series()
        .returning(|_, _| Err(SourceError::Status {
            status: 503,
            url: String::from("https://api.open-meteo.com/v1/forecast"),
        }));
    weather_data
        .expect_ndfd_forecast()
        .returning(|_, _, _| Ok(crate::helpers::mock_ndfd()));

    let mut request = request("KDEN", "1430Z");
    request.flight_level = Some(String::from("fl085"));
    let briefing = assemble_at(&weather_data, &request, AssembleOptions::default(), NOW).await;

    assert_eq!(briefing.flight_level.as_ref().unwrap().text, "FL085");
    let stop = briefing.stops().next().unwrap();
    assert!(stop.forecasts.open_meteo.is_none());
    assert!(stop.forecasts.ndfd.is_some());
    let winds = stop.winds_aloft.as_ref().unwrap();
    assert_eq!(winds.source, WindsAloftSource::Fallback);
    assert_eq!(winds.wind(), "250° at 40 kt");
}

#[tokio::test]
async fn malformed_inputs_become_warnings_in_report_order() {
    let weather_data = healthy_sources();
    let mut request = request("KDEN", "14:30");
    request.flight_level = Some(String::from("FLABC"));
    request.dest1_station = Some(String::from("KCOS"));
    request.dest1_time = Some(String::from("4pm"));
    request.dest2_station = Some(String::from("  "));
    request.dest2_time = Some(String::from("1700Z"));
    request.dest3_station = Some(String::from("KCOS"));
    request.dest3_time = Some(String::from("1800Z"));

    let briefing = assemble_at(&weather_data, &request, AssembleOptions::default(), NOW).await;

    assert!(briefing.flight_level.is_none());
    let warnings: Vec<_> = briefing.warnings().collect();
    assert_eq!(
        warnings,
        vec![
            "Invalid flight level format: FLABC",
            "Invalid takeoff time format for KDEN. Use HHMMZ or YYYY-MM-DD HH:MMZ.",
            "Invalid time format for KCOS. Use HHMMZ.",
        ]
    );
    assert!(matches!(briefing.entries.last(), Some(BriefingEntry::Stop(stop)) if stop.kind == StopKind::Destination(3)));
    assert_eq!(briefing.stops().count(), 1);
}

#[tokio::test]
async fn destination_with_blank_time_is_skipped_silently() {
    let mut weather_data = MockWeatherSources::new();
    weather_data
        .expect_station()
        .withf(|station_id| station_id.to_string() == "KDEN")
        .times(1)
        .returning(|station_id| Ok(mock_station(station_id)));
    weather_data
        .expect_metar()
        .returning(|_| Ok(crate::helpers::mock_metar()));
    weather_data
        .expect_taf()
        .returning(|station_id| Err(SourceError::NoReport(station_id.to_string())));
    weather_data
        .expect_hourly_series()
        .returning(|_, _| Ok(mock_hourly_series()));
    weather_data
        .expect_ndfd_forecast()
        .returning(|_, _, _| Ok(crate::helpers::mock_ndfd()));

    let mut request = request("KDEN", "2026-10-18 14:30Z");
    request.dest1_station = Some(String::from("KCOS"));
    request.dest1_time = Some(String::from("  "));

    let briefing = assemble_at(&weather_data, &request, AssembleOptions::default(), NOW).await;

    assert_eq!(briefing.warnings().count(), 0);
    assert!(briefing
        .stops()
        .all(|stop| stop.kind != StopKind::Destination(1)));
    assert_eq!(briefing.route.len(), 1);
    assert_eq!(briefing.route[0].label, "Takeoff: KDEN");
    assert_eq!(briefing.destinations_start, briefing.entries.len());
}

#[tokio::test]
async fn destination_entries_start_after_departure_entry() {
    let weather_data = healthy_sources();
    let mut request = request("KDEN", "bad");
    request.flight_level = Some(String::from("FLX"));
    request.dest1_station = Some(String::from("KCOS"));
    request.dest1_time = Some(String::from("4pm"));

    let briefing = assemble_at(&weather_data, &request, AssembleOptions::default(), NOW).await;

    assert_eq!(briefing.entries.len(), 3);
    assert_eq!(briefing.destinations_start, 2);
    assert!(matches!(
        &briefing.entries[2],
        BriefingEntry::Warning(message) if message == "Invalid time format for KCOS. Use HHMMZ."
    ));
}
