use maud::{html, Markup};
use std::fmt::Display;
use wx_sources::{Metar, ModelForecasts, NdfdForecast, OpenMeteoForecast, WindsAloft, TAF_UNAVAILABLE};

use crate::{format_zulu, AltitudePair, FlightLevel, StopBriefing, StopKind};

pub fn display_or_na<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// One stop of the briefing: observation, forecast text, model data and derived values
pub fn station_section(stop: &StopBriefing, flight_level: Option<&FlightLevel>) -> Markup {
    let time = format_zulu(stop.time);
    let (box_class, forecast_heading) = match stop.kind {
        StopKind::Departure => ("box stop-departure", "Forecast at Takeoff Time (Model Data)"),
        StopKind::Destination(_) => ("box stop-destination", "Forecast at Arrival Time (Model Data)"),
    };

    html! {
        div class=(box_class) data-station-id=(stop.station_id) {
            @match stop.kind {
                StopKind::Departure => {
                    h3 class="title is-5 mb-1" { "Departure Station: " (stop.station_id) }
                    p class="subtitle is-6 mb-4" { "Takeoff: " (time) }
                }
                StopKind::Destination(index) => {
                    h3 class="title is-5 mb-4" {
                        "Destination " (index) ": " (stop.station_id) " at " (time)
                    }
                }
            }

            @if stop.station.is_none() {
                div class="notification is-warning is-light" {
                    "Station location unavailable, weather lookups were skipped."
                }
            }

            div class="columns is-multiline" {
                div class="column is-full-mobile is-half-desktop" {
                    (metar_block(stop.metar.as_ref()))
                }
                div class="column is-full-mobile is-half-desktop" {
                    h4 class="title is-6 mb-2" { "TAF Forecast" }
                    pre class="taf-text" { (stop.taf.as_deref().unwrap_or(TAF_UNAVAILABLE)) }
                }
            }

            h4 class="title is-6 mt-4 mb-2" { (forecast_heading) }
            (forecasts_block(&stop.forecasts))

            h4 class="title is-6 mt-4 mb-2" { "Altitude Calculations" }
            (altitudes_block(stop.altitudes.as_ref()))

            @if let (Some(winds), Some(flight_level)) = (stop.winds_aloft.as_ref(), flight_level) {
                h4 class="title is-6 mt-4 mb-2" { "Winds & Temps at " (flight_level.text) }
                (winds_block(winds))
            }
        }
    }
}

fn metar_block(metar: Option<&Metar>) -> Markup {
    let rows = [
        ("Report Time", metar.and_then(|m| m.report_time.clone())),
        ("Temperature", metar.and_then(|m| m.temperature_c.clone())),
        ("Dewpoint", metar.and_then(|m| m.dewpoint_c.clone())),
        ("Altimeter", metar.and_then(|m| m.altimeter_inhg.clone())),
        ("Wind", metar.and_then(Metar::wind_summary)),
        ("Visibility", metar.and_then(|m| m.visibility_sm.clone())),
        ("Sky Condition", metar.and_then(|m| m.sky_condition.clone())),
    ];

    html! {
        h4 class="title is-6 mb-2" { "METAR Conditions" }
        @if let Some(raw) = metar.and_then(|m| m.raw_text.as_deref()) {
            pre class="metar-text mb-2" { (raw) }
        }
        (field_table("metar", &rows))
    }
}

fn forecasts_block(forecasts: &ModelForecasts) -> Markup {
    html! {
        @if forecasts.is_empty() {
            p class="has-text-grey" { "No model data available." }
        }
        div class="columns" {
            @if let Some(open_meteo) = forecasts.open_meteo.as_ref() {
                div class="column" {
                    h5 class="is-size-6 has-text-weight-semibold" { "Open-Meteo" }
                    (open_meteo_table(open_meteo))
                }
            }
            @if let Some(ndfd) = forecasts.ndfd.as_ref() {
                div class="column" {
                    h5 class="is-size-6 has-text-weight-semibold" { "NDFD" }
                    (ndfd_table(ndfd))
                }
            }
        }
    }
}

fn open_meteo_table(forecast: &OpenMeteoForecast) -> Markup {
    let rows = [
        ("Temperature", Some(format!("{}°C", forecast.temperature_c))),
        ("Dewpoint", Some(format!("{}°C", forecast.dewpoint_c))),
        ("Altimeter", Some(forecast.altimeter_inhg.to_string())),
        (
            "Wind",
            Some(format!(
                "{}° at {} kt",
                forecast.wind_direction_deg, forecast.wind_speed_kt
            )),
        ),
        ("Visibility", forecast.visibility_km.map(|v| format!("{} km", v))),
        ("Sky Condition", Some(forecast.sky_condition.clone())),
    ];
    field_table("model", &rows)
}

fn ndfd_table(forecast: &NdfdForecast) -> Markup {
    let rows = [
        ("Temperature", forecast.temperature_f.as_ref().map(|t| format!("{}°F", t))),
        ("Wind", forecast.wind_summary()),
        (
            "Sky Condition",
            forecast
                .cloud_amount_pct
                .as_ref()
                .map(|sky| format!("{}% cloud cover", sky)),
        ),
    ];
    field_table("model", &rows)
}

fn altitudes_block(altitudes: Option<&AltitudePair>) -> Markup {
    let rows = [
        (
            "Pressure Altitude",
            altitudes.map(|a| format!("{} ft", a.pressure_altitude_ft)),
        ),
        (
            "Density Altitude",
            altitudes.map(|a| format!("{} ft", a.density_altitude_ft)),
        ),
    ];
    field_table("altitudes", &rows)
}

fn winds_block(winds: &WindsAloft) -> Markup {
    html! {
        h5 class="is-size-6 has-text-weight-semibold" { (winds.source.label()) }
        (field_table("winds-aloft", &[
            ("Wind", Some(winds.wind())),
            ("Temperature", Some(winds.temperature())),
        ]))
    }
}

fn field_table(class: &str, rows: &[(&str, Option<String>)]) -> Markup {
    html! {
        table class={"table is-narrow is-fullwidth briefing-fields " (class)} {
            tbody {
                @for (name, value) in rows {
                    tr {
                        th { (name) }
                        td { (display_or_na(value.as_deref())) }
                    }
                }
            }
        }
    }
}
