use crate::helpers::{healthy_sources, spawn_app, MockWeatherSources};
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use hyper::{header, Method, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn form_request(form: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// The request form should not touch any upstream source
#[tokio::test]
async fn index_renders_request_form() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let html = body_text(response).await;
    assert!(html.contains("name=\"station\""));
    assert!(html.contains("name=\"takeoff\""));
    assert!(html.contains("name=\"flight_level\""));
    assert!(html.contains("name=\"dest3_station\""));
    assert!(html.contains("name=\"dest3_time\""));
}

#[tokio::test]
async fn form_submission_renders_briefing() {
    let test_app = spawn_app(Arc::new(healthy_sources())).await;

    let response = test_app
        .app
        .clone()
        .oneshot(form_request(
            "station=KDEN&takeoff=2026-10-18+14%3A30Z&flight_level=FL120\
             &dest1_station=KCOS&dest1_time=2026-10-18+16%3A15Z\
             &dest2_station=&dest2_time=&dest3_station=&dest3_time=",
        ))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.contains("Departure Station: KDEN"));
    assert!(html.contains("Takeoff: 2026-10-18 14:30Z"));
    assert!(html.contains("Destination Briefings"));
    assert!(html.contains("Destination 1: KCOS at 2026-10-18 16:15Z"));
    assert!(html.contains("KDEN 181453Z 18012KT 10SM FEW080 18/02 A2972"));
    assert!(html.contains("TAF KCOS"));
    assert!(html.contains("<td>5630 ft</td>"));
    assert!(html.contains("<td>7293 ft</td>"));
    assert!(html.contains("Winds &amp; Temps at FL120"));
    assert!(html.contains("HRRR (est)"));
    assert!(html.contains("-10.0°C (estimated)"));
    assert!(html.contains("Takeoff: KDEN"));
    assert!(html.contains("Dest 1: KCOS"));

    let departure = html.find("Departure Station: KDEN").unwrap();
    let destination = html.find("Destination 1: KCOS").unwrap();
    assert!(departure < destination);
}

#[tokio::test]
async fn failed_lookups_render_as_not_available() {
    let mut weather_data = MockWeatherSources::new();
    weather_data.expect_station().returning(|station_id| {
        Err(wx_sources::SourceError::NoReport(station_id.to_string()))
    });

    let test_app = spawn_app(Arc::new(weather_data)).await;

    let response = test_app
        .app
        .clone()
        .oneshot(form_request("station=KZZZ&takeoff=1430Z&flight_level=FL%3F"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Invalid flight level format: FL?"));
    assert!(html.contains("Station location unavailable"));
    assert!(html.contains("<td>N/A</td>"));
    assert!(html.contains("TAF data unavailable."));
    assert!(html.contains("No stations could be located for the route map."));
    assert!(!html.contains("Destination Briefings"));
}

#[tokio::test]
async fn blank_takeoff_is_rejected() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let response = test_app
        .app
        .clone()
        .oneshot(form_request("station=KDEN&takeoff=++"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "takeoff time is required");
}
