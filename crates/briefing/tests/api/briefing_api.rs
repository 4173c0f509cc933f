use crate::helpers::{healthy_sources, spawn_app, spawn_app_with_options, MockWeatherSources};
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use hyper::{header, Method, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wx_briefing::{AssembleOptions, Briefing, StopKind};

fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/briefing")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn api_returns_briefing_json() {
    let test_app = spawn_app(Arc::new(healthy_sources())).await;

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(json!({
            "station": "KDEN",
            "takeoff": "2026-10-18 14:30Z",
            "flight_level": "FL120",
            "dest1_station": "KCOS",
            "dest1_time": "2026-10-18 16:15Z"
        })))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let briefing: Briefing = serde_json::from_slice(&body).unwrap();

    assert_eq!(briefing.flight_level.as_ref().unwrap().altitude_ft, 12000);
    let kinds: Vec<_> = briefing.stops().map(|stop| stop.kind).collect();
    assert_eq!(kinds, vec![StopKind::Departure, StopKind::Destination(1)]);
    assert_eq!(briefing.route.len(), 2);

    let raw: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(raw["entries"][0]["stop"]["kind"], "departure");
    assert_eq!(raw["entries"][0]["stop"]["time"], "2026-10-18T14:30:00Z");
    assert_eq!(raw["entries"][1]["stop"]["kind"]["destination"], 1);
}

#[tokio::test]
async fn arrival_time_winds_aloft_option_is_applied() {
    let test_app = spawn_app_with_options(
        Arc::new(healthy_sources()),
        AssembleOptions {
            winds_aloft_at_arrival: true,
        },
    )
    .await;

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(json!({
            "station": "KDEN",
            "takeoff": "2026-10-18 14:30Z",
            "flight_level": "FL120",
            "dest1_station": "KCOS",
            "dest1_time": "2026-10-18 16:15Z"
        })))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let briefing: Briefing = serde_json::from_slice(&body).unwrap();
    let temperatures: Vec<_> = briefing
        .stops()
        .filter_map(|stop| stop.winds_aloft.as_ref().map(|w| w.temperature_c))
        .collect();
    assert_eq!(temperatures, vec![-10.0, -8.0]);
}

#[tokio::test]
async fn blank_station_is_rejected() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(json!({
            "station": " ",
            "takeoff": "1430Z"
        })))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn api_docs_list_briefing_path() {
    let test_app = spawn_app(Arc::new(MockWeatherSources::new())).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/docs")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("api/briefing"));
}
