use crate::{
    briefing_handler, create_briefing, index_handler, routes, AltitudePair, AssembleOptions,
    Briefing, BriefingEntry, BriefingRequest, FlightLevel, ReconciledWeather, RoutePoint,
    StopBriefing, StopKind,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};
use wx_sources::{
    Endpoints, HttpFetcher, Metar, ModelForecasts, NdfdForecast, OpenMeteoForecast, Station,
    WeatherClient, WeatherSource, WindsAloft, WindsAloftSource,
};

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub remote_url: String,
    pub weather: Arc<dyn WeatherSource>,
    pub options: AssembleOptions,
}

#[derive(OpenApi)]
#[openapi(
    paths(routes::api::briefing::create_briefing),
    components(
        schemas(
            BriefingRequest,
            Briefing,
            BriefingEntry,
            StopBriefing,
            StopKind,
            RoutePoint,
            FlightLevel,
            AltitudePair,
            ReconciledWeather,
            Station,
            Metar,
            ModelForecasts,
            OpenMeteoForecast,
            NdfdForecast,
            WindsAloft,
            WindsAloftSource
        )
    ),
    tags(
        (name = "wx briefing api", description = "a RESTful api that assembles METAR, TAF and model forecast data into a preflight weather briefing")
    )
)]
struct ApiDoc;

pub fn build_app_state(
    remote_url: String,
    static_dir: String,
    user_agent: String,
    request_timeout: Duration,
    endpoints: Endpoints,
    options: AssembleOptions,
) -> Result<AppState, anyhow::Error> {
    let fetcher = HttpFetcher::new(&user_agent, request_timeout)
        .map_err(|e| anyhow!("error setting up http client: {}", e))?;
    let weather = Arc::new(WeatherClient::new(fetcher, endpoints));

    Ok(AppState {
        static_dir,
        remote_url,
        weather,
        options,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let serve_static = ServeDir::new(&app_state.static_dir);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // UI routes
        .route("/", get(index_handler).post(briefing_handler))
        // API routes
        .route("/api/briefing", post(create_briefing))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .nest_service("/static", serve_static)
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
