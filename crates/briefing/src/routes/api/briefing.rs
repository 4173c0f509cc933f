use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use log::warn;

use crate::{assemble, AppState, Briefing, BriefingRequest};

#[utoipa::path(
    post,
    path = "api/briefing",
    request_body = BriefingRequest,
    responses(
        (status = OK, description = "Briefing for the departure and each destination, warnings in report order", body = Briefing),
        (status = BAD_REQUEST, description = "Departure station or takeoff time is blank"),
        (status = UNPROCESSABLE_ENTITY, description = "Body is not a briefing request")
    ))]
pub async fn create_briefing(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BriefingRequest>,
) -> Result<Json<Briefing>, (StatusCode, String)> {
    request.validate().map_err(|e| {
        warn!("rejected briefing request: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(Json(
        assemble(state.weather.as_ref(), &request, state.options).await,
    ))
}
