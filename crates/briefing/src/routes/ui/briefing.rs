use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form,
};
use log::warn;

use crate::{assemble, templates::briefing_page, AppState, BriefingRequest};

/// Handler for the form submission (POST /)
pub async fn briefing_handler(
    State(state): State<Arc<AppState>>,
    Form(request): Form<BriefingRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    request.validate().map_err(|e| {
        warn!("rejected briefing form: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let briefing = assemble(state.weather.as_ref(), &request, state.options).await;
    Ok(Html(briefing_page(&state.remote_url, &briefing).into_string()))
}
