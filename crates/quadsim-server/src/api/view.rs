//! View preset endpoint for the UI buttons.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use quadsim_core::ViewPreset;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub preset: ViewPreset,
}

/// Apply a named view selection. POST /v1/view
pub async fn set_view(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewRequest>,
) -> StatusCode {
    tracing::debug!("view preset: {:?}", request.preset);
    state.with_sim(|sim| sim.set_view(request.preset));
    StatusCode::NO_CONTENT
}
