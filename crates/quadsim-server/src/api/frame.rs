//! Frame tick and state snapshot endpoints.
//!
//! The renderer owns the cadence: one `POST /v1/frame` per rendered
//! frame, carrying its instantaneous frame rate, advances the simulation
//! exactly one tick and returns the fresh snapshot to draw.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use quadsim_core::Snapshot;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FrameRequest {
    /// Ticks per second, must be positive.
    pub fps: f64,
}

/// Advance one tick. POST /v1/frame
pub async fn advance_frame(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FrameRequest>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let outcome = state.with_sim(|sim| sim.tick(request.fps).map(|d| (d, sim.snapshot())));

    match outcome {
        Ok((dispatched, snapshot)) => {
            if let Some(resp) = dispatched {
                tracing::info!("dispatched command: {}", resp.wire());
                // No receiver just means no client is connected right now.
                let _ = state.tx.send(resp.wire().to_string());
            }
            Ok(Json(snapshot))
        }
        Err(err) => Err((StatusCode::UNPROCESSABLE_ENTITY, err.to_string())),
    }
}

/// Read the current snapshot without advancing. GET /v1/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.with_sim(|sim| sim.snapshot()))
}
