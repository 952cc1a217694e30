//! API routes for the simulation server.

pub mod dictionary;
pub mod frame;
pub mod view;
pub mod ws;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/command", get(ws::ws_handler))
        .route("/v1/commands", get(dictionary::list_commands))
        .route("/v1/frame", post(frame::advance_frame))
        .route("/v1/state", get(frame::get_state))
        .route("/v1/view", post(view::set_view))
}
