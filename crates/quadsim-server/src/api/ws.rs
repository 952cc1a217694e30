//! WebSocket command transport.
//!
//! One text frame carries one protocol command line. Parse failures are
//! answered immediately on this socket; commands that parse are queued,
//! and their responses arrive later on the same socket, once the frame
//! loop actually dispatches them.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use tokio::sync::broadcast;

use crate::state::AppState;

/// Handler for command WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    state.with_sim(|sim| sim.session.set_connected(true));
    tracing::info!("command client connected");

    let mut rx = state.tx.subscribe();

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(raw))) => {
                        let rejection = state.with_sim(|sim| sim.receive(&raw));
                        match rejection {
                            Some(resp) => {
                                tracing::warn!("rejected '{}': {}", raw.trim(), resp.wire());
                                if socket.send(Message::Text(resp.wire().to_string())).await.is_err() {
                                    break;
                                }
                            }
                            None => tracing::debug!("queued '{}'", raw.trim()),
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }
            dispatched = rx.recv() => {
                match dispatched {
                    Ok(msg) => {
                        if socket.send(Message::Text(msg)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Missed responses; keep forwarding the rest.
                        continue;
                    }
                    Err(_) => break,
                }
            }
        }
    }

    state.with_sim(|sim| sim.session.set_connected(false));
    tracing::info!("command client disconnected");
}
