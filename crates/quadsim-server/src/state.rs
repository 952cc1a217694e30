//! Shared application state.

use std::sync::Mutex;

use quadsim_core::SimulationState;
use tokio::sync::broadcast;

use crate::config::Config;

/// One simulation behind one mutex.
///
/// Enqueue (WebSocket task) and tick/dispatch (frame endpoint) both go
/// through the same lock, so no command is ever examined concurrently
/// with a tick. Dispatch-time responses fan out over the broadcast
/// channel to whichever command connection is listening.
pub struct AppState {
    sim: Mutex<SimulationState>,
    pub tx: broadcast::Sender<String>,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            sim: Mutex::new(SimulationState::new(config.copter_speed, config.camera_speed)),
            tx,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `f` with exclusive access to the simulation.
    pub fn with_sim<R>(&self, f: impl FnOnce(&mut SimulationState) -> R) -> R {
        let mut sim = self.sim.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut sim)
    }
}
