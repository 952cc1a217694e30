//! Server configuration from environment.

use std::env;

use quadsim_core::{DEFAULT_CAMERA_SPEED, DEFAULT_COPTER_SPEED};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Copter interpolation speed, length units per second.
    pub copter_speed: f64,
    /// Camera interpolation speed, length units per second.
    pub camera_speed: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("QUADSIM_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(9990),
            copter_speed: env::var("QUADSIM_COPTER_SPEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| *v > 0.0)
                .unwrap_or(DEFAULT_COPTER_SPEED),
            camera_speed: env::var("QUADSIM_CAMERA_SPEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| *v > 0.0)
                .unwrap_or(DEFAULT_CAMERA_SPEED),
        }
    }
}
