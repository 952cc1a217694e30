//! Remote client connection status.

use chrono::{DateTime, Utc};

/// Tracks whether a remote client is currently connected.
///
/// Last-write-wins, no debouncing. Disconnecting does not clear the
/// command queue or reset destinations; in-flight motion continues.
#[derive(Debug, Default)]
pub struct SessionTracker {
    connected: bool,
    connected_since: Option<DateTime<Utc>>,
}

impl SessionTracker {
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        self.connected_since = if connected { Some(Utc::now()) } else { None };
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// When the current connection was established, if any.
    pub fn connected_since(&self) -> Option<DateTime<Utc>> {
        self.connected_since
    }
}
