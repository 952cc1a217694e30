//! Motion simulation and tick-driven command dispatch.
//!
//! One external tick source (the renderer) drives everything: each tick
//! advances the camera, lets at most one queued command run if the copter
//! is at rest, then advances the copter. Travel distance per tick is
//! `speed / ticks_per_second`, and arrival tolerance is that same step,
//! so arrival precision is frame-rate-dependent. That is a documented
//! characteristic of the interpolation, not a defect: a slower frame rate
//! snaps into place over a larger distance instead of oscillating forever.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::parse;
use crate::queue::CommandQueue;
use crate::response::Response;
use crate::session::SessionTracker;
use crate::vector::Vec3;

/// Default copter interpolation speed, length units per second.
pub const DEFAULT_COPTER_SPEED: f64 = 1.0;
/// Default camera interpolation speed, length units per second.
pub const DEFAULT_CAMERA_SPEED: f64 = 25.0;

/// Where the camera starts and where the view presets put it.
pub const CAMERA_HOME: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 50.0 };
pub const CAMERA_TOP: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 50.0 };
pub const CAMERA_SIDE: Vec3 = Vec3 { x: 50.0, y: 0.0, z: 3.0 };
pub const CAMERA_CORNER: Vec3 = Vec3 { x: 35.0, y: 35.0, z: 35.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionStatus {
    AtRest,
    InTransit,
}

/// A tracked subject: something with a current position interpolating
/// toward a destination at a fixed speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tracked {
    pub position: Vec3,
    pub destination: Vec3,
    /// Length units per second.
    pub speed: f64,
    pub status: MotionStatus,
}

impl Tracked {
    fn new(position: Vec3, speed: f64) -> Self {
        Self {
            position,
            destination: position,
            speed,
            status: MotionStatus::AtRest,
        }
    }

    /// True when the position is within one tick's travel of the
    /// destination on every axis.
    fn in_position(&self, step: f64) -> bool {
        self.position.within(&self.destination, step)
    }

    /// Move one tick's worth toward the destination.
    fn advance(&mut self, step: f64) {
        if self.in_position(step) {
            self.status = MotionStatus::AtRest;
            return;
        }
        let direction = self.destination - self.position;
        match direction.normalized() {
            Some(unit) => {
                self.position += unit.scaled(step);
                // The move itself may land within tolerance; the status
                // must say so on the arriving tick, not one tick late.
                self.status = if self.in_position(step) {
                    MotionStatus::AtRest
                } else {
                    MotionStatus::InTransit
                };
            }
            // Zero-length direction: already there, nothing to normalize.
            None => self.status = MotionStatus::AtRest,
        }
    }
}

/// Named camera/copter view selections from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPreset {
    Top,
    Side,
    Corner,
    /// Sends the copter destination back to the origin.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ClockError {
    #[error("ticks per second must be a positive number, got {0}")]
    NonPositiveRate(f64),
}

/// Serializable view of the simulation for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub copter_position: Vec3,
    pub copter_destination: Vec3,
    pub copter_status: MotionStatus,
    pub heading_deg: f64,
    pub camera_position: Vec3,
    pub camera_destination: Vec3,
    pub camera_status: MotionStatus,
    pub queue_depth: usize,
    pub connected: bool,
}

/// The whole simulation: copter, camera, heading, pending commands and
/// connection status, threaded explicitly through tick calls.
#[derive(Debug)]
pub struct SimulationState {
    pub copter: Tracked,
    pub camera: Tracked,
    /// Copter heading in degrees, [0, 360). Written by cw/ccw.
    pub heading_deg: f64,
    pub queue: CommandQueue,
    pub session: SessionTracker,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(DEFAULT_COPTER_SPEED, DEFAULT_CAMERA_SPEED)
    }
}

impl SimulationState {
    pub fn new(copter_speed: f64, camera_speed: f64) -> Self {
        Self {
            copter: Tracked::new(Vec3::ZERO, copter_speed),
            camera: Tracked::new(CAMERA_HOME, camera_speed),
            heading_deg: 0.0,
            queue: CommandQueue::new(),
            session: SessionTracker::default(),
        }
    }

    /// Accept one raw command line from the transport.
    ///
    /// Parse failures are answered right away with `Some(error)`. A
    /// successfully parsed command is queued and answered later, when the
    /// dispatcher actually runs it (see [`SimulationState::tick`]); until
    /// then there is nothing to report, so this returns `None`.
    pub fn receive(&mut self, raw: &str) -> Option<Response> {
        match parse(raw) {
            Ok(cmd) => {
                self.queue.push(cmd);
                None
            }
            Err(err) => Some(err.into()),
        }
    }

    /// Advance the simulation by one tick at the given frame rate.
    ///
    /// Order within a tick: camera motion, then at most one command
    /// dispatch gated on the copter being in position, then copter
    /// motion. Dispatching before the copter advance guarantees a command
    /// never runs while the copter is still mid-flight from the previous
    /// one.
    ///
    /// Returns the response of the command dispatched this tick, if any.
    pub fn tick(&mut self, ticks_per_second: f64) -> Result<Option<Response>, ClockError> {
        if !(ticks_per_second > 0.0) {
            return Err(ClockError::NonPositiveRate(ticks_per_second));
        }

        let camera_step = self.camera.speed / ticks_per_second;
        self.camera.advance(camera_step);

        let copter_step = self.copter.speed / ticks_per_second;
        let dispatched = if self.copter.in_position(copter_step) {
            self.try_dispatch()
        } else {
            None
        };

        // Speed may have changed just now; the new step applies immediately.
        let copter_step = self.copter.speed / ticks_per_second;
        self.copter.advance(copter_step);

        Ok(dispatched)
    }

    /// Run the most recently queued command. The command is consumed
    /// whether it succeeds or fails; failures are never retried.
    fn try_dispatch(&mut self) -> Option<Response> {
        let cmd = self.queue.pop()?;
        match cmd.operation.apply(&cmd.args, self) {
            Ok(()) => Some(Response::Ok),
            Err(err) => Some(err.into()),
        }
    }

    /// Apply a named view selection from the UI.
    pub fn set_view(&mut self, preset: ViewPreset) {
        match preset {
            ViewPreset::Top => self.camera.destination = CAMERA_TOP,
            ViewPreset::Side => self.camera.destination = CAMERA_SIDE,
            ViewPreset::Corner => self.camera.destination = CAMERA_CORNER,
            ViewPreset::Reset => self.copter.destination = Vec3::ZERO,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            copter_position: self.copter.position,
            copter_destination: self.copter.destination,
            copter_status: self.copter.status,
            heading_deg: self.heading_deg,
            camera_position: self.camera.position,
            camera_destination: self.camera.destination,
            camera_status: self.camera.status,
            queue_depth: self.queue.len(),
            connected: self.session.is_connected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::cm_to_units;

    const FPS: f64 = 30.0;

    /// Tick until the copter reports at rest, with a safety cap.
    fn run_to_rest(sim: &mut SimulationState, max_ticks: usize) -> Vec<Response> {
        let mut responses = Vec::new();
        for _ in 0..max_ticks {
            if let Some(resp) = sim.tick(FPS).unwrap() {
                responses.push(resp);
            }
            let step = sim.copter.speed / FPS;
            if sim.copter.in_position(step) && sim.queue.is_empty() {
                return responses;
            }
        }
        panic!("copter never came to rest within {} ticks", max_ticks);
    }

    #[test]
    fn test_rejects_non_positive_frame_rate() {
        let mut sim = SimulationState::default();
        assert!(sim.tick(0.0).is_err());
        assert!(sim.tick(-30.0).is_err());
        assert!(sim.tick(f64::NAN).is_err());
    }

    #[test]
    fn test_reaches_destination_without_overshoot() {
        let mut sim = SimulationState::default();
        sim.copter.destination = Vec3::new(10.0, 0.0, 0.0);

        let step = sim.copter.speed / FPS;
        let budget = (10.0 / step).ceil() as usize;
        let mut arrived_at = None;
        for i in 0..budget + 2 {
            sim.tick(FPS).unwrap();
            // Never overshoots by more than one tick's travel.
            assert!(sim.copter.position.x < 10.0 + step);
            if sim.copter.in_position(step) {
                arrived_at = Some(i);
                break;
            }
        }
        let arrived_at = arrived_at.expect("copter should arrive within budget");
        assert!(arrived_at <= budget);
    }

    #[test]
    fn test_equal_destination_is_no_motion_no_panic() {
        let mut sim = SimulationState::default();
        let before = sim.copter.position;
        for _ in 0..10 {
            sim.tick(FPS).unwrap();
        }
        assert_eq!(sim.copter.position, before);
        assert_eq!(sim.copter.status, MotionStatus::AtRest);
    }

    #[test]
    fn test_status_transitions_at_rest_in_transit() {
        let mut sim = SimulationState::default();
        assert_eq!(sim.copter.status, MotionStatus::AtRest);
        sim.copter.destination = Vec3::new(5.0, 0.0, 0.0);
        sim.tick(FPS).unwrap();
        assert_eq!(sim.copter.status, MotionStatus::InTransit);
        run_to_rest(&mut sim, 10_000);
        assert_eq!(sim.copter.status, MotionStatus::AtRest);
    }

    #[test]
    fn test_status_flips_to_at_rest_on_arrival_tick() {
        let mut sim = SimulationState::default();
        sim.copter.destination = Vec3::new(0.09, 0.0, 0.0);
        loop {
            sim.tick(FPS).unwrap();
            let step = sim.copter.speed / FPS;
            if sim.copter.in_position(step) {
                // Same tick as the arriving move, not one tick later.
                assert_eq!(sim.copter.status, MotionStatus::AtRest);
                break;
            }
            assert_eq!(sim.copter.status, MotionStatus::InTransit);
        }
    }

    #[test]
    fn test_nan_speed_is_rejected_and_queue_keeps_flowing() {
        let mut sim = SimulationState::default();
        assert!(sim.receive("speed nan").is_none());
        let resp = sim.tick(FPS).unwrap().expect("dispatch must answer");
        assert!(!resp.is_ok());
        assert!(sim.copter.speed.is_finite());

        // The bad command must not poison the gate for later commands.
        assert!(sim.receive("up 100").is_none());
        let resp = sim.tick(FPS).unwrap().expect("next command must dispatch");
        assert!(resp.is_ok());
        assert!((sim.copter.destination.z - cm_to_units(100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_nan_distance_leaves_destination_finite() {
        let mut sim = SimulationState::default();
        assert!(sim.receive("up nan").is_none());
        let resp = sim.tick(FPS).unwrap().expect("dispatch must answer");
        assert!(!resp.is_ok());
        assert_eq!(sim.copter.destination, Vec3::ZERO);
    }

    #[test]
    fn test_dispatch_is_lifo_while_in_transit() {
        let mut sim = SimulationState::default();
        // Put the copter in transit so nothing dispatches yet.
        sim.copter.destination = Vec3::new(3.0, 0.0, 0.0);
        sim.tick(FPS).unwrap();

        assert!(sim.receive("up 100").is_none());
        assert!(sim.receive("back 200").is_none());
        assert!(sim.receive("left 300").is_none());
        assert_eq!(sim.queue.len(), 3);

        // Nothing dispatches while mid-flight.
        assert!(sim.tick(FPS).unwrap().is_none());

        // Fly until it rests; the first dispatch must be the newest command.
        loop {
            if let Some(resp) = sim.tick(FPS).unwrap() {
                assert!(resp.is_ok());
                break;
            }
        }
        assert_eq!(sim.queue.len(), 2);
        assert!((sim.copter.destination.x - (3.0 - cm_to_units(300.0))).abs() < 1e-9);
        // Older commands have not touched the destination yet.
        assert_eq!(sim.copter.destination.y, 0.0);
        assert_eq!(sim.copter.destination.z, 0.0);
    }

    #[test]
    fn test_rapid_fire_newest_intent_wins() {
        // "up 100" then "left 300" sent before anything runs: the copter
        // flies left, and "up 100" sits at the bottom of the queue.
        let mut sim = SimulationState::default();
        sim.receive("up 100");
        sim.receive("left 300");

        let resp = sim.tick(FPS).unwrap().expect("copter at rest, must dispatch");
        assert!(resp.is_ok());

        let responses = run_to_rest(&mut sim, 100_000);
        // The stale "up 100" dispatches after arrival, still LIFO order.
        assert_eq!(responses.len(), 1);
        assert!((sim.copter.destination.x + cm_to_units(300.0)).abs() < 1e-9);
        assert!((sim.copter.destination.z - cm_to_units(100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_failed_command_is_consumed_and_reported() {
        let mut sim = SimulationState::default();
        // Parses fine (one argument), fails validation at dispatch.
        assert!(sim.receive("up 1000").is_none());
        let resp = sim.tick(FPS).unwrap().expect("dispatch must produce a response");
        assert!(!resp.is_ok());
        assert!(sim.queue.is_empty());
        assert_eq!(sim.copter.destination, Vec3::ZERO);
    }

    #[test]
    fn test_parse_failure_answers_immediately() {
        let mut sim = SimulationState::default();
        let resp = sim.receive("flyaway 10").expect("unknown command must answer");
        assert_eq!(resp.wire(), "Invalid Command");
        assert!(sim.queue.is_empty());
    }

    #[test]
    fn test_camera_presets_move_camera_only() {
        let mut sim = SimulationState::default();
        sim.set_view(ViewPreset::Side);
        assert_eq!(sim.camera.destination, CAMERA_SIDE);
        assert_eq!(sim.copter.destination, Vec3::ZERO);

        let copter_before = sim.copter.position;
        for _ in 0..2000 {
            sim.tick(FPS).unwrap();
            let step = sim.camera.speed / FPS;
            if sim.camera.in_position(step) {
                break;
            }
        }
        let step = sim.camera.speed / FPS;
        assert!(sim.camera.in_position(step));
        assert_eq!(sim.copter.position, copter_before);
    }

    #[test]
    fn test_reset_preset_sends_copter_home() {
        let mut sim = SimulationState::default();
        sim.receive("up 100");
        sim.tick(FPS).unwrap();
        sim.set_view(ViewPreset::Reset);
        assert_eq!(sim.copter.destination, Vec3::ZERO);
    }

    #[test]
    fn test_speed_command_takes_effect_same_tick() {
        let mut sim = SimulationState::default();
        sim.receive("speed 100");
        sim.tick(FPS).unwrap();
        assert!((sim.copter.speed - cm_to_units(100.0)).abs() < 1e-12);
    }

    #[test]
    fn test_disconnect_keeps_motion_going() {
        let mut sim = SimulationState::default();
        sim.session.set_connected(true);
        sim.receive("up 100");
        sim.tick(FPS).unwrap();
        sim.session.set_connected(false);
        sim.tick(FPS).unwrap();
        assert_eq!(sim.copter.status, MotionStatus::InTransit);
        assert!((sim.copter.destination.z - cm_to_units(100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut sim = SimulationState::default();
        sim.receive("up 100");
        sim.receive("cw 90");
        let snap = sim.snapshot();
        assert_eq!(snap.queue_depth, 2);
        assert!(!snap.connected);
        assert_eq!(snap.copter_position, Vec3::ZERO);
        assert_eq!(snap.camera_position, CAMERA_HOME);
    }
}
