//! Command translation and motion simulation for a simulated quadcopter.
//!
//! A remote client drives the copter over a small textual protocol
//! modeled on a consumer drone SDK. This crate is the engine: the command
//! dictionary, the parser, the LIFO dispatch queue, and the deterministic
//! interpolation that moves copter and camera toward their destinations
//! one externally driven tick at a time. Transport and rendering live in
//! the server and client crates.

pub mod command;
pub mod parser;
pub mod queue;
pub mod response;
pub mod session;
pub mod sim;
pub mod vector;

pub use command::{lookup, CommandSpec, Operation, ValidationError, COMMAND_TABLE};
pub use parser::{parse, ParseError, ParsedCommand};
pub use queue::CommandQueue;
pub use response::Response;
pub use session::SessionTracker;
pub use sim::{
    ClockError, MotionStatus, SimulationState, Snapshot, Tracked, ViewPreset,
    DEFAULT_CAMERA_SPEED, DEFAULT_COPTER_SPEED,
};
pub use vector::{cm_to_units, units_to_cm, Vec3, CM_PER_UNIT};
