//! Command dictionary and executable operations.
//!
//! The dictionary is a fixed table mapping protocol command names to an
//! [`Operation`] plus the number of arguments the command requires. Name
//! resolution happens once, at the string boundary in the parser; after
//! that everything dispatches over the `Operation` enum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::SimulationState;
use crate::vector::cm_to_units;

/// Validation failure raised by an operation's `apply`.
///
/// An operation either fully applies or has no effect; any of these
/// errors means the simulation state was left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{command}: '{value}' is not a number")]
    BadNumber { command: &'static str, value: String },
    #[error("{param} parameter for '{command}' must be between {min} and {max}.")]
    OutOfRange {
        command: &'static str,
        param: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("flip direction must be one of 'l', 'r', 'f', 'b', got '{value}'")]
    BadFlipDirection { value: String },
}

/// The validated, executable effect bound to a command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Land,
    Emergency,
    Up,
    Down,
    Left,
    Right,
    Forward,
    Back,
    RotateCw,
    RotateCcw,
    Flip,
    GoTo,
    Stop,
    Curve,
    SetSpeed,
}

/// One entry of the command dictionary.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arg_count: usize,
    pub effect: Operation,
    pub description: &'static str,
}

/// The fixed command table. Case-sensitive, never mutated after startup.
pub const COMMAND_TABLE: &[CommandSpec] = &[
    CommandSpec { name: "land", arg_count: 0, effect: Operation::Land, description: "Auto landing." },
    CommandSpec { name: "emergency", arg_count: 0, effect: Operation::Emergency, description: "Stop motors immediately." },
    CommandSpec { name: "up", arg_count: 1, effect: Operation::Up, description: "Ascend to 'x' cm. x = [20,500]" },
    CommandSpec { name: "down", arg_count: 1, effect: Operation::Down, description: "Descend to 'x' cm. x = [20,500]" },
    CommandSpec { name: "left", arg_count: 1, effect: Operation::Left, description: "Fly left for 'x' cm. x = [20,500]" },
    CommandSpec { name: "right", arg_count: 1, effect: Operation::Right, description: "Fly right for 'x' cm. x = [20,500]" },
    CommandSpec { name: "forward", arg_count: 1, effect: Operation::Forward, description: "Fly forward for 'x' cm. x = [20,500]" },
    CommandSpec { name: "back", arg_count: 1, effect: Operation::Back, description: "Fly backward for 'x' cm. x = [20,500]" },
    CommandSpec { name: "cw", arg_count: 1, effect: Operation::RotateCw, description: "Rotate 'x' degrees clockwise. x = [1,360]" },
    CommandSpec { name: "ccw", arg_count: 1, effect: Operation::RotateCcw, description: "Rotate 'x' degrees counterclockwise. x = [1,360]" },
    CommandSpec { name: "flip", arg_count: 1, effect: Operation::Flip, description: "Flip in 'x' direction. 'l' = left 'r' = right 'f' = forward 'b' = back" },
    CommandSpec { name: "go", arg_count: 4, effect: Operation::GoTo, description: "Fly to 'x' 'y' 'z' at 'speed' cm/s. x,y,z = [-500,500] speed = [10,100]" },
    CommandSpec { name: "stop", arg_count: 0, effect: Operation::Stop, description: "Hovers in the air. Note: works at any time." },
    CommandSpec { name: "curve", arg_count: 7, effect: Operation::Curve, description: "Fly at a curve according to the two given coordinates." },
    CommandSpec { name: "speed", arg_count: 1, effect: Operation::SetSpeed, description: "Set speed to 'x' cm/s. x = [10,100]" },
];

/// Resolve a command name to its dictionary entry. Exact match only.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMAND_TABLE.iter().find(|spec| spec.name == name)
}

fn parse_number(command: &'static str, value: &str) -> Result<f64, ValidationError> {
    // NaN compares false against every bound, so non-finite values must
    // be rejected here or they would sail through every range check.
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::BadNumber {
            command,
            value: value.to_string(),
        })
}

fn require_range(
    command: &'static str,
    param: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { command, param, value, min, max });
    }
    Ok(value)
}

/// Parse and range-check a single distance argument in centimeters,
/// returning the distance in simulation length units.
fn distance_arg(command: &'static str, args: &[String]) -> Result<f64, ValidationError> {
    let cm = parse_number(command, &args[0])?;
    require_range(command, "Distance", cm, 20.0, 500.0)?;
    Ok(cm_to_units(cm))
}

impl Operation {
    /// Number of argument tokens [`Operation::apply`] expects.
    pub fn arg_count(&self) -> usize {
        COMMAND_TABLE
            .iter()
            .find(|spec| spec.effect == *self)
            .map_or(0, |spec| spec.arg_count)
    }

    /// Validate `args` and apply this operation to the simulation state.
    ///
    /// All arguments are validated before any state is touched, so a
    /// failure leaves destinations, heading and speed exactly as they were.
    ///
    /// `args` must hold at least [`Operation::arg_count`] tokens; the
    /// parser guarantees this. Calling with fewer is a programming error
    /// and panics.
    pub fn apply(&self, args: &[String], sim: &mut SimulationState) -> Result<(), ValidationError> {
        debug_assert!(
            args.len() >= self.arg_count(),
            "{:?} needs {} argument(s), got {}",
            self,
            self.arg_count(),
            args.len()
        );
        match self {
            Operation::Land => {
                let pos = sim.copter.position;
                sim.copter.destination = crate::vector::Vec3::new(pos.x, pos.y, 0.0);
                Ok(())
            }
            Operation::Emergency | Operation::Stop => {
                // Halt in place: the motion model has no free fall, so
                // emergency and stop both freeze the destination.
                sim.copter.destination = sim.copter.position;
                Ok(())
            }
            Operation::Up => {
                let dist = distance_arg("up", args)?;
                sim.copter.destination.z += dist;
                Ok(())
            }
            Operation::Down => {
                let dist = distance_arg("down", args)?;
                sim.copter.destination.z -= dist;
                if sim.copter.destination.z < 0.0 {
                    sim.copter.destination.z = 0.0;
                }
                Ok(())
            }
            Operation::Left => {
                let dist = distance_arg("left", args)?;
                sim.copter.destination.x -= dist;
                Ok(())
            }
            Operation::Right => {
                let dist = distance_arg("right", args)?;
                sim.copter.destination.x += dist;
                Ok(())
            }
            Operation::Forward => {
                let dist = distance_arg("forward", args)?;
                sim.copter.destination.y -= dist;
                Ok(())
            }
            Operation::Back => {
                let dist = distance_arg("back", args)?;
                sim.copter.destination.y += dist;
                Ok(())
            }
            Operation::RotateCw => {
                let deg = parse_number("cw", &args[0])?;
                require_range("cw", "Degrees", deg, 1.0, 360.0)?;
                sim.heading_deg = (sim.heading_deg + deg).rem_euclid(360.0);
                Ok(())
            }
            Operation::RotateCcw => {
                let deg = parse_number("ccw", &args[0])?;
                require_range("ccw", "Degrees", deg, 1.0, 360.0)?;
                sim.heading_deg = (sim.heading_deg - deg).rem_euclid(360.0);
                Ok(())
            }
            Operation::Flip => {
                match args[0].as_str() {
                    "l" | "r" | "f" | "b" => Ok(()),
                    other => Err(ValidationError::BadFlipDirection { value: other.to_string() }),
                }
            }
            Operation::GoTo => {
                let x = parse_number("go", &args[0])?;
                let y = parse_number("go", &args[1])?;
                let z = parse_number("go", &args[2])?;
                let speed = parse_number("go", &args[3])?;
                require_range("go", "X", x, -500.0, 500.0)?;
                require_range("go", "Y", y, -500.0, 500.0)?;
                require_range("go", "Z", z, -500.0, 500.0)?;
                require_range("go", "Speed", speed, 10.0, 100.0)?;

                sim.copter.destination.x += cm_to_units(x);
                sim.copter.destination.y += cm_to_units(y);
                sim.copter.destination.z += cm_to_units(z);
                if sim.copter.destination.z < 0.0 {
                    sim.copter.destination.z = 0.0;
                }
                sim.copter.speed = cm_to_units(speed);
                Ok(())
            }
            Operation::Curve => {
                // Two waypoints plus speed. The motion model is linear, so
                // the first waypoint only gets validated; the copter flies
                // straight to the second.
                let mut coords = [0.0f64; 6];
                for (i, slot) in coords.iter_mut().enumerate() {
                    let v = parse_number("curve", &args[i])?;
                    *slot = require_range("curve", "Coordinate", v, -500.0, 500.0)?;
                }
                let speed = parse_number("curve", &args[6])?;
                require_range("curve", "Speed", speed, 10.0, 60.0)?;

                sim.copter.destination.x += cm_to_units(coords[3]);
                sim.copter.destination.y += cm_to_units(coords[4]);
                sim.copter.destination.z += cm_to_units(coords[5]);
                if sim.copter.destination.z < 0.0 {
                    sim.copter.destination.z = 0.0;
                }
                sim.copter.speed = cm_to_units(speed);
                Ok(())
            }
            Operation::SetSpeed => {
                let speed = parse_number("speed", &args[0])?;
                require_range("speed", "Speed", speed, 10.0, 100.0)?;
                sim.copter.speed = cm_to_units(speed);
                Ok(())
            }
        }
    }
}
