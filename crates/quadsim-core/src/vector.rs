//! 3D vector math for copter and camera positions.

use serde::{Deserialize, Serialize};

/// Centimeters per simulation length unit (one foot).
pub const CM_PER_UNIT: f64 = 30.48;

/// Convert centimeters (the wire protocol's distance unit) to length units.
pub fn cm_to_units(cm: f64) -> f64 {
    cm / CM_PER_UNIT
}

/// Convert length units back to centimeters.
pub fn units_to_cm(units: f64) -> f64 {
    units * CM_PER_UNIT
}

/// Position or destination in simulation space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy, or `None` for the zero vector.
    ///
    /// The zero case matters: interpolation toward an already-reached
    /// destination must not divide by zero.
    pub fn normalized(&self) -> Option<Vec3> {
        let len = self.length();
        if len == 0.0 {
            return None;
        }
        Some(Vec3::new(self.x / len, self.y / len, self.z / len))
    }

    pub fn scaled(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// True when `other` is strictly within `tolerance` on every axis.
    pub fn within(&self, other: &Vec3, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.z - other.z).abs() < tolerance
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}
