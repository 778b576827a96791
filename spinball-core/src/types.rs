//! Core types for the flight simulation.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Angular velocity (spin): radians per second (rad/s)
//! - Mass: kilograms (kg)

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities, accelerations, and spin.
///
/// Coordinate system:
/// - X: horizontal, launch direction of the default scene
/// - Y: vertical (positive upward, ground plane at y = 0)
/// - Z: horizontal, completing a right-handed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product `self × other`
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Body Parameters
// =============================================================================

/// Tunable parameters of the projectile.
///
/// The spin vector encodes both the axis and magnitude of rotation:
/// - Direction: axis of rotation (right-hand rule)
/// - Magnitude: angular velocity in rad/s
///
/// `launch_velocity` is only read when the simulation is (re)started; the live
/// velocity during flight is held by [`ProjectileState`](crate::state::ProjectileState).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyParameters {
    pub mass: f64,
    pub launch_velocity: Vec3,
    pub spin: Vec3,
}

impl BodyParameters {
    pub fn new(mass: f64, launch_velocity: Vec3, spin: Vec3) -> Self {
        Self {
            mass,
            launch_velocity,
            spin,
        }
    }

    /// Unit mass dropped from rest without spin.
    pub fn at_rest() -> Self {
        Self::new(1.0, Vec3::ZERO, Vec3::ZERO)
    }
}

impl Default for BodyParameters {
    fn default() -> Self {
        Self::at_rest()
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Environment-level constants, fixed for the lifetime of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Air density ρ (kg/m³)
    pub air_density: f64,
    /// Drag coefficient Cd (dimensionless)
    pub drag_coefficient: f64,
    /// Gravitational acceleration g (m/s²), applied along -Y
    pub gravity: f64,
    /// Magnus coupling coefficient B
    pub magnus_coefficient: f64,
    /// Projectile radius r (m)
    pub radius: f64,
}

impl Environment {
    /// Thin air and a large, light ball: the scene the flight engine ships with.
    pub fn standard() -> Self {
        Self {
            air_density: constants::AIR_DENSITY,
            drag_coefficient: constants::DRAG_COEFFICIENT,
            gravity: constants::GRAVITY,
            magnus_coefficient: constants::MAGNUS_COEFFICIENT,
            radius: constants::BALL_RADIUS,
        }
    }

    /// Gravity only: no drag and no Magnus coupling.
    pub fn vacuum() -> Self {
        Self {
            air_density: 0.0,
            magnus_coefficient: 0.0,
            ..Self::standard()
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Default constants used by the simulation.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Air density (kg/m³)
    pub const AIR_DENSITY: f64 = 0.1;

    pub const DRAG_COEFFICIENT: f64 = 1.2;

    pub const MAGNUS_COEFFICIENT: f64 = 0.00041;

    /// Ball radius, 30 cm (m)
    pub const BALL_RADIUS: f64 = 0.3;

    /// Fixed integration step (s)
    pub const DEFAULT_DT: f64 = 0.01;

    /// Number of past samples kept in the trajectory (the log holds one more)
    pub const TRAJECTORY_CAPACITY: usize = 2000;

    /// Largest accepted trajectory capacity
    pub const MAX_TRAJECTORY_CAPACITY: usize = 1 << 20;

    /// Ground contact: flight continues while y >= this value (m)
    pub const GROUND_THRESHOLD: f64 = -0.001;

    /// Upper bound on the wall-clock time a single tick may feed the accumulator (s)
    pub const MAX_FRAME_TIME: f64 = 0.25;

    /// Where every flight starts (m)
    pub const START_POSITION: [f64; 3] = [-2.0, 0.0, 0.0];

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
