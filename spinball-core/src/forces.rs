//! Accelerations acting on the ball.
//!
//! - **Gravity**: constant pull along -Y, scaled by the body's mass
//! - **Drag**: quadratic air resistance opposing motion
//! - **Magnus**: lift from spin, perpendicular to both spin axis and velocity
//!
//! ## The Magnus Effect
//!
//! A spinning ball drags the surrounding air around with it. On the side
//! turning with the airflow the pressure drops, on the other side it rises,
//! and the ball is pushed along `ω × v`:
//!
//! ```text
//! Backspin (ω along +Z) moving along +X:
//!     ↑ Magnus term pushes the ball UP (ωz·vx > 0 in ay)
//!
//! Topspin (ω along -Z) moving along +X:
//!     ↓ Magnus term pushes the ball DOWN
//! ```
//!
//! The model depends only on velocity, never on position. This lets the
//! integrator evaluate each RK4 stage from that stage's velocity alone.

use crate::types::{BodyParameters, Environment, Vec3};

/// Acceleration as a pure function of velocity and body parameters.
///
/// Implementations must be deterministic: the integrator evaluates the model
/// four times per step and relies on identical inputs giving identical outputs.
pub trait ForceModel {
    fn acceleration(&self, velocity: Vec3, body: &BodyParameters) -> Vec3;
}

/// Gravity, quadratic drag and Magnus coupling for a spherical ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnusDragForces {
    env: Environment,
}

impl Default for MagnusDragForces {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}

impl MagnusDragForces {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Gravity only (for testing).
    pub fn vacuum() -> Self {
        Self::new(Environment::vacuum())
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Drag factor `k = ρ · π · r · Cd`.
    pub fn drag_factor(&self) -> f64 {
        self.env.air_density * std::f64::consts::PI * self.env.radius * self.env.drag_coefficient
    }

    /// Drag term `-k · v · |v|`.
    pub fn drag_acceleration(&self, velocity: Vec3) -> Vec3 {
        let speed = velocity.magnitude();
        velocity * (-self.drag_factor() * speed)
    }

    /// Magnus term `m · B · (ω × v)`.
    pub fn magnus_acceleration(&self, velocity: Vec3, body: &BodyParameters) -> Vec3 {
        body.spin.cross(&velocity) * (body.mass * self.env.magnus_coefficient)
    }

    /// Gravity term `(0, -m·g, 0)`.
    pub fn gravity_acceleration(&self, body: &BodyParameters) -> Vec3 {
        Vec3::new(0.0, -body.mass * self.env.gravity, 0.0)
    }
}

impl ForceModel for MagnusDragForces {
    fn acceleration(&self, velocity: Vec3, body: &BodyParameters) -> Vec3 {
        let k = self.drag_factor();
        let mb = body.mass * self.env.magnus_coefficient;
        let w = body.spin;
        let v = velocity;
        let s = v.magnitude();

        // Same evaluation order as the component formulas, so reference
        // trajectories reproduce bit for bit.
        Vec3 {
            x: -k * v.x * s + mb * (w.y * v.z - w.z * v.y),
            y: -k * v.y * s + mb * (w.z * v.x - w.x * v.z) - body.mass * self.env.gravity,
            z: -k * v.z * s + mb * (w.x * v.y - w.y * v.x),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::constants;
    use approx::assert_relative_eq;

    fn unit_body(spin: Vec3) -> BodyParameters {
        BodyParameters::new(1.0, Vec3::ZERO, spin)
    }

    #[test]
    fn test_rest_feels_only_gravity() {
        let forces = MagnusDragForces::default();
        let acc = forces.acceleration(Vec3::ZERO, &unit_body(Vec3::ZERO));

        assert_eq!(acc, Vec3::new(0.0, -constants::GRAVITY, 0.0));
    }

    #[test]
    fn test_gravity_scales_with_mass() {
        let forces = MagnusDragForces::default();
        let body = BodyParameters::new(2.0, Vec3::ZERO, Vec3::ZERO);
        let acc = forces.acceleration(Vec3::ZERO, &body);

        assert_relative_eq!(acc.y, -2.0 * constants::GRAVITY);
    }

    #[test]
    fn test_drag_opposes_motion() {
        let forces = MagnusDragForces::default();
        let acc = forces.acceleration(Vec3::new(5.0, 0.0, 0.0), &unit_body(Vec3::ZERO));

        assert!(acc.x < 0.0, "Drag should oppose motion, got ax={}", acc.x);
        assert_eq!(acc.y, -constants::GRAVITY);
        assert_eq!(acc.z, 0.0);
    }

    #[test]
    fn test_drag_is_quadratic() {
        let forces = MagnusDragForces::default();
        let body = unit_body(Vec3::ZERO);

        let slow = forces.drag_acceleration(Vec3::new(2.0, 0.0, 0.0));
        let fast = forces.drag_acceleration(Vec3::new(8.0, 0.0, 0.0));

        // 4x speed gives 16x drag
        assert_relative_eq!(fast.x / slow.x, 16.0, epsilon = 1e-12);
        assert_relative_eq!(
            forces.acceleration(Vec3::new(2.0, 0.0, 0.0), &body).x,
            slow.x
        );
    }

    #[test]
    fn test_drag_factor_matches_constants() {
        let forces = MagnusDragForces::default();
        let expected = 0.1 * std::f64::consts::PI * 0.3 * 1.2;
        assert_relative_eq!(forces.drag_factor(), expected);
    }

    #[test]
    fn test_backspin_lifts() {
        let forces = MagnusDragForces::default();
        let body = unit_body(Vec3::new(0.0, 0.0, 1000.0));
        let v = Vec3::new(5.0, 0.0, 0.0);

        let magnus = forces.magnus_acceleration(v, &body);
        assert!(magnus.y > 0.0, "Backspin should lift, got {}", magnus.y);

        let total = forces.acceleration(v, &body);
        assert!(total.y > -constants::GRAVITY);
    }

    #[test]
    fn test_topspin_dives() {
        let forces = MagnusDragForces::default();
        let body = unit_body(Vec3::new(0.0, 0.0, -1000.0));
        let acc = forces.acceleration(Vec3::new(5.0, 0.0, 0.0), &body);

        assert!(acc.y < -constants::GRAVITY, "Topspin should dive, got {}", acc.y);
    }

    #[test]
    fn test_sidespin_curves_sideways() {
        let forces = MagnusDragForces::default();
        // +Y × +X = -Z
        let body = unit_body(Vec3::new(0.0, 1000.0, 0.0));
        let acc = forces.acceleration(Vec3::new(5.0, 0.0, 0.0), &body);

        assert!(acc.z < 0.0, "Sidespin should curve toward -Z, got {}", acc.z);
    }

    #[test]
    fn test_terms_sum_to_total() {
        let forces = MagnusDragForces::default();
        let body = BodyParameters::new(1.7, Vec3::ZERO, Vec3::new(120.0, -40.0, 300.0));
        let v = Vec3::new(3.0, 4.0, -1.5);

        let total = forces.acceleration(v, &body);
        let parts = forces.drag_acceleration(v)
            + forces.magnus_acceleration(v, &body)
            + forces.gravity_acceleration(&body);

        assert_relative_eq!(total.x, parts.x, epsilon = 1e-12);
        assert_relative_eq!(total.y, parts.y, epsilon = 1e-12);
        assert_relative_eq!(total.z, parts.z, epsilon = 1e-12);
    }

    #[test]
    fn test_vacuum_ignores_velocity_and_spin() {
        let forces = MagnusDragForces::vacuum();
        let body = unit_body(Vec3::new(500.0, 500.0, 500.0));
        let acc = forces.acceleration(Vec3::new(9.0, -3.0, 2.0), &body);

        assert_eq!(acc, Vec3::new(0.0, -constants::GRAVITY, 0.0));
    }
}
