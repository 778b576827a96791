//! Fixed-step numerical integration.
//!
//! The flight is advanced with the classical 4th-order Runge–Kutta method
//! applied to the coupled first-order system `ẋ = v`, `v̇ = a(v)`.
//!
//! ## Algorithm
//!
//! ```text
//! 1. a1 = a(v1)                      x1 = x, v1 = v
//! 2. x2 = x1 + dt/2·v1   v2 = v1 + dt/2·a1   a2 = a(v2)
//! 3. x3 = x1 + dt/2·v2   v3 = v1 + dt/2·a2   a3 = a(v3)
//! 4. x4 = x1 + dt·v3     v4 = v1 + dt·a3     a4 = a(v4)
//! 5. x' = x1 + dt/6·(v1 + 2·v2 + 2·v3 + v4)
//! 6. v' = v1 + dt/6·(a1 + 2·a2 + 2·a3 + a4)
//! ```
//!
//! The stage positions `x2..x4` never feed back into the accelerations because
//! the force model has no position dependence; the position update uses the
//! velocity stages directly. There is no error estimate and no step control.

use crate::forces::ForceModel;
use crate::types::{BodyParameters, Vec3};

/// Position and velocity after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Classical RK4 integrator. Stateless; `dt` is supplied per call.
pub struct RungeKutta4;

impl RungeKutta4 {
    /// Advance `(position, velocity)` by one step of `dt` seconds.
    pub fn step<F: ForceModel>(
        position: Vec3,
        velocity: Vec3,
        body: &BodyParameters,
        forces: &F,
        dt: f64,
    ) -> StepResult {
        let half = 0.5 * dt;

        let x1 = position;
        let v1 = velocity;
        let a1 = forces.acceleration(v1, body);

        let v2 = v1 + a1 * half;
        let a2 = forces.acceleration(v2, body);

        let v3 = v1 + a2 * half;
        let a3 = forces.acceleration(v3, body);

        let v4 = v1 + a3 * dt;
        let a4 = forces.acceleration(v4, body);

        let sixth = dt / 6.0;

        StepResult {
            position: x1 + (v1 + v2 * 2.0 + v3 * 2.0 + v4) * sixth,
            velocity: v1 + (a1 + a2 * 2.0 + a3 * 2.0 + a4) * sixth,
        }
    }

    /// Apply `steps` consecutive steps of `dt`.
    ///
    /// Total time advanced is `steps * dt`.
    pub fn step_n<F: ForceModel>(
        position: Vec3,
        velocity: Vec3,
        body: &BodyParameters,
        forces: &F,
        dt: f64,
        steps: usize,
    ) -> StepResult {
        let mut current = StepResult { position, velocity };

        for _ in 0..steps {
            current = Self::step(current.position, current.velocity, body, forces, dt);
        }

        current
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::MagnusDragForces;
    use crate::types::constants::GRAVITY;
    use approx::assert_relative_eq;

    /// Constant downward pull, independent of mass
    struct GravityOnly;

    impl ForceModel for GravityOnly {
        fn acceleration(&self, _velocity: Vec3, _body: &BodyParameters) -> Vec3 {
            Vec3::new(0.0, -GRAVITY, 0.0)
        }
    }

    /// Linear damping `a = -c·v`, which has a closed-form solution
    struct LinearDamping(f64);

    impl ForceModel for LinearDamping {
        fn acceleration(&self, velocity: Vec3, _body: &BodyParameters) -> Vec3 {
            velocity * -self.0
        }
    }

    #[test]
    fn test_no_forces_moves_in_straight_line() {
        struct NoForces;
        impl ForceModel for NoForces {
            fn acceleration(&self, _: Vec3, _: &BodyParameters) -> Vec3 {
                Vec3::ZERO
            }
        }

        let body = BodyParameters::default();
        let result = RungeKutta4::step(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            &body,
            &NoForces,
            1.0,
        );

        assert_relative_eq!(result.position.x, 10.0, epsilon = 1e-12);
        assert_eq!(result.velocity, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_free_fall_is_exact() {
        let body = BodyParameters::default();
        let y0 = 5.0;
        let v0y = 3.0;
        let t = 1.3;
        let k = 130;

        let result = RungeKutta4::step_n(
            Vec3::new(0.0, y0, 0.0),
            Vec3::new(0.0, v0y, 0.0),
            &body,
            &GravityOnly,
            t / k as f64,
            k,
        );

        let expected_y = y0 + v0y * t - 0.5 * GRAVITY * t * t;
        assert_relative_eq!(result.position.y, expected_y, epsilon = 1e-9);
        assert_relative_eq!(result.velocity.y, v0y - GRAVITY * t, epsilon = 1e-9);
    }

    #[test]
    fn test_single_large_step_is_exact_for_constant_acceleration() {
        // RK4 integrates quadratics exactly, whatever the step size
        let body = BodyParameters::default();
        let result = RungeKutta4::step(
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(2.0, 10.0, 0.5),
            &body,
            &GravityOnly,
            2.0,
        );

        assert_relative_eq!(result.position.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(result.position.y, 20.0 - 0.5 * GRAVITY * 4.0, epsilon = 1e-12);
        assert_relative_eq!(result.position.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fourth_order_accuracy_on_damping() {
        // v(t) = v0·e^(-ct)
        let c = 2.0;
        let v0 = 4.0;
        let t = 1.0;
        let body = BodyParameters::default();

        let error = |k: usize| {
            let r = RungeKutta4::step_n(
                Vec3::ZERO,
                Vec3::new(v0, 0.0, 0.0),
                &body,
                &LinearDamping(c),
                t / k as f64,
                k,
            );
            let exact = v0 * (-c * t).exp();
            (r.velocity.x - exact).abs()
        };

        let coarse = error(10);
        let fine = error(20);

        // Halving dt should shrink the error by roughly 2^4
        assert!(coarse < 1e-4, "coarse error too large: {}", coarse);
        assert!(
            coarse / fine > 12.0,
            "expected ~16x error reduction, got {}",
            coarse / fine
        );
    }

    #[test]
    fn test_step_n_matches_repeated_step() {
        let forces = MagnusDragForces::default();
        let body = BodyParameters::new(1.0, Vec3::ZERO, Vec3::new(0.0, 0.0, 800.0));
        let x0 = Vec3::new(-2.0, 0.0, 0.0);
        let v0 = Vec3::new(6.0, 7.0, 1.0);

        let mut manual = StepResult {
            position: x0,
            velocity: v0,
        };
        for _ in 0..25 {
            manual = RungeKutta4::step(manual.position, manual.velocity, &body, &forces, 0.01);
        }

        let batched = RungeKutta4::step_n(x0, v0, &body, &forces, 0.01, 25);
        assert_eq!(manual, batched);
    }

    #[test]
    fn test_drag_slows_horizontal_flight() {
        let forces = MagnusDragForces::new(crate::types::Environment {
            gravity: 0.0,
            ..Default::default()
        });
        let body = BodyParameters::default();

        let result = RungeKutta4::step_n(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            &body,
            &forces,
            0.01,
            100,
        );

        assert!(result.velocity.x < 10.0);
        assert!(result.velocity.x > 0.0, "drag must not reverse motion");
        assert!(result.position.x < 10.0);
    }
}
