//! Mutable flight state of the projectile.

use crate::trajectory::TrajectoryHistory;
use crate::types::{BodyParameters, Vec3};

/// Position, velocity and trajectory of the ball, plus the body parameters
/// the flight was launched with.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub body: BodyParameters,
    trajectory: TrajectoryHistory,
}

impl ProjectileState {
    /// Launch state: at `start`, moving at `body.launch_velocity`, with the
    /// whole trajectory collapsed onto the start point.
    pub fn launch(start: Vec3, body: BodyParameters, trajectory_capacity: usize) -> Self {
        Self {
            position: start,
            velocity: body.launch_velocity,
            body,
            trajectory: TrajectoryHistory::new(trajectory_capacity, start),
        }
    }

    /// Re-initialize in place, reusing the trajectory allocation.
    pub fn relaunch(&mut self, start: Vec3, body: BodyParameters) {
        self.position = start;
        self.velocity = body.launch_velocity;
        self.body = body;
        self.trajectory.reset(start);
    }

    /// Commit the result of an integration step and log the new position.
    pub fn advance(&mut self, position: Vec3, velocity: Vec3) {
        self.position = position;
        self.velocity = velocity;
        self.trajectory.push(position);
    }

    pub fn trajectory(&self) -> &TrajectoryHistory {
        &self.trajectory
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}
