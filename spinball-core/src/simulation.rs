//! Simulation context: run control, fixed-timestep accumulator and the
//! interfaces to the controls and display layers.
//!
//! ## Timing
//!
//! Rendering delivers frames at whatever rate it can. Each frame hands the
//! elapsed wall-clock time to [`Simulation::tick`], which banks it in an
//! accumulator and spends it in fixed chunks of `dt`:
//!
//! ```text
//! frame:   |---- 16.7ms ----|--- 33ms ---|- 8ms -|
//! physics: |  dt  |  dt  |  dt  |  dt  |  dt  |
//! ```
//!
//! A tick may therefore run zero, one or several integration steps, while the
//! physics always sees the same step size.
//!
//! While stopped, elapsed time is discarded rather than banked, and no tick
//! contributes more than `max_frame_time`. Resuming after a long pause never
//! triggers a burst of catch-up steps.

use tracing::{debug, info, trace, warn};

use crate::config::{validate_body, SimulationConfig};
use crate::error::Result;
use crate::forces::MagnusDragForces;
use crate::integrator::RungeKutta4;
use crate::parameters::BodyParameter;
use crate::state::ProjectileState;
use crate::trajectory::TrajectoryHistory;
use crate::types::{BodyParameters, Vec3};

// =============================================================================
// Display Sink
// =============================================================================

/// Consumer of simulation output, typically a renderer.
///
/// Called after every completed integration step and after every reset, never
/// in the middle of an update.
pub trait DisplaySink {
    fn update(&mut self, position: Vec3, trajectory: &TrajectoryHistory);
}

/// Discards all output.
impl DisplaySink for () {
    fn update(&mut self, _position: Vec3, _trajectory: &TrajectoryHistory) {}
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn update(&mut self, position: Vec3, trajectory: &TrajectoryHistory) {
        (**self).update(position, trajectory);
    }
}

/// Keeps a copy of the most recent frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestFrame {
    pub position: Vec3,
    /// Oldest first
    pub trajectory: Vec<Vec3>,
    /// Number of frames received
    pub updates: usize,
}

impl DisplaySink for LatestFrame {
    fn update(&mut self, position: Vec3, trajectory: &TrajectoryHistory) {
        self.position = position;
        self.trajectory.clear();
        self.trajectory.extend(trajectory.iter().copied());
        self.updates += 1;
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// A single projectile flight, owned by the caller.
pub struct Simulation<S: DisplaySink = ()> {
    config: SimulationConfig,
    forces: MagnusDragForces,
    state: ProjectileState,
    sink: S,
    running: bool,
    accumulator: f64,
    time: f64,
    steps: u64,
    landed: bool,
    diverged: bool,
}

impl Simulation<()> {
    /// Create a simulation without a display.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_sink(config, ())
    }
}

impl<S: DisplaySink> Simulation<S> {
    /// Create a simulation that reports every frame to `sink`.
    ///
    /// The configuration is validated; the simulation starts stopped, with the
    /// ball at the start position and one frame already sent to the sink.
    pub fn with_sink(config: SimulationConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let mut sim = Self::assemble(config, sink);
        sim.emit();
        Ok(sim)
    }

    fn assemble(config: SimulationConfig, sink: S) -> Self {
        let state = ProjectileState::launch(
            config.start_position,
            config.body,
            config.trajectory_capacity,
        );

        Self {
            forces: MagnusDragForces::new(config.environment),
            config,
            state,
            sink,
            running: false,
            accumulator: 0.0,
            time: 0.0,
            steps: 0,
            landed: false,
            diverged: false,
        }
    }

    // -------------------------------------------------------------------------
    // Run control
    // -------------------------------------------------------------------------

    pub fn start(&mut self) {
        if !self.running {
            debug!(time = self.time, "simulation started");
        }
        self.running = true;
    }

    /// Stop integrating. Time banked but not yet spent is dropped.
    pub fn stop(&mut self) {
        if self.running {
            debug!(time = self.time, "simulation stopped");
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn toggle_running(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Relaunch from the start position with the current body parameters.
    ///
    /// Run state is kept: a running simulation keeps running from the new
    /// launch.
    pub fn reset(&mut self) {
        self.state.relaunch(self.config.start_position, self.config.body);
        self.accumulator = 0.0;
        self.time = 0.0;
        self.steps = 0;
        self.landed = false;
        self.diverged = false;

        let body = &self.config.body;
        debug!(
            mass = body.mass,
            vx = body.launch_velocity.x,
            vy = body.launch_velocity.y,
            vz = body.launch_velocity.z,
            omegax = body.spin.x,
            omegay = body.spin.y,
            omegaz = body.spin.z,
            "simulation reset"
        );
        self.emit();
    }

    /// Same as [`reset`](Self::reset); the name used by control panels.
    pub fn restart(&mut self) {
        self.reset();
    }

    // -------------------------------------------------------------------------
    // Parameter sink
    // -------------------------------------------------------------------------

    /// Set a body parameter by its short name (`m`, `vx`, ..., `omegaz`) and
    /// restart the flight.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        let param: BodyParameter = name.parse()?;
        self.set_body_parameter(param, value)
    }

    /// Set one body parameter and restart the flight. Rejected values leave the
    /// simulation untouched.
    pub fn set_body_parameter(&mut self, param: BodyParameter, value: f64) -> Result<()> {
        param.set(&mut self.config.body, value)?;
        debug!(parameter = %param, value, "body parameter changed");
        self.reset();
        Ok(())
    }

    /// Replace all body parameters and restart the flight.
    pub fn set_body(&mut self, body: BodyParameters) -> Result<()> {
        validate_body(&body)?;
        self.config.body = body;
        self.reset();
        Ok(())
    }

    pub fn parameter(&self, param: BodyParameter) -> f64 {
        param.get(&self.config.body)
    }

    // -------------------------------------------------------------------------
    // Stepping
    // -------------------------------------------------------------------------

    /// Feed `frame_time` seconds of wall-clock time into the accumulator and
    /// spend it in fixed steps.
    ///
    /// Returns the number of `dt` chunks consumed. Chunks consumed after the
    /// ball has landed do not integrate. Stopped simulations consume nothing.
    pub fn tick(&mut self, frame_time: f64) -> usize {
        if !self.running {
            return 0;
        }

        let mut elapsed = if frame_time.is_finite() && frame_time > 0.0 {
            frame_time
        } else {
            0.0
        };
        if elapsed > self.config.max_frame_time {
            debug!(
                frame_time = elapsed,
                max_frame_time = self.config.max_frame_time,
                "frame time clamped"
            );
            elapsed = self.config.max_frame_time;
        }

        self.accumulator += elapsed;

        let dt = self.config.dt;
        let mut consumed = 0;
        while self.accumulator >= dt {
            self.step();
            self.accumulator -= dt;
            consumed += 1;
        }
        consumed
    }

    /// Run one integration step if the ball is still in flight.
    ///
    /// Returns `true` if the state advanced. Ignores run state, so hosts that
    /// drive the fixed step themselves can call it directly.
    pub fn step(&mut self) -> bool {
        if self.diverged || !self.in_flight() {
            return false;
        }

        let dt = self.config.dt;
        let next = RungeKutta4::step(
            self.state.position,
            self.state.velocity,
            &self.state.body,
            &self.forces,
            dt,
        );

        if self.config.detect_divergence && !(next.position.is_finite() && next.velocity.is_finite())
        {
            warn!(
                time = self.time,
                step = self.steps,
                "trajectory diverged, integration halted"
            );
            self.diverged = true;
            return false;
        }

        self.state.advance(next.position, next.velocity);
        self.time += dt;
        self.steps += 1;

        trace!(
            step = self.steps,
            x = next.position.x,
            y = next.position.y,
            z = next.position.z,
            "integrated"
        );

        if !self.landed && !self.in_flight() {
            self.landed = true;
            info!(
                time = self.time,
                x = next.position.x,
                z = next.position.z,
                speed = next.velocity.magnitude(),
                "projectile landed"
            );
        }

        self.emit();
        true
    }

    fn emit(&mut self) {
        self.sink.update(self.state.position, self.state.trajectory());
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Ground-stop predicate: true while `position.y >= ground_threshold`.
    pub fn in_flight(&self) -> bool {
        self.state.position.y >= self.config.ground_threshold
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Only ever true when `detect_divergence` is enabled.
    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    pub fn state(&self) -> &ProjectileState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    pub fn trajectory(&self) -> &TrajectoryHistory {
        self.state.trajectory()
    }

    pub fn body(&self) -> &BodyParameters {
        &self.config.body
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn dt(&self) -> f64 {
        self.config.dt
    }

    /// Simulated seconds since the last reset.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Integration steps since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Banked wall-clock time not yet spent, always `< dt` between ticks.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl Default for Simulation<()> {
    fn default() -> Self {
        Self::assemble(SimulationConfig::default(), ())
    }
}

// =============================================================================
// Tests
// =============================================================================
