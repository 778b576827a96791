//! # Spinball Core
//!
//! Flight engine for a spinning ball under gravity, quadratic drag and the
//! Magnus force, advanced with fixed-step RK4 and decoupled from the render
//! frame rate by a time accumulator.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, body parameters, environment)
//! - `forces`: Acceleration model (gravity, drag, Magnus effect)
//! - `trajectory`: Bounded position log for drawing the flight path
//! - `state`: Mutable projectile state
//! - `integrator`: Numerical integration (classical Runge–Kutta 4)
//! - `parameters`: Named body parameters for control panels
//! - `config`: YAML configuration and preset loader
//! - `simulation`: Main orchestrator (run control, accumulator, display sink)
//!
//! ## Example
//!
//! ```
//! use spinball_core::{LatestFrame, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::with_sink(SimulationConfig::default(), LatestFrame::default())?;
//! sim.set_parameter("vx", 4.0)?;
//! sim.set_parameter("vy", 6.0)?;
//! sim.start();
//!
//! // One 60 Hz frame
//! sim.tick(1.0 / 60.0);
//! assert_eq!(sim.sink().position, sim.position());
//! # Ok::<(), spinball_core::SimulationError>(())
//! ```

pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod parameters;
pub mod simulation;
pub mod state;
pub mod trajectory;
pub mod types;

pub use config::{PresetLoader, SimulationConfig};
pub use error::SimulationError;
pub use forces::{ForceModel, MagnusDragForces};
pub use integrator::{RungeKutta4, StepResult};
pub use parameters::{BodyParameter, SliderRange};
pub use simulation::{DisplaySink, LatestFrame, Simulation};
pub use state::ProjectileState;
pub use trajectory::TrajectoryHistory;
pub use types::{BodyParameters, Environment, Vec3};
