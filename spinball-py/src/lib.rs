//! Python bindings for the spinball-core flight engine.
//!
//! Provides a simple Python API for a render loop:
//!
//! ```python
//! import time
//! from spinball import Simulation, init_logging
//!
//! init_logging("info")
//! sim = Simulation()
//! sim.set_parameter("vx", 4.0)
//! sim.set_parameter("omegaz", 1500.0)
//! sim.start()
//!
//! last = time.monotonic()
//! while sim.in_flight():
//!     now = time.monotonic()
//!     sim.tick(now - last)
//!     last = now
//!     draw(sim.position(), sim.trajectory())
//! ```

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use spinball_core::{
    BodyParameter, Simulation as CoreSimulation, SimulationConfig, SimulationError,
    Vec3 as CoreVec3,
};

fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::UnknownParameter(name) => PyKeyError::new_err(name),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Ball position (m) or velocity (m/s) as returned by `Simulation.position()`
/// and `Simulation.velocity()`. Y is up; the ground plane is y = 0.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        CoreVec3::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

/// Projectile flight driven by wall-clock ticks.
#[pyclass]
pub struct Simulation {
    inner: CoreSimulation,
}

#[pymethods]
impl Simulation {
    /// Create a simulation from defaults, or from a YAML configuration file.
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => SimulationConfig::from_yaml_file(path).map_err(to_py_err)?,
            None => SimulationConfig::default(),
        };
        let inner = CoreSimulation::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Fixed integration step in seconds.
    #[getter]
    fn dt(&self) -> f64 {
        self.inner.dt()
    }

    /// Simulated seconds since the last restart.
    #[getter]
    fn time(&self) -> f64 {
        self.inner.time()
    }

    /// Integration steps since the last restart.
    #[getter]
    fn steps(&self) -> u64 {
        self.inner.steps()
    }

    /// Set a body parameter (`m`, `vx`, `vy`, `vz`, `omegax`, `omegay`, `omegaz`)
    /// and restart the flight.
    fn set_parameter(&mut self, name: &str, value: f64) -> PyResult<()> {
        self.inner.set_parameter(name, value).map_err(to_py_err)
    }

    fn get_parameter(&self, name: &str) -> PyResult<f64> {
        let param: BodyParameter = name.parse().map_err(to_py_err)?;
        Ok(self.inner.parameter(param))
    }

    /// Slider hints for a parameter as (min, max, step).
    #[staticmethod]
    fn parameter_range(name: &str) -> PyResult<(f64, f64, f64)> {
        let param: BodyParameter = name.parse().map_err(to_py_err)?;
        let range = param.slider_range();
        Ok((range.min, range.max, range.step))
    }

    /// Names accepted by `set_parameter`.
    #[staticmethod]
    fn parameter_names() -> Vec<&'static str> {
        BodyParameter::ALL.iter().map(|p| p.name()).collect()
    }

    fn start(&mut self) {
        self.inner.start();
    }

    fn stop(&mut self) {
        self.inner.stop();
    }

    fn toggle_running(&mut self) {
        self.inner.toggle_running();
    }

    fn restart(&mut self) {
        self.inner.restart();
    }

    fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    fn in_flight(&self) -> bool {
        self.inner.in_flight()
    }

    /// Feed elapsed wall-clock seconds; returns the number of fixed steps consumed.
    fn tick(&mut self, frame_time: f64) -> usize {
        self.inner.tick(frame_time)
    }

    fn position(&self) -> Vec3 {
        self.inner.position().into()
    }

    fn velocity(&self) -> Vec3 {
        self.inner.velocity().into()
    }

    /// Trajectory as a list of (x, y, z) tuples, oldest first.
    fn trajectory(&self) -> Vec<(f64, f64, f64)> {
        self.inner
            .trajectory()
            .iter()
            .map(|p| (p.x, p.y, p.z))
            .collect()
    }

    /// Get current state as dict for easy inspection.
    fn state_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        let pos = self.inner.position();
        let vel = self.inner.velocity();
        dict.set_item("time", self.inner.time())?;
        dict.set_item("steps", self.inner.steps())?;
        dict.set_item("running", self.inner.is_running())?;
        dict.set_item("in_flight", self.inner.in_flight())?;
        dict.set_item("x", pos.x)?;
        dict.set_item("y", pos.y)?;
        dict.set_item("z", pos.z)?;
        dict.set_item("vx", vel.x)?;
        dict.set_item("vy", vel.y)?;
        dict.set_item("vz", vel.z)?;
        dict.set_item("speed", vel.magnitude())?;
        Ok(dict)
    }
}

/// Route engine logs to stderr. `RUST_LOG` takes precedence over `level`.
#[pyfunction]
#[pyo3(signature = (level="info"))]
fn init_logging(level: &str) -> PyResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    tracing::debug!(level, "logging initialized");
    Ok(())
}

/// Python module definition.
#[pymodule]
fn spinball(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<Simulation>()?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    Ok(())
}
