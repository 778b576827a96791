//! Simulation configuration and preset loading.
//!
//! A [`SimulationConfig`] carries everything fixed for the lifetime of a
//! simulation: step size, trajectory length, environment constants and the
//! initial body parameters. It can be written in YAML; omitted fields fall back
//! to the defaults, so a file only has to name what it changes:
//!
//! ```yaml
//! dt: 0.005
//! environment:
//!   air_density: 1.2
//! body:
//!   mass: 0.45
//!   launch_velocity: { x: 8.0, y: 6.0, z: 0.0 }
//!   spin: { x: 0.0, y: 0.0, z: 300.0 }
//! ```
//!
//! ## Preset Directory Structure
//!
//! ```text
//! presets/
//! ├── environments/
//! │   ├── standard.yaml
//! │   └── vacuum.yaml
//! ├── bodies/
//! │   └── backspin_lob.yaml
//! └── simulations/
//!     └── default.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::types::{constants, BodyParameters, Environment, Vec3};

/// Construction-time settings of a [`Simulation`](crate::simulation::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed integration step (s)
    pub dt: f64,
    /// Trajectory keeps `trajectory_capacity + 1` samples
    pub trajectory_capacity: usize,
    /// Most wall-clock time a single tick may add to the accumulator (s)
    pub max_frame_time: f64,
    /// Flight continues while `position.y >= ground_threshold`
    pub ground_threshold: f64,
    pub start_position: Vec3,
    /// Stop integrating instead of propagating NaN/Inf into the trajectory
    pub detect_divergence: bool,
    pub environment: Environment,
    pub body: BodyParameters,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: constants::DEFAULT_DT,
            trajectory_capacity: constants::TRAJECTORY_CAPACITY,
            max_frame_time: constants::MAX_FRAME_TIME,
            ground_threshold: constants::GROUND_THRESHOLD,
            start_position: Vec3::from(constants::START_POSITION),
            detect_divergence: false,
            environment: Environment::default(),
            body: BodyParameters::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: SimulationConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Reject settings that would silently produce NaN or a frozen clock.
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid(format!("dt must be positive and finite, got {}", self.dt)));
        }
        if self.trajectory_capacity == 0 {
            return Err(invalid("trajectory_capacity must be at least 1".to_string()));
        }
        if self.trajectory_capacity > constants::MAX_TRAJECTORY_CAPACITY {
            return Err(invalid(format!(
                "trajectory_capacity must be at most {}, got {}",
                constants::MAX_TRAJECTORY_CAPACITY,
                self.trajectory_capacity
            )));
        }
        if !(self.max_frame_time.is_finite() && self.max_frame_time > 0.0) {
            return Err(invalid(format!(
                "max_frame_time must be positive and finite, got {}",
                self.max_frame_time
            )));
        }
        if !self.ground_threshold.is_finite() {
            return Err(invalid("ground_threshold must be finite".to_string()));
        }
        if !self.start_position.is_finite() {
            return Err(invalid("start_position must be finite".to_string()));
        }
        validate_environment(&self.environment)?;
        validate_body(&self.body)
    }
}

fn invalid(reason: String) -> SimulationError {
    SimulationError::InvalidConfig(reason)
}

fn validate_environment(env: &Environment) -> Result<()> {
    let fields = [
        ("air_density", env.air_density),
        ("drag_coefficient", env.drag_coefficient),
        ("gravity", env.gravity),
        ("magnus_coefficient", env.magnus_coefficient),
        ("radius", env.radius),
    ];
    for (name, value) in fields {
        if !(value.is_finite() && value >= 0.0) {
            return Err(invalid(format!(
                "environment.{} must be non-negative and finite, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Body parameters must be finite with a strictly positive mass.
pub fn validate_body(body: &BodyParameters) -> Result<()> {
    if !(body.mass.is_finite() && body.mass > 0.0) {
        return Err(invalid(format!("body.mass must be positive, got {}", body.mass)));
    }
    if !body.launch_velocity.is_finite() {
        return Err(invalid("body.launch_velocity must be finite".to_string()));
    }
    if !body.spin.is_finite() {
        return Err(invalid("body.spin must be finite".to_string()));
    }
    Ok(())
}

// =============================================================================
// Presets
// =============================================================================

/// Loads named presets from a base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// The base path should contain `environments/`, `bodies/` and
    /// `simulations/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load an environment by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let env = loader.load_environment("vacuum")?;
    /// ```
    pub fn load_environment(&self, name: &str) -> Result<Environment> {
        let env: Environment = self.load("environments", name)?;
        validate_environment(&env)?;
        Ok(env)
    }

    pub fn load_body(&self, name: &str) -> Result<BodyParameters> {
        let body: BodyParameters = self.load("bodies", name)?;
        validate_body(&body)?;
        Ok(body)
    }

    pub fn load_simulation(&self, name: &str) -> Result<SimulationConfig> {
        let config: SimulationConfig = self.load("simulations", name)?;
        config.validate()?;
        Ok(config)
    }

    pub fn list_environments(&self) -> Result<Vec<String>> {
        self.list("environments")
    }

    pub fn list_bodies(&self) -> Result<Vec<String>> {
        self.list("bodies")
    }

    pub fn list_simulations(&self) -> Result<Vec<String>> {
        self.list("simulations")
    }

    fn load<T: serde::de::DeserializeOwned>(&self, subdir: &str, name: &str) -> Result<T> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SimulationError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn list(&self, subdir: &str) -> Result<Vec<String>> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
