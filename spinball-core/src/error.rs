//! Error type shared by configuration, presets and the parameter sink.

/// Errors surfaced by the flight engine.
///
/// Integration itself never fails; everything here is raised while building a
/// simulation, changing its parameters, or loading configuration files.
#[derive(Debug)]
pub enum SimulationError {
    InvalidConfig(String),
    InvalidParameter { name: String, value: f64 },
    UnknownParameter(String),
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
            SimulationError::InvalidParameter { name, value } => {
                write!(f, "Invalid value {} for parameter '{}'", value, name)
            }
            SimulationError::UnknownParameter(name) => write!(f, "Unknown parameter: {}", name),
            SimulationError::IoError(e) => write!(f, "IO error: {}", e),
            SimulationError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            SimulationError::NotFound(name) => write!(f, "Preset not found: {}", name),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::IoError(e) => Some(e),
            SimulationError::ParseError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::IoError(err)
    }
}

impl From<serde_yaml::Error> for SimulationError {
    fn from(err: serde_yaml::Error) -> Self {
        SimulationError::ParseError(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
