//! Named body parameters, as exposed to a controls layer.
//!
//! Each parameter has a short name (`m`, `vx`, `omegaz`, ...) and a slider
//! range describing the values a control panel offers. The ranges are hints
//! for building widgets; the engine itself only rejects values that cannot
//! produce a meaningful flight (non-finite numbers, non-positive mass).

use std::fmt;
use std::str::FromStr;

use crate::error::SimulationError;
use crate::types::BodyParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyParameter {
    Mass,
    VelocityX,
    VelocityY,
    VelocityZ,
    SpinX,
    SpinY,
    SpinZ,
}

/// Suggested `min..=max` range and increment for a control widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl BodyParameter {
    pub const ALL: [BodyParameter; 7] = [
        BodyParameter::Mass,
        BodyParameter::VelocityX,
        BodyParameter::VelocityY,
        BodyParameter::VelocityZ,
        BodyParameter::SpinX,
        BodyParameter::SpinY,
        BodyParameter::SpinZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BodyParameter::Mass => "m",
            BodyParameter::VelocityX => "vx",
            BodyParameter::VelocityY => "vy",
            BodyParameter::VelocityZ => "vz",
            BodyParameter::SpinX => "omegax",
            BodyParameter::SpinY => "omegay",
            BodyParameter::SpinZ => "omegaz",
        }
    }

    pub fn slider_range(self) -> SliderRange {
        let (min, max) = match self {
            BodyParameter::Mass => (0.1, 10.0),
            BodyParameter::VelocityX | BodyParameter::VelocityY | BodyParameter::VelocityZ => {
                (0.0, 10.0)
            }
            BodyParameter::SpinX | BodyParameter::SpinY | BodyParameter::SpinZ => {
                (-10000.0, 10000.0)
            }
        };
        SliderRange {
            min,
            max,
            step: 0.01,
        }
    }

    pub fn get(self, body: &BodyParameters) -> f64 {
        match self {
            BodyParameter::Mass => body.mass,
            BodyParameter::VelocityX => body.launch_velocity.x,
            BodyParameter::VelocityY => body.launch_velocity.y,
            BodyParameter::VelocityZ => body.launch_velocity.z,
            BodyParameter::SpinX => body.spin.x,
            BodyParameter::SpinY => body.spin.y,
            BodyParameter::SpinZ => body.spin.z,
        }
    }

    /// Write `value` into `body` after checking it is usable.
    ///
    /// On error `body` is left untouched.
    pub fn set(self, body: &mut BodyParameters, value: f64) -> Result<(), SimulationError> {
        let usable = value.is_finite() && (self != BodyParameter::Mass || value > 0.0);
        if !usable {
            return Err(SimulationError::InvalidParameter {
                name: self.name().to_string(),
                value,
            });
        }

        let slot = match self {
            BodyParameter::Mass => &mut body.mass,
            BodyParameter::VelocityX => &mut body.launch_velocity.x,
            BodyParameter::VelocityY => &mut body.launch_velocity.y,
            BodyParameter::VelocityZ => &mut body.launch_velocity.z,
            BodyParameter::SpinX => &mut body.spin.x,
            BodyParameter::SpinY => &mut body.spin.y,
            BodyParameter::SpinZ => &mut body.spin.z,
        };
        *slot = value;
        Ok(())
    }
}

impl fmt::Display for BodyParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyParameter {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyParameter::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SimulationError::UnknownParameter(s.to_string()))
    }
}
