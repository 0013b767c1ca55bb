//! Light Distribution.

mod irradiance;
mod power;

pub use irradiance::*;
pub use power::*;

use crate::error::*;
use crate::geometry::*;
use crate::light::*;
use crate::pbrt::*;
use crate::sampling::*;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Light sampling strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LightSampleStategy {
    /// Samples light sources according to their emitted power.
    Power,

    /// Samples light sources according to an estimate of the irradiance they
    /// deliver at the lit point.
    #[default]
    Irradiance,
}

impl FromStr for LightSampleStategy {
    type Err = ConfigError;

    /// Returns a `LightSampleStategy` given a string name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "power" => Ok(Self::Power),
            "irradiance" => Ok(Self::Irradiance),
            _ => Err(ConfigError::UnknownStrategy(name.to_string())),
        }
    }
}

impl fmt::Display for LightSampleStategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power => write!(f, "power"),
            Self::Irradiance => write!(f, "irradiance"),
        }
    }
}

/// Interface of strategies that build a CDF for picking one of the infinite
/// and area lights at a given point. Delta lights are never part of the CDF.
pub trait LightsSamplingStrategy {
    /// Fills `cdf` with the cumulative distribution over the infinite lights
    /// followed by the area lights. The buffer must hold exactly that many
    /// entries; it is left untouched when there are no such lights.
    ///
    /// * `p`   - The lit point.
    /// * `n`   - If given, only light arriving at the hemisphere around this
    ///           normal is considered.
    /// * `cdf` - Output buffer.
    fn get_lights_cdf(&self, p: &Point3f, n: Option<&Normal3f>, cdf: &mut [Float]);
}

/// Atomic reference counted `LightsSamplingStrategy`.
pub type ArcLightsSamplingStrategy = Arc<dyn LightsSamplingStrategy + Send + Sync>;

/// Returns a new `LightsSamplingStrategy` implementation.
///
/// * `strategy`      - The strategy to use for light sampling.
/// * `light_sources` - The scene lights.
pub fn create_lights_sampling_strategy(
    strategy: LightSampleStategy,
    light_sources: &LightSources,
) -> ArcLightsSamplingStrategy {
    match strategy {
        LightSampleStategy::Power => Arc::new(PowerLightsSamplingStrategy::new(light_sources)),
        LightSampleStategy::Irradiance => {
            Arc::new(IrradianceLightsSamplingStrategy::new(light_sources))
        }
    }
}
