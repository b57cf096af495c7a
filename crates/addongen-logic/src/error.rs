//! Errors surfaced by addon generation.

use crate::config::ConfigError;

/// Reasons an addon could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AddonError {
    /// Growth swept every member and direction repeatedly without fitting a
    /// new footprint.
    GrowthExhausted { area: i64, target: i64, sweeps: u32 },
    /// The radial scan walked its full length without a free offset.
    PlacementExhausted { angle: f32, steps: u32 },
    /// The configuration failed validation.
    InvalidConfig(Vec<ConfigError>),
}

impl std::fmt::Display for AddonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddonError::GrowthExhausted {
                area,
                target,
                sweeps,
            } => write!(
                f,
                "Cluster growth exhausted after {} sweeps: area {} of {}",
                sweeps, area, target
            ),
            AddonError::PlacementExhausted { angle, steps } => write!(
                f,
                "No free placement within {} steps along {:.3} rad",
                steps, angle
            ),
            AddonError::InvalidConfig(errors) => {
                write!(f, "Invalid addon config:")?;
                for e in errors {
                    write!(f, " {};", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for AddonError {}

impl From<Vec<ConfigError>> for AddonError {
    fn from(errors: Vec<ConfigError>) -> Self {
        AddonError::InvalidConfig(errors)
    }
}
