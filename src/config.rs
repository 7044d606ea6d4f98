// ==============================================================================
// config.rs - Simulation Parameters
// ==============================================================================
// Description: Validated parameters for switch-error simulation runs
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{PhasingError, Result};

/// Assumed chromosome span when placing switch errors
pub const DEFAULT_SEQUENCE_LENGTH: u64 = 2_000_000;

/// Expected distance between consecutive switch errors
pub const DEFAULT_MEAN_SPACING: f64 = 1e6;

/// Parameters for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Chromosome span over which error coordinates are drawn
    pub sequence_length: u64,

    /// Mean of the exponential inter-arrival distance
    pub mean_spacing: f64,

    /// Master RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            mean_spacing: DEFAULT_MEAN_SPACING,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(sequence_length: u64, mean_spacing: f64, seed: Option<u64>) -> Result<Self> {
        let config = Self {
            sequence_length,
            mean_spacing,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.sequence_length, self.mean_spacing)
    }
}

/// Reject a zero sequence length or a non-positive / non-finite mean spacing
pub fn validate_parameters(sequence_length: u64, mean_spacing: f64) -> Result<()> {
    if sequence_length == 0 {
        return Err(PhasingError::InvalidConfig(
            "sequence_length must be positive".to_string(),
        ));
    }

    if !(mean_spacing.is_finite() && mean_spacing > 0.0) {
        return Err(PhasingError::InvalidConfig(format!(
            "mean_spacing must be a positive finite number, got {}",
            mean_spacing
        )));
    }

    Ok(())
}
