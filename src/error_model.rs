// ==============================================================================
// error_model.rs - Switch Error Position Generator
// ==============================================================================
// Description: Draws switch-error coordinates as a Poisson process along a chromosome
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   position = 0
//   repeat:
//     step = trunc(Exp(mean = mean_spacing)) + 1     (always >= 1)
//     position += step
//     keep position while position <= sequence_length
//   The first position past sequence_length is discarded.
// ==============================================================================

use rand::Rng;
use rand_distr::{Distribution, Exp};

use crate::config::validate_parameters;
use crate::error::{PhasingError, Result};

/// Exponential inter-arrival model for switch errors
#[derive(Debug, Clone, Copy)]
pub struct ErrorModel {
    sequence_length: u64,
    mean_spacing: f64,
    distribution: Exp<f64>,
}

impl ErrorModel {
    pub fn new(sequence_length: u64, mean_spacing: f64) -> Result<Self> {
        validate_parameters(sequence_length, mean_spacing)?;

        let distribution = Exp::new(1.0 / mean_spacing)
            .map_err(|e| PhasingError::InvalidConfig(format!("mean_spacing: {}", e)))?;

        Ok(Self {
            sequence_length,
            mean_spacing,
            distribution,
        })
    }

    pub fn sequence_length(&self) -> u64 {
        self.sequence_length
    }

    pub fn mean_spacing(&self) -> f64 {
        self.mean_spacing
    }

    /// Draw one strictly increasing sequence of coordinates in `1..=sequence_length`
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u64> {
        let mut positions = Vec::new();
        let mut current: u64 = 0;

        loop {
            // Draws beyond u64::MAX saturate in the cast; the checked_add below ends the walk
            let step = (self.distribution.sample(rng).trunc() as u64).saturating_add(1);
            current = match current.checked_add(step) {
                Some(next) if next <= self.sequence_length => next,
                _ => break,
            };
            positions.push(current);
        }

        positions
    }
}

/// Generate switch-error coordinates for one diploid pair
///
/// # Arguments
/// * `sequence_length` - Assumed chromosome span (must be > 0)
/// * `mean_spacing` - Expected distance between errors (must be > 0)
/// * `rng` - Random source; pass a seeded RNG for reproducible runs
///
/// # Returns
/// * `Ok(Vec<u64>)` - Strictly increasing coordinates, each in `1..=sequence_length`
/// * `Err(PhasingError::InvalidConfig)` - Non-positive parameter
///
/// # Examples
/// ```
/// use phasing_error_sim::error_model::generate_error_positions;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let positions = generate_error_positions(2_000_000, 1e5, &mut rng).unwrap();
/// assert!(positions.windows(2).all(|w| w[0] < w[1]));
/// assert!(positions.iter().all(|&p| p >= 1 && p <= 2_000_000));
/// ```
pub fn generate_error_positions<R: Rng + ?Sized>(
    sequence_length: u64,
    mean_spacing: f64,
    rng: &mut R,
) -> Result<Vec<u64>> {
    Ok(ErrorModel::new(sequence_length, mean_spacing)?.generate(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_positions_strictly_increasing_and_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let positions = generate_error_positions(100_000, 2_500.0, &mut rng).unwrap();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            assert!(positions.iter().all(|&p| p > 0 && p <= 100_000));
        }
    }

    #[test]
    fn test_same_seed_same_positions() {
        let mut rng1 = StdRng::seed_from_u64(2015);
        let mut rng2 = StdRng::seed_from_u64(2015);
        assert_eq!(
            generate_error_positions(2_000_000, 1e4, &mut rng1).unwrap(),
            generate_error_positions(2_000_000, 1e4, &mut rng2).unwrap()
        );
    }

    #[test]
    fn test_tiny_spacing_fills_every_site() {
        // Exp draws below 1 truncate to 0, so every step is exactly 1
        let mut rng = StdRng::seed_from_u64(1);
        let positions = generate_error_positions(50, 1e-9, &mut rng).unwrap();
        assert_eq!(positions, (1..=50).collect::<Vec<u64>>());
    }

    #[test]
    fn test_mean_gap_tracks_mean_spacing() {
        let mut rng = StdRng::seed_from_u64(99);
        let positions = generate_error_positions(1_000_000, 100.0, &mut rng).unwrap();
        let mean_gap = *positions.last().unwrap() as f64 / positions.len() as f64;
        // trunc(Exp(100)) + 1 has mean ~100.5
        assert!((95.0..106.0).contains(&mean_gap), "mean gap {}", mean_gap);
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_error_positions(0, 1e6, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        let err = generate_error_positions(2_000_000, 0.0, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        let err = generate_error_positions(2_000_000, -1.0, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_huge_spacing_does_not_overflow() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let positions = generate_error_positions(2_000_000, 1e20, &mut rng).unwrap();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            assert!(positions.iter().all(|&p| p >= 1 && p <= 2_000_000));
        }
    }

    #[test]
    fn test_full_range_sequence_length_terminates() {
        let mut rng = StdRng::seed_from_u64(4);
        let positions = generate_error_positions(u64::MAX, 1e30, &mut rng).unwrap();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(positions.iter().all(|&p| p >= 1));
    }

    #[test]
    fn test_model_accessors() {
        let model = ErrorModel::new(2_000_000, 1e6).unwrap();
        assert_eq!(model.sequence_length(), 2_000_000);
        assert_eq!(model.mean_spacing(), 1e6);
    }
}
