// ==============================================================================
// phasing.rs - Switch Error Simulation
// ==============================================================================
// Description: Applies switch-error coordinates to diploid strand pairs
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   Walk SNPs in order with a swapped/identity flag. Before emitting SNP i,
//   consume every pending error coordinate <= position[i] (ascending), one
//   flag toggle each. While swapped, A' takes B's allele and B' takes A's.
//   Coordinates past the last SNP never trigger.
//
//   A = ACGT  B = TGCA  positions = 10 20 30 40  errors = [25]
//   SNP 30 is the first with position >= 25, so indices 2.. are swapped:
//   A' = AC|CA  B' = TG|GT
// ==============================================================================

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PhasingError, Result};
use crate::error_model::ErrorModel;
use crate::models::{DiploidPair, HaplotypeData};

/// Switch-error bookkeeping for one diploid pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwitchSummary {
    /// Error coordinates drawn for the pair
    pub generated: usize,

    /// Coordinates that fell at or before the last SNP and toggled the pair
    pub triggered: usize,
}

/// Relabel two strands at the given switch-error coordinates
///
/// # Arguments
/// * `strand_a`, `strand_b` - Alleles of the pair, one byte per SNP
/// * `positions` - SNP absolute positions, index-aligned with the strands
/// * `error_positions` - Ascending switch-error coordinates (may be empty)
///
/// # Returns
/// * `Ok((a, b))` - Relabeled strands; at every index `{a[i], b[i]}` equals
///   `{strand_a[i], strand_b[i]}`
/// * `Err(PhasingError)` - Strand/position length mismatch or descending
///   error coordinates
///
/// Equal coordinates each toggle once, so a repeated coordinate cancels out.
///
/// # Examples
/// ```
/// use phasing_error_sim::phasing::apply_phasing_errors;
///
/// let (a, b) = apply_phasing_errors(b"ACGT", b"TGCA", &[10, 20, 30, 40], &[25]).unwrap();
/// assert_eq!(a, b"ACCA");
/// assert_eq!(b, b"TGGT");
/// ```
pub fn apply_phasing_errors(
    strand_a: &[u8],
    strand_b: &[u8],
    positions: &[u64],
    error_positions: &[u64],
) -> Result<(Vec<u8>, Vec<u8>)> {
    let (a, b, _) = switch_strands(strand_a, strand_b, positions, error_positions)?;
    Ok((a, b))
}

fn switch_strands(
    strand_a: &[u8],
    strand_b: &[u8],
    positions: &[u64],
    error_positions: &[u64],
) -> Result<(Vec<u8>, Vec<u8>, usize)> {
    if strand_a.len() != positions.len() || strand_b.len() != positions.len() {
        return Err(PhasingError::LengthMismatch {
            strand_a: strand_a.len(),
            strand_b: strand_b.len(),
            snps: positions.len(),
        });
    }

    if let Some(w) = error_positions.windows(2).find(|w| w[1] < w[0]) {
        return Err(PhasingError::UnsortedErrorPositions {
            previous: w[0],
            current: w[1],
        });
    }

    if error_positions.is_empty() {
        return Ok((strand_a.to_vec(), strand_b.to_vec(), 0));
    }

    let mut new_a = Vec::with_capacity(strand_a.len());
    let mut new_b = Vec::with_capacity(strand_b.len());
    let mut pending = error_positions.iter().peekable();
    let mut swapped = false;
    let mut triggered = 0;

    for (idx, &position) in positions.iter().enumerate() {
        while let Some(&&error) = pending.peek() {
            if position < error {
                break;
            }
            swapped = !swapped;
            triggered += 1;
            pending.next();
        }

        if swapped {
            new_a.push(strand_b[idx]);
            new_b.push(strand_a[idx]);
        } else {
            new_a.push(strand_a[idx]);
            new_b.push(strand_b[idx]);
        }
    }

    Ok((new_a, new_b, triggered))
}

/// Apply a pre-drawn error sequence to one pair
pub fn apply_to_pair(
    pair: &DiploidPair,
    positions: &[u64],
    error_positions: &[u64],
) -> Result<(DiploidPair, SwitchSummary)> {
    let (a, b, triggered) = switch_strands(&pair.strand_a, &pair.strand_b, positions, error_positions)?;
    Ok((
        DiploidPair::new(a, b),
        SwitchSummary {
            generated: error_positions.len(),
            triggered,
        },
    ))
}

/// Draw an independent error sequence for every pair and apply it
///
/// Pairs draw from `rng` in column order, so a seeded RNG reproduces the
/// same output for the same input.
pub fn simulate_haplotypes<R: Rng + ?Sized>(
    data: &HaplotypeData,
    model: &ErrorModel,
    rng: &mut R,
) -> Result<(HaplotypeData, Vec<SwitchSummary>)> {
    let positions = data.positions();
    let mut pairs = Vec::with_capacity(data.pairs.len());
    let mut summaries = Vec::with_capacity(data.pairs.len());

    for pair in &data.pairs {
        let error_positions = model.generate(rng);
        let (new_pair, summary) = apply_to_pair(pair, &positions, &error_positions)?;
        pairs.push(new_pair);
        summaries.push(summary);
    }

    Ok((
        HaplotypeData {
            chromosome: data.chromosome.clone(),
            snps: data.snps.clone(),
            pairs,
        },
        summaries,
    ))
}
