// ==============================================================================
// models.rs - Haplotype Data Models
// ==============================================================================
// Description: SNP positions, diploid strand pairs and per-file haplotype sets
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{PhasingError, Result};

/// One SNP line of an MSMC input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnpPosition {
    /// Absolute base pair position on the chromosome
    pub position: u64,

    /// Distance to the previous SNP (number of called sites since it)
    pub distance: u64,
}

impl SnpPosition {
    pub fn new(position: u64, distance: u64) -> Self {
        Self { position, distance }
    }
}

/// Two homologous strands of one individual, one allele byte per SNP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiploidPair {
    pub strand_a: Vec<u8>,
    pub strand_b: Vec<u8>,
}

impl DiploidPair {
    pub fn new(strand_a: impl Into<Vec<u8>>, strand_b: impl Into<Vec<u8>>) -> Self {
        Self {
            strand_a: strand_a.into(),
            strand_b: strand_b.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.strand_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strand_a.is_empty()
    }
}

/// Parsed contents of one per-chromosome haplotype file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaplotypeData {
    /// Chromosome label, constant across the file
    pub chromosome: String,

    /// SNP positions in physical order
    pub snps: Vec<SnpPosition>,

    /// Diploid pairs in column order; all share `snps`
    pub pairs: Vec<DiploidPair>,
}

impl HaplotypeData {
    pub fn snp_count(&self) -> usize {
        self.snps.len()
    }

    /// Number of haplotype strands (allele column width)
    pub fn haplotype_count(&self) -> usize {
        self.pairs.len() * 2
    }

    /// SNP absolute positions only
    pub fn positions(&self) -> Vec<u64> {
        self.snps.iter().map(|s| s.position).collect()
    }

    /// Check strand lengths against the SNP list and SNP ordering
    pub fn validate(&self) -> Result<()> {
        for pair in &self.pairs {
            if pair.strand_a.len() != self.snps.len() || pair.strand_b.len() != self.snps.len() {
                return Err(PhasingError::LengthMismatch {
                    strand_a: pair.strand_a.len(),
                    strand_b: pair.strand_b.len(),
                    snps: self.snps.len(),
                });
            }
        }

        for (idx, window) in self.snps.windows(2).enumerate() {
            if window[1].position < window[0].position {
                return Err(PhasingError::UnsortedPositions {
                    line: idx + 2,
                    previous: window[0].position,
                    current: window[1].position,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> HaplotypeData {
        HaplotypeData {
            chromosome: "1".to_string(),
            snps: vec![SnpPosition::new(10, 10), SnpPosition::new(20, 10)],
            pairs: vec![DiploidPair::new(*b"AC", *b"CA"), DiploidPair::new(*b"GG", *b"TT")],
        }
    }

    #[test]
    fn test_counts() {
        let data = sample_data();
        assert_eq!(data.snp_count(), 2);
        assert_eq!(data.haplotype_count(), 4);
        assert_eq!(data.positions(), vec![10, 20]);
    }

    #[test]
    fn test_validate_accepts_consistent_data() {
        assert!(sample_data().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_strand() {
        let mut data = sample_data();
        data.pairs[1].strand_b.pop();
        assert!(matches!(
            data.validate(),
            Err(PhasingError::LengthMismatch { strand_b: 1, snps: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_decreasing_positions() {
        let mut data = sample_data();
        data.snps[1].position = 5;
        assert!(matches!(
            data.validate(),
            Err(PhasingError::UnsortedPositions { line: 2, previous: 10, current: 5 })
        ));
    }
}
