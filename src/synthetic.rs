// ==============================================================================
// synthetic.rs - Synthetic Haplotype Dataset Generator
// ==============================================================================
// Description: Writes toy MSMC input files for exercising the simulator
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Every file shares one sorted set of uniformly drawn SNP positions and
// repeats the same allele pattern on each line, e.g. with pattern ACAC:
//   1    1043    1043    ACAC
//   1    2290    1247    ACAC
// File i (1-based) is named data{i}.txt and uses chromosome label i.
// ==============================================================================

use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{PhasingError, Result};
use crate::models::{DiploidPair, HaplotypeData, SnpPosition};
use crate::output::{serialize_data, write_atomic};

/// Allele pattern used when none is given (two heterozygous individuals)
pub const DEFAULT_PATTERN: &str = "ACAC";

/// Shape of a synthetic dataset
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Number of files (chromosomes) to write
    pub files: usize,
    /// SNPs per file
    pub snps: usize,
    /// Positions are drawn from `1..=sequence_length`
    pub sequence_length: u64,
    /// Allele column repeated on every line
    pub pattern: String,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            files: 10,
            snps: 100,
            sequence_length: 2_000_000,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Draw `count` sorted positions uniformly from `1..=sequence_length`
pub fn draw_positions<R: Rng + ?Sized>(rng: &mut R, count: usize, sequence_length: u64) -> Result<Vec<SnpPosition>> {
    if sequence_length == 0 {
        return Err(PhasingError::InvalidConfig(
            "sequence_length must be positive".to_string(),
        ));
    }

    let mut positions: Vec<u64> = (0..count).map(|_| rng.gen_range(1..=sequence_length)).collect();
    positions.sort_unstable();

    let mut previous = 0;
    Ok(positions
        .into_iter()
        .map(|position| {
            let snp = SnpPosition::new(position, position - previous);
            previous = position;
            snp
        })
        .collect())
}

/// Build one chromosome's haplotype set with `pattern` on every SNP
pub fn build_dataset(chromosome: &str, snps: Vec<SnpPosition>, pattern: &str) -> Result<HaplotypeData> {
    let bytes = pattern.as_bytes();
    if bytes.is_empty() || !bytes.is_ascii() || bytes.len() % 2 != 0 || pattern.contains(['\t', '\n', '\r']) {
        return Err(PhasingError::InvalidPattern(pattern.to_string()));
    }

    let pairs = bytes
        .chunks_exact(2)
        .map(|alleles| DiploidPair::new(vec![alleles[0]; snps.len()], vec![alleles[1]; snps.len()]))
        .collect();

    Ok(HaplotypeData {
        chromosome: chromosome.to_string(),
        snps,
        pairs,
    })
}

/// Write `config.files` synthetic files into `dir`
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Paths written, in file order
pub fn write_dataset<R: Rng + ?Sized>(dir: &Path, config: &SyntheticConfig, rng: &mut R) -> Result<Vec<PathBuf>> {
    let snps = draw_positions(rng, config.snps, config.sequence_length)?;
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(config.files);
    for i in 1..=config.files {
        let data = build_dataset(&i.to_string(), snps.clone(), &config.pattern)?;
        let path = dir.join(format!("data{}.txt", i));
        write_atomic(&path, &serialize_data(&data)?)?;
        written.push(path);
    }

    info!(
        "Generated {} synthetic files with {} SNPs each in {:?}",
        written.len(),
        config.snps,
        dir
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_file;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    #[test]
    fn test_draw_positions_sorted_with_distances() {
        let mut rng = StdRng::seed_from_u64(3);
        let snps = draw_positions(&mut rng, 500, 10_000).unwrap();

        assert_eq!(snps.len(), 500);
        assert!(snps.windows(2).all(|w| w[0].position <= w[1].position));
        assert!(snps.iter().all(|s| (1..=10_000).contains(&s.position)));
        assert_eq!(snps[0].distance, snps[0].position);
        for w in snps.windows(2) {
            assert_eq!(w[1].distance, w[1].position - w[0].position);
        }
    }

    #[test]
    fn test_build_dataset_rejects_bad_pattern() {
        for pattern in ["", "ACA", "A\tCA"] {
            assert!(matches!(
                build_dataset("1", vec![SnpPosition::new(1, 1)], pattern),
                Err(PhasingError::InvalidPattern(_))
            ));
        }
    }

    #[test]
    fn test_write_dataset_parses_back() {
        let dir = tempdir().unwrap();
        let config = SyntheticConfig {
            files: 3,
            snps: 20,
            ..SyntheticConfig::default()
        };

        let paths = write_dataset(dir.path(), &config, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(paths.len(), 3);

        let first = parse_file(&paths[0]).unwrap();
        let third = parse_file(&paths[2]).unwrap();
        assert_eq!(first.chromosome, "1");
        assert_eq!(third.chromosome, "3");
        assert_eq!(first.snps, third.snps);
        assert_eq!(first.pairs.len(), 2);
        assert_eq!(first.pairs[0], DiploidPair::new(vec![b'A'; 20], vec![b'C'; 20]));
    }
}
