// ==============================================================================
// processor.rs - Phasing Error Run Driver
// ==============================================================================
// Description: Parses each input file, injects switch errors per diploid pair
//              and writes the relabeled haplotypes to the output directory
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::SimulationConfig;
use crate::error_model::ErrorModel;
use crate::manifest::{sha256_hex, FileEntry, FileOutcome, RunManifest};
use crate::output::{serialize_data, write_atomic};
use crate::parsers::{parse, read_input};
use crate::phasing::simulate_haplotypes;

/// Default input suffix when expanding directories
pub const DEFAULT_EXTENSION: &str = ".txt";

/// What to do when one input file cannot be processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Stop the run at the first failing file
    Abort,
    /// Log the failure, record it in the manifest and continue
    Skip,
}

pub struct PhasingErrorProcessor {
    config: SimulationConfig,
    output_dir: PathBuf,
    policy: FailurePolicy,
}

impl PhasingErrorProcessor {
    pub fn new(config: SimulationConfig, output_dir: PathBuf, policy: FailurePolicy) -> Self {
        Self {
            config,
            output_dir,
            policy,
        }
    }

    /// Process every input file in order
    ///
    /// File `i` gets its own RNG seeded with `seed + i`, so a fixed seed and
    /// input list reproduce the same outputs. No output file is written for
    /// a file that fails.
    pub fn process(&self, inputs: &[PathBuf]) -> Result<RunManifest> {
        let model = ErrorModel::new(self.config.sequence_length, self.config.mean_spacing)
            .context("Invalid simulation parameters")?;
        self.check_output_collisions(inputs)?;

        let seed = self.config.seed.unwrap_or_else(|| rand::random());
        info!(
            "Simulating switch errors for {} files (sequence_length={}, mean_spacing={}, seed={})",
            inputs.len(),
            self.config.sequence_length,
            self.config.mean_spacing,
            seed
        );

        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.output_dir))?;

        let mut manifest = RunManifest::new(&self.config, seed);

        for (index, input) in inputs.iter().enumerate() {
            let file_seed = seed.wrapping_add(index as u64);
            match self.process_file(input, file_seed, &model) {
                Ok(outcome) => manifest.files.push(FileEntry {
                    input: input.clone(),
                    outcome,
                }),
                Err(e) => match self.policy {
                    FailurePolicy::Abort => {
                        return Err(e.context(format!("Failed to process {:?}", input)));
                    }
                    FailurePolicy::Skip => {
                        warn!("Skipping {:?}: {:#}", input, e);
                        manifest.files.push(FileEntry {
                            input: input.clone(),
                            outcome: FileOutcome::Skipped {
                                error: format!("{:#}", e),
                            },
                        });
                    }
                },
            }
        }

        info!(
            "Run complete: {} processed, {} skipped",
            manifest.processed_count(),
            manifest.skipped_count()
        );

        Ok(manifest)
    }

    fn process_file(&self, input: &Path, seed: u64, model: &ErrorModel) -> Result<FileOutcome> {
        let output = self.output_path(input)?;
        debug!("Processing {:?} -> {:?} (seed {})", input, output, seed);

        let content = read_input(input).with_context(|| format!("Failed to read {:?}", input))?;
        let data = parse(&content).with_context(|| format!("Failed to parse {:?}", input))?;

        let mut rng = StdRng::seed_from_u64(seed);
        let (simulated, summaries) = simulate_haplotypes(&data, model, &mut rng)
            .with_context(|| format!("Failed to simulate switch errors for {:?}", input))?;
        simulated.validate()?;

        let serialized = serialize_data(&simulated)?;
        write_atomic(&output, &serialized).with_context(|| format!("Failed to write {:?}", output))?;

        let switches_generated: usize = summaries.iter().map(|s| s.generated).sum();
        let switches_triggered: usize = summaries.iter().map(|s| s.triggered).sum();

        info!(
            "{:?}: chr {} with {} SNPs, {} pairs, {} switch errors applied",
            input,
            data.chromosome,
            data.snp_count(),
            data.pairs.len(),
            switches_triggered
        );

        Ok(FileOutcome::Processed {
            output,
            input_sha256: sha256_hex(content.as_bytes()),
            output_sha256: sha256_hex(serialized.as_bytes()),
            pairs: data.pairs.len(),
            snps: data.snp_count(),
            switches_generated,
            switches_triggered,
        })
    }

    /// Outputs are named after the input file, so two inputs sharing a file
    /// name in different folders would write the same output
    fn check_output_collisions(&self, inputs: &[PathBuf]) -> Result<()> {
        let mut seen: HashMap<PathBuf, &PathBuf> = HashMap::new();

        for input in inputs {
            let Some(file_name) = input.file_name() else {
                continue;
            };
            let output = self.output_dir.join(file_name);
            if let Some(first) = seen.insert(output.clone(), input) {
                anyhow::bail!(
                    "Inputs {:?} and {:?} would both be written to {:?}",
                    first,
                    input,
                    output
                );
            }
        }

        Ok(())
    }

    fn output_path(&self, input: &Path) -> Result<PathBuf> {
        let file_name = input
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid input path {:?}", input))?;
        let output = self.output_dir.join(file_name);

        if let (Ok(a), Ok(b)) = (input.canonicalize(), output.canonicalize()) {
            if a == b {
                anyhow::bail!("Output {:?} would overwrite its input", output);
            }
        }

        Ok(output)
    }
}

/// Expand input arguments into an ordered list of files
///
/// Directories contribute their direct children ending in `extension`,
/// sorted by name; plain files are kept as given.
pub fn discover_inputs(paths: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let before = inputs.len();
            for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
                let entry = entry.with_context(|| format!("Failed to read directory {:?}", path))?;
                if entry.file_type().is_file()
                    && entry.file_name().to_string_lossy().ends_with(extension)
                {
                    inputs.push(entry.into_path());
                }
            }
            debug!("Found {} '{}' files in {:?}", inputs.len() - before, extension, path);
        } else if path.is_file() {
            inputs.push(path.clone());
        } else {
            anyhow::bail!("Input not found: {:?}", path);
        }
    }

    Ok(inputs)
}
