// ==============================================================================
// main.rs - Phasing Error Simulator Entry Point
// ==============================================================================
// Description: CLI for injecting switch errors into MSMC haplotype files and
//              generating synthetic test data
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phasing_error_sim::config::{SimulationConfig, DEFAULT_MEAN_SPACING, DEFAULT_SEQUENCE_LENGTH};
use phasing_error_sim::processor::{discover_inputs, FailurePolicy, PhasingErrorProcessor, DEFAULT_EXTENSION};
use phasing_error_sim::synthetic::{self, SyntheticConfig, DEFAULT_PATTERN};

#[derive(Parser, Debug)]
#[command(author, version, about = "Add simulated phasing (switch) errors to MSMC haplotype files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inject switch errors into every input file
    Simulate {
        /// Input files or folders (folders are scanned for --extension files)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output folder
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Length of the sequence over which switch errors are placed
        #[arg(short = 'l', long, env = "PHASING_SEQUENCE_LENGTH", default_value_t = DEFAULT_SEQUENCE_LENGTH)]
        sequence_length: u64,

        /// Mean distance between switch errors
        #[arg(short = 'e', long, env = "PHASING_MEAN_SPACING", default_value_t = DEFAULT_MEAN_SPACING)]
        mean_spacing: f64,

        /// Master RNG seed (random if omitted)
        #[arg(long, env = "PHASING_SEED")]
        seed: Option<u64>,

        /// File suffix used when scanning input folders
        #[arg(long, default_value = DEFAULT_EXTENSION)]
        extension: String,

        /// Behaviour when a file fails
        #[arg(long, value_enum, default_value_t = FailurePolicy::Abort)]
        on_error: FailurePolicy,

        /// Write a JSON run manifest to this path
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Write synthetic MSMC input files for testing
    Generate {
        /// Output folder
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Number of files (chromosomes)
        #[arg(long, default_value_t = 10)]
        files: usize,

        /// SNPs per file
        #[arg(long, default_value_t = 100)]
        snps: usize,

        /// Positions are drawn from 1..=sequence_length
        #[arg(short = 'l', long, default_value_t = DEFAULT_SEQUENCE_LENGTH)]
        sequence_length: u64,

        /// Allele column written on every line
        #[arg(long, default_value = DEFAULT_PATTERN)]
        pattern: String,

        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phasing_error_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Simulate {
            inputs,
            output_dir,
            sequence_length,
            mean_spacing,
            seed,
            extension,
            on_error,
            manifest,
        } => {
            let config = SimulationConfig::new(sequence_length, mean_spacing, seed)
                .context("Invalid simulation parameters")?;

            let files = discover_inputs(&inputs, &extension)?;
            if files.is_empty() {
                anyhow::bail!("No input files found");
            }

            let processor = PhasingErrorProcessor::new(config, output_dir, on_error);
            let run = processor.process(&files)?;

            if let Some(path) = manifest {
                run.write_json(&path)?;
                info!("Run manifest written to {:?}", path);
            }

            info!("Done");
            Ok(())
        }
        Command::Generate {
            output_dir,
            files,
            snps,
            sequence_length,
            pattern,
            seed,
        } => {
            let seed = seed.unwrap_or_else(|| rand::random());
            info!("Generating synthetic data with seed {}", seed);

            let config = SyntheticConfig {
                files,
                snps,
                sequence_length,
                pattern,
            };
            let mut rng = StdRng::seed_from_u64(seed);
            synthetic::write_dataset(&output_dir, &config, &mut rng)
                .context("Failed to generate synthetic data")?;

            info!("Done");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulate_args(on_error: &str) -> Vec<&str> {
        vec!["phasing-error-sim", "simulate", "in.txt", "-o", "out", "--on-error", on_error]
    }

    #[test]
    fn test_on_error_accepts_known_policies() {
        for (value, expected) in [("abort", FailurePolicy::Abort), ("skip", FailurePolicy::Skip)] {
            match Args::try_parse_from(simulate_args(value)).unwrap().command {
                Command::Simulate { on_error, .. } => assert_eq!(on_error, expected),
                other => panic!("Expected simulate command, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_on_error_defaults_to_abort() {
        let args = Args::try_parse_from(["phasing-error-sim", "simulate", "in.txt", "-o", "out"]).unwrap();
        match args.command {
            Command::Simulate { on_error, .. } => assert_eq!(on_error, FailurePolicy::Abort),
            other => panic!("Expected simulate command, got {:?}", other),
        }
    }

    #[test]
    fn test_on_error_rejects_unknown_policy() {
        let err = Args::try_parse_from(simulate_args("skpi")).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
