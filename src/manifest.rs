// ==============================================================================
// manifest.rs - Run Manifest
// ==============================================================================
// Description: JSON record of a simulation run for reproducibility
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::output::write_atomic;

/// Everything needed to reproduce or audit one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Master seed; file i uses `seed + i`
    pub seed: u64,
    pub sequence_length: u64,
    pub mean_spacing: f64,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Processed {
        output: PathBuf,
        /// SHA-256 of the (decompressed) input content
        input_sha256: String,
        /// SHA-256 of the (uncompressed) output content
        output_sha256: String,
        pairs: usize,
        snps: usize,
        switches_generated: usize,
        switches_triggered: usize,
    },
    Skipped {
        error: String,
    },
}

impl RunManifest {
    pub fn new(config: &SimulationConfig, seed: u64) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            seed,
            sequence_length: config.sequence_length,
            mean_spacing: config.mean_spacing,
            files: Vec::new(),
        }
    }

    pub fn processed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Processed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.len() - self.processed_count()
    }

    /// Write the manifest as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run manifest")?;
        write_atomic(path, &json).with_context(|| format!("Failed to write manifest {:?}", path))?;
        Ok(())
    }
}

/// Lowercase hex SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_manifest_json_round_trip() {
        let mut manifest = RunManifest::new(&SimulationConfig::default(), 17);
        manifest.files.push(FileEntry {
            input: PathBuf::from("in/data1.txt"),
            outcome: FileOutcome::Processed {
                output: PathBuf::from("out/data1.txt"),
                input_sha256: sha256_hex(b"in"),
                output_sha256: sha256_hex(b"out"),
                pairs: 2,
                snps: 100,
                switches_generated: 5,
                switches_triggered: 4,
            },
        });
        manifest.files.push(FileEntry {
            input: PathBuf::from("in/bad.txt"),
            outcome: FileOutcome::Skipped {
                error: "Input contains no records".to_string(),
            },
        });

        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        manifest.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["seed"], 17);
        assert_eq!(value["files"][0]["outcome"]["status"], "processed");
        assert_eq!(value["files"][1]["outcome"]["status"], "skipped");

        let parsed: RunManifest = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.processed_count(), 1);
        assert_eq!(parsed.skipped_count(), 1);
        assert_eq!(parsed.files[1].outcome, manifest.files[1].outcome);
    }
}
