// ==============================================================================
// msmc.rs - MSMC Haplotype Input Parser
// ==============================================================================
// Description: Parser for per-chromosome MSMC haplotype files
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format: Tab-delimited text, no header
// Example (two diploid individuals, four strands):
//   1    1043    1043    ACAC
//   1    2290    1247    ACCA
//   1    5012    2722    TTAT
// Column 4 holds one allele per strand; strand k is column k of that field
// read down all lines, and strands (2i, 2i+1) form individual i.
// ==============================================================================

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{PhasingError, Result};
use crate::models::{DiploidPair, HaplotypeData, SnpPosition};

/// Fixed-width (line, strand) allele buffer built once per file
#[derive(Debug, Clone)]
struct AlleleMatrix {
    width: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl AlleleMatrix {
    fn new(width: usize) -> Self {
        Self {
            width,
            rows: 0,
            cells: Vec::new(),
        }
    }

    fn push_row(&mut self, row: &[u8]) {
        debug_assert_eq!(row.len(), self.width);
        self.cells.extend_from_slice(row);
        self.rows += 1;
    }

    fn column(&self, k: usize) -> Vec<u8> {
        (0..self.rows)
            .map(|row| self.cells[row * self.width + k])
            .collect()
    }
}

/// Parse the contents of one MSMC haplotype file
///
/// # Returns
/// * `Ok(HaplotypeData)` - chromosome, SNP list and diploid pairs
/// * `Err(PhasingError)` - parse error (empty input, missing fields, bad
///   integers, varying allele width) or validation error (no strands, odd
///   strand count, chromosome change, decreasing positions)
///
/// Fields after the fourth are ignored; blank lines are skipped.
pub fn parse(content: &str) -> Result<HaplotypeData> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let mut chromosome: Option<String> = None;
    let mut snps = Vec::new();
    let mut matrix: Option<AlleleMatrix> = None;

    for result in reader.records() {
        let record = result.map_err(|e| PhasingError::MalformedLine {
            line: e.position().map(|p| p.line() as usize).unwrap_or(0),
            details: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(snps.len() + 1);

        if record.len() < 4 {
            return Err(PhasingError::MalformedLine {
                line,
                details: format!("Expected 4 tab-delimited fields, found {}", record.len()),
            });
        }

        let chrom = &record[0];
        if let Some(expected) = &chromosome {
            if expected != chrom {
                return Err(PhasingError::ChromosomeMismatch {
                    line,
                    expected: expected.clone(),
                    found: chrom.to_string(),
                });
            }
        } else {
            chromosome = Some(chrom.to_string());
        }

        let position = parse_integer(&record[1], "position", line)?;
        let distance = parse_integer(&record[2], "distance", line)?;

        if let Some(previous) = snps.last().map(|s: &SnpPosition| s.position) {
            if position < previous {
                return Err(PhasingError::UnsortedPositions {
                    line,
                    previous,
                    current: position,
                });
            }
        }

        let alleles = record[3].as_bytes();
        if !alleles.is_ascii() {
            return Err(PhasingError::MalformedLine {
                line,
                details: "Allele column contains non-ASCII characters".to_string(),
            });
        }

        let matrix = matrix.get_or_insert_with(|| AlleleMatrix::new(alleles.len()));
        if alleles.len() != matrix.width {
            return Err(PhasingError::InconsistentWidth {
                line,
                expected: matrix.width,
                found: alleles.len(),
            });
        }
        matrix.push_row(alleles);
        snps.push(SnpPosition::new(position, distance));
    }

    let (Some(chromosome), Some(matrix)) = (chromosome, matrix) else {
        return Err(PhasingError::EmptyInput);
    };

    if matrix.width == 0 {
        return Err(PhasingError::NoHaplotypes);
    }
    if matrix.width % 2 != 0 {
        return Err(PhasingError::OddHaplotypeCount { width: matrix.width });
    }

    let pairs = (0..matrix.width / 2)
        .map(|i| DiploidPair::new(matrix.column(2 * i), matrix.column(2 * i + 1)))
        .collect();

    Ok(HaplotypeData {
        chromosome,
        snps,
        pairs,
    })
}

/// Read and parse an MSMC file from disk (`.gz` files are decompressed)
pub fn parse_file(path: impl AsRef<Path>) -> Result<HaplotypeData> {
    let content = read_input(path.as_ref())?;
    parse(&content)
}

/// Read a whole input file into memory, gunzipping `.gz` paths
pub fn read_input(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut content = String::new();

    if is_gzip_path(path) {
        GzDecoder::new(file).read_to_string(&mut content)?;
    } else {
        file.read_to_string(&mut content)?;
    }

    Ok(content)
}

pub(crate) fn is_gzip_path(path: &Path) -> bool {
    path.extension().map(|ext| ext == "gz").unwrap_or(false)
}

fn parse_integer(value: &str, field: &'static str, line: usize) -> Result<u64> {
    value.parse::<u64>().map_err(|_| PhasingError::InvalidInteger {
        line,
        field,
        value: value.to_string(),
    })
}
