// ==============================================================================
// output.rs - MSMC Haplotype Output
// ==============================================================================
// Description: Serializes haplotype sets back to MSMC input format and writes
//              output files atomically
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use csv::{QuoteStyle, Terminator, WriterBuilder};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{PhasingError, Result};
use crate::models::{DiploidPair, HaplotypeData, SnpPosition};
use crate::parsers::msmc::is_gzip_path;

/// Serialize one chromosome's haplotypes, one tab-delimited line per SNP
///
/// The allele column is rebuilt pair by pair: strand A then strand B of each
/// pair, in column order. Output lines end with `\n`.
pub fn serialize(chromosome: &str, snps: &[SnpPosition], pairs: &[DiploidPair]) -> Result<String> {
    for pair in pairs {
        if pair.strand_a.len() != snps.len() || pair.strand_b.len() != snps.len() {
            return Err(PhasingError::LengthMismatch {
                strand_a: pair.strand_a.len(),
                strand_b: pair.strand_b.len(),
                snps: snps.len(),
            });
        }
    }

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut alleles = Vec::with_capacity(pairs.len() * 2);
    for (idx, snp) in snps.iter().enumerate() {
        alleles.clear();
        for pair in pairs {
            alleles.push(pair.strand_a[idx]);
            alleles.push(pair.strand_b[idx]);
        }

        let position = snp.position.to_string();
        let distance = snp.distance.to_string();
        writer
            .write_record([
                chromosome.as_bytes(),
                position.as_bytes(),
                distance.as_bytes(),
                alleles.as_slice(),
            ])
            .map_err(io::Error::from)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| PhasingError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Serialize a whole [`HaplotypeData`]
pub fn serialize_data(data: &HaplotypeData) -> Result<String> {
    serialize(&data.chromosome, &data.snps, &data.pairs)
}

/// Write `content` to `path` without ever exposing a partial file
///
/// The content is written to a temporary file in the destination directory,
/// synced, then renamed over `path`. Paths ending in `.gz` are gzipped.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;

    if is_gzip_path(path) {
        let mut encoder = GzEncoder::new(temp.as_file_mut(), Compression::default());
        encoder.write_all(content.as_bytes())?;
        encoder.finish()?;
    } else {
        temp.write_all(content.as_bytes())?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{parse, parse_file};
    use tempfile::tempdir;

    #[test]
    fn test_serialize_interleaves_pairs() {
        let snps = vec![SnpPosition::new(100, 100), SnpPosition::new(250, 150)];
        let pairs = vec![DiploidPair::new(*b"AC", *b"CA"), DiploidPair::new(*b"GT", *b"TG")];

        let content = serialize("1", &snps, &pairs).unwrap();
        assert_eq!(content, "1\t100\t100\tACGT\n1\t250\t150\tCATG\n");
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let contents = "\
chr22\t16050075\t16050075\tACACGTGT
chr22\t16050115\t40\tACCAGTTG
chr22\t16050213\t98\tAAAACCCC
chr22\t16050319\t106\tTGTGACAC
";
        let data = parse(contents).unwrap();
        assert_eq!(serialize_data(&data).unwrap(), contents);
    }

    #[test]
    fn test_serialize_rejects_ragged_pairs() {
        let snps = vec![SnpPosition::new(100, 100), SnpPosition::new(250, 150)];
        let pairs = vec![DiploidPair::new(*b"AC", *b"C")];
        assert!(matches!(
            serialize("1", &snps, &pairs),
            Err(PhasingError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_write_atomic_plain_and_gzip() {
        let dir = tempdir().unwrap();
        let contents = "5\t10\t10\tAC\n5\t30\t20\tCA\n";

        let plain = dir.path().join("data1.txt");
        write_atomic(&plain, contents).unwrap();
        assert_eq!(std::fs::read_to_string(&plain).unwrap(), contents);

        let gz = dir.path().join("data1.txt.gz");
        write_atomic(&gz, contents).unwrap();
        assert_eq!(parse_file(&gz).unwrap(), parse(contents).unwrap());

        // Only the two outputs remain; no temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_write_atomic_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old contents that are longer than the new ones\n").unwrap();

        write_atomic(&path, "1\t1\t1\tAA\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\t1\t1\tAA\n");
    }
}
