// ==============================================================================
// error.rs - Error Taxonomy
// ==============================================================================
// Description: Parse, validation and configuration errors for the simulator
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, PhasingError>;

/// Broad category of a [`PhasingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or empty input
    Parse,
    /// Structurally inconsistent data
    Validation,
    /// Invalid simulation parameters
    Config,
    /// Filesystem failure
    Io,
}

/// Errors that can occur while parsing, simulating or writing haplotypes
#[derive(Error, Debug)]
pub enum PhasingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input contains no records")]
    EmptyInput,

    #[error("Malformed line {line}: {details}")]
    MalformedLine { line: usize, details: String },

    #[error("Invalid {field} at line {line}: '{value}'")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Allele column width changed at line {line}: expected {expected}, found {found}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Allele column is empty: input holds no haplotypes")]
    NoHaplotypes,

    #[error("Odd haplotype count {width}: strands cannot be grouped into diploid pairs")]
    OddHaplotypeCount { width: usize },

    #[error("Chromosome changed at line {line}: expected '{expected}', found '{found}'")]
    ChromosomeMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("SNP positions decrease at line {line}: {previous} followed by {current}")]
    UnsortedPositions {
        line: usize,
        previous: u64,
        current: u64,
    },

    #[error("Length mismatch: strand A has {strand_a}, strand B has {strand_b}, {snps} SNP positions")]
    LengthMismatch {
        strand_a: usize,
        strand_b: usize,
        snps: usize,
    },

    #[error("Error positions must be ascending: {previous} followed by {current}")]
    UnsortedErrorPositions { previous: u64, current: u64 },

    #[error("Invalid haplotype pattern '{0}': must be non-empty, ASCII and of even width")]
    InvalidPattern(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PhasingError {
    /// Classify this error as parse, validation, config or I/O failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            PhasingError::Io(_) => ErrorKind::Io,
            PhasingError::EmptyInput
            | PhasingError::MalformedLine { .. }
            | PhasingError::InvalidInteger { .. }
            | PhasingError::InconsistentWidth { .. } => ErrorKind::Parse,
            PhasingError::NoHaplotypes
            | PhasingError::OddHaplotypeCount { .. }
            | PhasingError::ChromosomeMismatch { .. }
            | PhasingError::UnsortedPositions { .. }
            | PhasingError::LengthMismatch { .. }
            | PhasingError::UnsortedErrorPositions { .. }
            | PhasingError::InvalidPattern(_) => ErrorKind::Validation,
            PhasingError::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(PhasingError::EmptyInput.kind(), ErrorKind::Parse);
        assert_eq!(
            PhasingError::OddHaplotypeCount { width: 3 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(PhasingError::NoHaplotypes.kind(), ErrorKind::Validation);
        assert_eq!(
            PhasingError::InvalidConfig("mean_spacing".to_string()).kind(),
            ErrorKind::Config
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(PhasingError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_display_includes_line() {
        let err = PhasingError::InconsistentWidth {
            line: 7,
            expected: 4,
            found: 6,
        };
        assert!(err.to_string().contains("line 7"));
    }
}
