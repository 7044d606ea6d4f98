// ==============================================================================
// lib.rs - Phasing Error Simulator Library
// ==============================================================================
// Description: Library interface for switch-error simulation on MSMC haplotypes
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

pub mod config;
pub mod error;
pub mod error_model;
pub mod manifest;
pub mod models;
pub mod output;
pub mod parsers;
pub mod phasing;
pub mod processor;
pub mod synthetic;

pub use error_model::generate_error_positions;
pub use output::serialize;
pub use parsers::parse;
pub use phasing::apply_phasing_errors;
