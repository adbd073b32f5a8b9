//! Error types for the fault sweep engine.
//!
//! This module provides a unified error type [`FaultError`] that covers
//! all error conditions that can occur during input validation, source
//! impedance resolution, the fault sweep itself and result export.

use thiserror::Error;

/// Result type alias using [`FaultError`].
pub type Result<T> = std::result::Result<T, FaultError>;

/// Unified error type for all fault sweep operations.
#[derive(Error, Debug)]
pub enum FaultError {
    // ============ Input Errors ============
    /// Base voltage or base power is not strictly positive
    #[error("Invalid system base: {quantity} must be positive (got {value})")]
    InvalidBase { quantity: &'static str, value: f64 },

    /// A required numeric field is blank, NaN or infinite
    #[error("Missing or non-numeric value for required field '{field}'")]
    MissingRequiredField { field: String },

    /// A short-circuit angle with a positive sign
    #[error("Angle of '{field}' must be conjugate (<= 0°), got {angle}°")]
    AngleConventionViolation { field: String, angle: f64 },

    /// Sweep step of zero
    #[error("Invalid sweep step {step}%: must be a positive integer")]
    InvalidStep { step: u32 },

    /// Malformed complex impedance text
    #[error("Invalid impedance '{input}' at column {position}: {message}")]
    ImpedanceSyntax {
        input: String,
        position: usize,
        message: String,
    },

    // ============ Network Errors ============
    /// The supplied short-circuit data has no physically realizable network
    #[error("No physical solution for the {sequence} sequence network: every root has a non-positive real part")]
    NoPhysicalSolution { sequence: &'static str },

    /// Zero impedance or zero denominator in the network equations
    #[error("Singular network: {context}")]
    SingularNetwork { context: String },

    // ============ I/O Errors ============
    /// Error reading a case file
    #[error("Failed to read case file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Case file could not be decoded or lacks a section
    #[error("Invalid case file '{path}': {message}")]
    CaseFileError { path: String, message: String },

    /// Error writing exported results
    #[error("Export error: {message}")]
    ExportError { message: String },
}

impl FaultError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create a singular network error
    pub fn singular(context: impl Into<String>) -> Self {
        Self::SingularNetwork {
            context: context.into(),
        }
    }

    /// Create an impedance syntax error
    pub fn impedance_syntax(input: &str, position: usize, message: impl Into<String>) -> Self {
        Self::ImpedanceSyntax {
            input: input.to_string(),
            position,
            message: message.into(),
        }
    }

    /// Create a case file error
    pub fn case_file(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CaseFileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the network has no realizable equivalent.
    ///
    /// Callers present this as an outcome of the study rather than a failure.
    pub fn is_no_physical_solution(&self) -> bool {
        matches!(self, Self::NoPhysicalSolution { .. })
    }
}
