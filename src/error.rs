use thiserror::Error;

use crate::equivalence::Divergence;

/// Top-level error type for the simulator
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("bad memory image: {0}")]
    ImageError(#[from] ImageError),

    #[error("{0} is not a number: '{1}'")]
    CountParseError(&'static str, String),

    #[error("{0} must be non-negative, got {1}")]
    NegativeCountError(&'static str, i64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("states diverge: {0}")]
    EquivalenceError(#[from] Divergence),

    #[error("invalid arguments: {0}")]
    UsageError(String),
}

impl SimulatorError {
    /// Process exit code for this failure.
    /// A rejected memory image is distinguishable from every other failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            SimulatorError::ImageError(_) => 2,
            _ => 1,
        }
    }
}

/// Per-line errors raised while parsing a memory image
#[derive(Error, Debug, PartialEq)]
pub enum ImageError {
    #[error("line {line}: expected 'address value', got '{text}'")]
    Malformed { line: usize, text: String },

    #[error("line {line}: address {address} is outside memory (0..=65535)")]
    AddressRange { line: usize, address: i64 },

    #[error("line {line}: value {value} is outside -32768..=65535")]
    ValueRange { line: usize, value: i64 },
}

/// Type alias for Result with SimulatorError
pub type SimulatorResult<T> = Result<T, SimulatorError>;
