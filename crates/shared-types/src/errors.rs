//! # Error Types
//!
//! Parsing errors for the primitive types in this crate.

use thiserror::Error;

/// Errors produced when parsing primitives from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Hex string could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes had the wrong length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Unknown network name.
    #[error("Unknown network type: {0}")]
    UnknownNetwork(String),

    /// Address text could not be parsed.
    #[error("Invalid network address: {0}")]
    InvalidAddress(String),
}
