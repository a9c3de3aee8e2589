//! Error types for Blink voting

use crate::domain::Subquorum;
use thiserror::Error;

/// Blink voting errors
///
/// `InvalidPosition` and `InvalidSignatureLimit` are caller bugs.
/// `SignatureVerification`, `MalformedPayload` and `UnknownVoter` come from
/// network input and should feed peer penalties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlinkError {
    #[error("Signature position {position} out of range")]
    InvalidPosition { position: usize },

    #[error("Signature limit {max_size} exceeds subquorum size")]
    InvalidSignatureLimit { max_size: usize },

    #[error("Invalid blink signature from {subquorum} subquorum position {position}")]
    SignatureVerification { subquorum: Subquorum, position: usize },

    #[error("Malformed blink payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("No validator at {subquorum} subquorum position {position}")]
    UnknownVoter { subquorum: Subquorum, position: usize },
}

/// Result type for blink operations
pub type BlinkResult<T> = Result<T, BlinkError>;
