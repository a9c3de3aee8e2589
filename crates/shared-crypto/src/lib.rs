//! # Shared Crypto
//!
//! Primitives used by quorum voting.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Vote digests |
//! | `signatures` | Ed25519 | Service-node vote signatures |
//!
//! Ed25519 signing is deterministic, so a service node re-signing the same
//! vote digest always produces the same bytes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_many};
pub use signatures::{verify_signature, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
