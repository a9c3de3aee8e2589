//! # Core Entities
//!
//! Fixed-size byte types shared by the checkpoint and blink subsystems.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte block or transaction hash.
pub type Hash = [u8; 32];

/// A 32-byte Ed25519 service-node public key.
pub type PublicKey = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// The all-zero hash.
pub const NULL_HASH: Hash = [0u8; 32];

/// The all-zero public key, used as "no key".
pub const NULL_PUBKEY: PublicKey = [0u8; 32];

/// Decode a 64-character hex string into a hash.
pub fn hash_from_hex(s: &str) -> Result<Hash, ParseError> {
    let bytes = hex::decode(s.trim()).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ParseError::InvalidLength {
            expected: 32,
            actual,
        })
}

/// Encode a hash as lowercase hex.
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Short hex prefix for log lines.
pub fn short_hex(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(4)])
}

/// Which network the node is running on.
///
/// Only mainnet ships with a hardcoded checkpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
    /// Local regression-test chain.
    Fakechain,
}

impl NetworkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Mainnet => "mainnet",
            NetworkType::Testnet => "testnet",
            NetworkType::Devnet => "devnet",
            NetworkType::Fakechain => "fakechain",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NetworkType::Mainnet),
            "testnet" => Ok(NetworkType::Testnet),
            "devnet" | "stagenet" => Ok(NetworkType::Devnet),
            "fakechain" | "regtest" => Ok(NetworkType::Fakechain),
            other => Err(ParseError::UnknownNetwork(other.to_string())),
        }
    }
}
