//! Checkpoint entity
//!
//! A binding of block height to block hash. Hardcoded checkpoints ship with
//! the release; service-node checkpoints arrive with a block, signed by the
//! checkpointing quorum for that height.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Hash, Signature};
use std::fmt;

/// Origin of a checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CheckpointKind {
    /// Embedded in the software release (or loaded from the hash file).
    Hardcoded = 0,
    /// Confirmed by a service-node checkpointing quorum.
    ServiceNode = 1,
}

impl CheckpointKind {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CheckpointKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CheckpointKind::Hardcoded),
            1 => Ok(CheckpointKind::ServiceNode),
            other => Err(other),
        }
    }
}

impl fmt::Display for CheckpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointKind::Hardcoded => f.write_str("hardcoded"),
            CheckpointKind::ServiceNode => f.write_str("service_node"),
        }
    }
}

/// One quorum member's signature over the checkpointed block hash.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterSignature {
    /// Position of the signer in the checkpointing quorum.
    pub voter_index: u16,
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl VoterSignature {
    pub fn new(voter_index: u16, signature: Signature) -> Self {
        Self {
            voter_index,
            signature,
        }
    }
}

/// A height -> hash binding.
///
/// Never mutated once stored; it is only inserted or removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub height: u64,
    pub block_hash: Hash,
    pub kind: CheckpointKind,
    /// Quorum signatures, ascending by voter index. Empty for hardcoded.
    pub signatures: Vec<VoterSignature>,
}

impl Checkpoint {
    pub fn hardcoded(height: u64, block_hash: Hash) -> Self {
        Self {
            height,
            block_hash,
            kind: CheckpointKind::Hardcoded,
            signatures: Vec::new(),
        }
    }

    pub fn service_node(height: u64, block_hash: Hash, signatures: Vec<VoterSignature>) -> Self {
        Self {
            height,
            block_hash,
            kind: CheckpointKind::ServiceNode,
            signatures,
        }
    }

    /// Does `hash` match the checkpointed block?
    pub fn check(&self, hash: &Hash) -> bool {
        self.block_hash == *hash
    }

    pub fn is_service_node(&self) -> bool {
        self.kind == CheckpointKind::ServiceNode
    }
}
