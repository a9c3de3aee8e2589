//! # Quorum Model
//!
//! Ordered validator sets chosen by the service-node list for a height.
//!
//! The position of a key inside `Quorum::validators` is the voter index used
//! by checkpoint signatures and blink signature slots.

use crate::entities::PublicKey;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Duty a quorum is formed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuorumType {
    /// Uptime/obligation testing of other service nodes.
    Obligations,
    /// Block checkpoint signing.
    Checkpointing,
    /// Blink transaction approval.
    Blink,
}

/// An ordered validator set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quorum {
    /// Voting members, in voter-index order.
    pub validators: Vec<PublicKey>,
    /// Nodes being tested by the quorum (unused by blink/checkpoints).
    pub workers: Vec<PublicKey>,
}

impl Quorum {
    pub fn new(validators: Vec<PublicKey>) -> Self {
        Self {
            validators,
            workers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validator key at `index`, if the quorum is that large.
    pub fn validator(&self, index: usize) -> Option<&PublicKey> {
        self.validators.get(index)
    }
}

/// Source of quorums (driven port).
///
/// Implemented by the service-node list in the full daemon. Returns `None`
/// when no quorum exists for the requested type and height.
pub trait QuorumProvider: Send + Sync {
    fn get_quorum(&self, quorum_type: QuorumType, height: u64) -> Option<Arc<Quorum>>;
}

/// Map-backed quorum provider for tests and tooling.
#[derive(Default)]
pub struct InMemoryQuorumProvider {
    quorums: RwLock<HashMap<(QuorumType, u64), Arc<Quorum>>>,
}

impl InMemoryQuorumProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the quorum used for `quorum_type` at `height`.
    pub fn insert(&self, quorum_type: QuorumType, height: u64, quorum: Quorum) {
        self.quorums
            .write()
            .insert((quorum_type, height), Arc::new(quorum));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_quorum(self, quorum_type: QuorumType, height: u64, quorum: Quorum) -> Self {
        self.insert(quorum_type, height, quorum);
        self
    }
}

impl QuorumProvider for InMemoryQuorumProvider {
    fn get_quorum(&self, quorum_type: QuorumType, height: u64) -> Option<Arc<Quorum>> {
        let found = self.quorums.read().get(&(quorum_type, height)).cloned();
        if found.is_none() {
            debug!(?quorum_type, height, "No quorum registered");
        }
        found
    }
}
