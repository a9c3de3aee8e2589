//! Deterministic fixtures shared by the integration tests, the property
//! tests and the benchmarks.

use shared_crypto::Ed25519KeyPair;
use shared_types::{Hash, InMemoryQuorumProvider, NetworkType, Quorum, QuorumType};
use sn_01_checkpoints::adapters::{InMemoryKVStore, KvBlockchainDb};
use sn_01_checkpoints::{
    Checkpoint, CheckpointConfig, CheckpointPolicy, CheckpointResult, CheckpointStore,
    VoterSignature,
};
use sn_02_blink::{quorum_height, BlinkTx, Subquorum};
use std::sync::Arc;

pub type MemDb = KvBlockchainDb<InMemoryKVStore>;

/// `n` key pairs derived from consecutive seeds starting at `seed`.
pub fn validator_keys(seed: u8, n: usize) -> Vec<Ed25519KeyPair> {
    (0..n)
        .map(|i| Ed25519KeyPair::from_seed([seed.wrapping_add(i as u8); 32]))
        .collect()
}

pub fn quorum_of(keys: &[Ed25519KeyPair]) -> Quorum {
    Quorum::new(keys.iter().map(|k| *k.public_key().as_bytes()).collect())
}

/// Stand-in block hash: the height in the first eight bytes, `fork` last.
pub fn block_hash(height: u64, fork: u8) -> Hash {
    let mut hash = [0u8; 32];
    hash[..8].copy_from_slice(&height.to_le_bytes());
    hash[31] = fork;
    hash
}

/// Service-node checkpoint for `hash` signed by `voters`, in the order given.
pub fn signed_checkpoint(
    keys: &[Ed25519KeyPair],
    height: u64,
    hash: Hash,
    voters: &[u16],
) -> Checkpoint {
    let signatures = voters
        .iter()
        .map(|&i| VoterSignature::new(i, keys[i as usize].sign_digest(&hash)))
        .collect();
    Checkpoint::service_node(height, hash, signatures)
}

/// Empty store over an in-memory database, genesis not yet added.
pub fn memory_store(
    network: NetworkType,
    policy: CheckpointPolicy,
) -> CheckpointResult<CheckpointStore<MemDb>> {
    let config = CheckpointConfig {
        policy,
        ..CheckpointConfig::for_network(network)
    };
    let db = Arc::new(KvBlockchainDb::new(InMemoryKVStore::new()));
    CheckpointStore::new(&config, db)
}

/// Two blink subquorums registered for transactions at one height.
pub struct BlinkQuorums {
    pub height: u64,
    pub base: Vec<Ed25519KeyPair>,
    pub future: Vec<Ed25519KeyPair>,
    pub provider: Arc<InMemoryQuorumProvider>,
}

impl BlinkQuorums {
    /// Register quorums of `base_size` and `future_size` validators for
    /// transactions at `height`.
    pub fn new(height: u64, base_size: usize, future_size: usize) -> Self {
        let base = validator_keys(0x10, base_size);
        let future = validator_keys(0x80, future_size);
        let provider = InMemoryQuorumProvider::new();
        if let Some(h) = quorum_height(height, Subquorum::Base) {
            provider.insert(QuorumType::Blink, h, quorum_of(&base));
        }
        if let Some(h) = quorum_height(height, Subquorum::Future) {
            provider.insert(QuorumType::Blink, h, quorum_of(&future));
        }
        Self {
            height,
            base,
            future,
            provider: Arc::new(provider),
        }
    }

    pub fn keys(&self, subquorum: Subquorum) -> &[Ed25519KeyPair] {
        match subquorum {
            Subquorum::Base => &self.base,
            Subquorum::Future => &self.future,
        }
    }

    /// Vote signature of validator `position` over `tx`.
    pub fn sign(
        &self,
        tx: &BlinkTx,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
    ) -> [u8; 64] {
        self.keys(subquorum)[position].sign_digest(&tx.digest(approved))
    }
}
