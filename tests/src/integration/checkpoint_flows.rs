//! # Checkpoint Store Flows
//!
//! A chain is synced block by block with quorum-signed checkpoints every
//! `CHECKPOINT_INTERVAL` heights, then reorganised.
//!
//! ## Flow Tested:
//!
//! 1. **Verify**: every checkpoint is checked against the checkpointing quorum
//! 2. **Block add**: culling trails the immutable checkpoint, persistent ones stay
//! 3. **Reorg gate**: alternative blocks at or below the immutable height are refused
//! 4. **Detach**: checkpoints above the fork point go, genesis stays

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        block_hash, memory_store, quorum_of, signed_checkpoint, validator_keys, MemDb,
    };
    use shared_crypto::Ed25519KeyPair;
    use shared_types::{NetworkType, Quorum};
    use sn_01_checkpoints::{
        verify_checkpoint, Checkpoint, CheckpointApi, CheckpointConfig, CheckpointError,
        CheckpointKind, CheckpointPolicy, CheckpointStore,
    };
    use std::io::Write;

    const VERSION: u8 = 12;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Chain {
        keys: Vec<Ed25519KeyPair>,
        quorum: Quorum,
        store: CheckpointStore<MemDb>,
    }

    impl Chain {
        fn new() -> Self {
            let keys = validator_keys(1, 20);
            let quorum = quorum_of(&keys);
            let store = memory_store(NetworkType::Testnet, CheckpointPolicy::default()).unwrap();
            assert!(store.add(0, block_hash(0, 0)));
            Self {
                keys,
                quorum,
                store,
            }
        }

        fn checkpoint(&self, height: u64, fork: u8) -> Checkpoint {
            let voters: Vec<u16> = (0..13).collect();
            signed_checkpoint(&self.keys, height, block_hash(height, fork), &voters)
        }

        /// Add blocks `from..=to` on `fork`, verifying each checkpoint first.
        fn sync(&mut self, from: u64, to: u64, fork: u8) {
            for height in from..=to {
                let checkpoint = self
                    .store
                    .policy()
                    .is_checkpoint_height(height)
                    .then(|| self.checkpoint(height, fork));
                if let Some(cp) = &checkpoint {
                    verify_checkpoint(cp, &self.quorum, self.store.policy()).unwrap();
                }

                let outcome = self.store.on_block_add(height, VERSION, checkpoint.as_ref());
                assert!(outcome.cull.is_clean(), "cull failed at {}", height);
                if checkpoint.is_some() && height >= self.store.policy().retention_interval {
                    assert_eq!(outcome.checkpoint_stored, Some(true), "height {}", height);
                }
            }
        }

        fn heights(&self) -> Vec<u64> {
            self.store
                .checkpoints_in_range(0, u64::MAX, 0)
                .iter()
                .map(|cp| cp.height)
                .collect()
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: SYNC AND CULL
    // =============================================================================

    #[test]
    fn test_sync_keeps_persistent_and_recent_checkpoints() {
        let mut chain = Chain::new();
        chain.sync(1, 300, 0);

        assert_eq!(chain.heights(), vec![0, 60, 120, 180, 240, 292, 296, 300]);
        assert_eq!(chain.store.max_height(), 300);
        assert_eq!(chain.store.last_cull_height(), 292);
        assert_eq!(chain.store.get(0).unwrap().kind, CheckpointKind::Hardcoded);
    }

    #[test]
    fn test_checkpoints_before_retention_floor_are_ignored() {
        let mut chain = Chain::new();
        chain.sync(1, 59, 0);
        assert_eq!(chain.heights(), vec![0]);
        assert!(!chain.store.is_in_checkpoint_zone(4));
    }

    #[test]
    fn test_pre_activation_blocks_store_nothing() {
        let mut chain = Chain::new();
        chain.sync(1, 100, 0);

        let cp = chain.checkpoint(104, 0);
        let outcome = chain.store.on_block_add(104, VERSION - 1, Some(&cp));
        assert_eq!(outcome.checkpoint_stored, None);
        assert!(outcome.cull.is_empty());
        assert!(chain.store.get(104).is_none());
    }

    #[test]
    fn test_check_block_against_synced_checkpoints() {
        let mut chain = Chain::new();
        chain.sync(1, 300, 0);

        let ok = chain.store.check_block(296, &block_hash(296, 0));
        assert!(ok.valid && ok.is_checkpoint && ok.is_service_node_checkpoint);

        let bad = chain.store.check_block(296, &block_hash(296, 1));
        assert!(!bad.valid);

        let plain = chain.store.check_block(297, &block_hash(297, 1));
        assert!(plain.valid && !plain.is_checkpoint);
    }

    #[test]
    fn test_forged_checkpoint_never_reaches_the_store() {
        let mut chain = Chain::new();
        chain.sync(1, 300, 0);

        let mut forged = chain.checkpoint(304, 0);
        forged.block_hash = block_hash(304, 9);
        assert!(matches!(
            verify_checkpoint(&forged, &chain.quorum, chain.store.policy()),
            Err(CheckpointError::InvalidSignature { voter_index: 0, .. })
        ));

        let short = signed_checkpoint(&chain.keys, 304, block_hash(304, 0), &[0, 1, 2]);
        assert!(matches!(
            verify_checkpoint(&short, &chain.quorum, chain.store.policy()),
            Err(CheckpointError::InsufficientSignatures { have: 3, need: 13, .. })
        ));
    }

    // =============================================================================
    // INTEGRATION TESTS: REORGANISATION
    // =============================================================================

    #[test]
    fn test_reorg_gate_follows_immutable_checkpoint() {
        let mut chain = Chain::new();
        chain.sync(1, 300, 0);

        // Top is 300, so 296 is immutable.
        assert!(!chain.store.is_alternative_block_allowed(300, 296));
        assert!(chain.store.is_alternative_block_allowed(300, 297));
        assert_eq!(chain.store.immutable_height(), 296);

        let decision = chain.store.alternative_block_decision(300, 200);
        assert!(!decision.allowed);
        assert!(decision.service_node_checkpoint);
        assert!(!chain.store.is_alternative_block_allowed(300, 0));
    }

    #[test]
    fn test_detach_then_resync_on_a_fork() {
        let mut chain = Chain::new();
        chain.sync(1, 300, 0);
        assert!(!chain.store.is_alternative_block_allowed(300, 296));

        let report = chain.store.on_block_detach(296);
        assert!(report.is_clean());
        assert_eq!(report.removed.len(), 2);
        assert_eq!(chain.heights(), vec![0, 60, 120, 180, 240, 292]);
        assert_eq!(chain.store.max_height(), 292);

        // The gate remembers the highest immutable height it has seen.
        assert!(!chain.store.is_alternative_block_allowed(296, 293));

        chain.sync(296, 308, 1);
        assert!(chain.store.check_block(296, &block_hash(296, 1)).valid);
        assert!(!chain.store.check_block(296, &block_hash(296, 0)).valid);
        assert_eq!(chain.store.max_height(), 308);
    }

    #[test]
    fn test_detach_to_genesis_keeps_genesis() {
        let mut chain = Chain::new();
        chain.sync(1, 120, 0);

        chain.store.on_block_detach(0);
        assert_eq!(chain.heights(), vec![0]);
        assert_eq!(chain.store.last_cull_height(), 0);
        assert!(chain.store.is_alternative_block_allowed(0, 1));
    }

    // =============================================================================
    // INTEGRATION TESTS: HASH FILE AND READ-ONLY STARTUP
    // =============================================================================

    #[test]
    fn test_hash_file_seeds_testnet_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = serde_json::json!({
            "hashlines": [
                { "height": 0, "hash": hex::encode(block_hash(0, 0)) },
                { "height": 1000, "hash": hex::encode(block_hash(1000, 0)) },
            ]
        });
        write!(file, "{}", body).unwrap();

        let config = CheckpointConfig {
            hashfile: Some(file.path().to_path_buf()),
            ..CheckpointConfig::for_network(NetworkType::Testnet)
        };
        let db = std::sync::Arc::new(sn_01_checkpoints::adapters::KvBlockchainDb::new(
            sn_01_checkpoints::adapters::InMemoryKVStore::new(),
        ));
        let store = CheckpointStore::new(&config, db).unwrap();

        assert_eq!(store.max_height(), 1000);
        assert!(store.is_in_checkpoint_zone(999));
        assert!(store.check_block(1000, &block_hash(1000, 0)).valid);
        assert_eq!(store.get(1000).unwrap().kind, CheckpointKind::Hardcoded);
    }

    #[test]
    fn test_mainnet_table_gates_early_forks() {
        let mut store = memory_store(NetworkType::Mainnet, CheckpointPolicy::default()).unwrap();
        assert!(store.max_height() > 0);

        let top = store.max_height();
        let decision = store.alternative_block_decision(top, top);
        assert!(!decision.allowed);
        assert!(!decision.service_node_checkpoint);
        assert!(store.is_alternative_block_allowed(top, top + 1));
    }
}
