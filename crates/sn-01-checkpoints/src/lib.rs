//! # sn-01-checkpoints
//!
//! Checkpoint Store: height -> hash bindings that stop the chain from
//! reorganising below an immutable height.
//!
//! ## Overview
//!
//! - **Hardcoded checkpoints**: shipped table for mainnet, plus an optional
//!   JSON hash file merged at startup
//! - **Service-node checkpoints**: quorum-signed, arriving with blocks every
//!   `CHECKPOINT_INTERVAL` heights
//! - **Culling**: best-effort pruning of checkpoints behind the immutable
//!   one, keeping every `CHECKPOINT_STORE_PERSISTENTLY_INTERVAL`-th forever
//! - **Reorg gate**: alternative blocks at or below the immutable height are
//!   refused
//!
//! ## Immutability
//!
//! ```text
//!   ... ─ [SN 236] ─ [SN 240] ─ tip
//!            │          └── newest: not yet final
//!            └── immutable (second nearest service-node checkpoint)
//!
//!   ... ─ [Hardcoded 240] ─ tip
//!            └── immutable on its own
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sn_01_checkpoints::{CheckpointApi, CheckpointConfig, CheckpointStore};
//! use sn_01_checkpoints::adapters::{InMemoryKVStore, KvBlockchainDb};
//!
//! let db = Arc::new(KvBlockchainDb::new(InMemoryKVStore::new()));
//! let mut store = CheckpointStore::new(&CheckpointConfig::from_env(), db)?;
//!
//! let outcome = store.on_block_add(height, major_version, Some(&checkpoint));
//! if !store.is_alternative_block_allowed(chain_height, alt_height) {
//!     // refuse the fork
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use config::CheckpointConfig;
pub use domain::{
    verify_checkpoint, Checkpoint, CheckpointKind, CheckpointPolicy, CullReport, HashFile,
    HashLine, VoterSignature,
};
pub use error::{CheckpointError, CheckpointResult, CodecError, DbError, DbResult, KVStoreError};
pub use ports::inbound::{AltBlockDecision, BlockAddOutcome, BlockCheck, CheckpointApi};
pub use ports::outbound::{BlockchainDb, DbReadGuard, DbWriteGuard, KeyValueStore};
pub use service::CheckpointStore;
