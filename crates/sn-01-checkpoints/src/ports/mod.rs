//! Ports (hexagonal architecture)
//!
//! - `inbound`: the API the chain drives
//! - `outbound`: the database the store depends on

pub mod inbound;
pub mod outbound;

pub use inbound::{AltBlockDecision, BlockAddOutcome, BlockCheck, CheckpointApi};
pub use outbound::{
    BatchOperation, BlockchainDb, DbReadGuard, DbWriteGuard, KeyValueStore,
};
