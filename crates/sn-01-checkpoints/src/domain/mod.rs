//! Domain layer for the Checkpoint subsystem.

pub mod checkpoint;
pub mod cull;
pub mod hardcoded;
pub mod policy;
pub mod verification;

pub use checkpoint::{Checkpoint, CheckpointKind, VoterSignature};
pub use cull::CullReport;
pub use hardcoded::{HashFile, HashLine, MAINNET_CHECKPOINTS};
pub use policy::{
    CheckpointPolicy, CHECKPOINTING_ACTIVATION_VERSION, CHECKPOINT_INTERVAL, CHECKPOINT_MIN_VOTES,
    CHECKPOINT_NUM_CHECKPOINTS_FOR_CHAIN_FINALITY, CHECKPOINT_QUORUM_SIZE,
    CHECKPOINT_STORE_PERSISTENTLY_INTERVAL,
};
pub use verification::verify_checkpoint;
