//! Error types for the Checkpoint subsystem
//!
//! Storage failures inside the store are logged and turned into `false` or
//! `None`. `CheckpointError` covers what does propagate: initialisation, the
//! hash file, and service-node checkpoint verification.

use thiserror::Error;

/// Key-value backend errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Checkpoint record encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Failed to encode checkpoint record: {0}")]
    Encode(String),
    #[error("Failed to decode checkpoint record: {0}")]
    Decode(String),
    #[error("Unknown checkpoint kind byte {0}")]
    UnknownKind(u8),
    #[error("Unsupported checkpoint record version {0}")]
    UnsupportedVersion(u8),
}

/// Blockchain database errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    /// Write attempted on a read-only database
    #[error("Database is read-only")]
    ReadOnly,
    #[error(transparent)]
    Store(#[from] KVStoreError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Transaction start/stop calls out of order
    #[error("Transaction state error: {0}")]
    TxnState(String),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Checkpoint subsystem errors
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Checkpoint rejected by the store (conflicting hash or storage failure)
    #[error("Failed to add checkpoint at height {height}")]
    AddFailed { height: u64 },

    /// A hardcoded checkpoint could not be inserted during init
    #[error("Failed to add hardcoded checkpoint at height {height}")]
    HardcodedInsertFailed { height: u64 },

    /// Policy values the store cannot run with
    #[error("Invalid checkpoint policy: {reason}")]
    InvalidPolicy { reason: String },

    /// Hex hash could not be parsed
    #[error("Invalid checkpoint hash at height {height}: {reason}")]
    InvalidHash { height: u64, reason: String },

    /// Checkpoint hash file could not be read or parsed
    #[error("Failed to load checkpoint hash file {path}: {reason}")]
    HashFile { path: String, reason: String },

    /// Storage error that escaped a non-store caller
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),

    /// Service-node checkpoint at a height that is not a checkpoint height
    #[error("Unexpected checkpoint at height {height} (interval {interval})")]
    UnexpectedHeight { height: u64, interval: u64 },

    /// Not enough quorum signatures
    #[error("Checkpoint at height {height} has {have} signatures, need {need}")]
    InsufficientSignatures { height: u64, have: usize, need: usize },

    /// More signatures than quorum members
    #[error("Checkpoint at height {height} has {have} signatures, max {max}")]
    TooManySignatures { height: u64, have: usize, max: usize },

    /// Voter index outside the quorum
    #[error("Voter index {voter_index} out of range for quorum of {quorum_size}")]
    VoterIndexOutOfRange { voter_index: u16, quorum_size: usize },

    /// Voter indices not strictly ascending (covers duplicates)
    #[error("Voters not in strictly ascending order at height {height}")]
    VotersNotAscending { height: u64 },

    /// A voter's signature did not verify
    #[error("Invalid signature from voter {voter_index} at height {height}")]
    InvalidSignature { height: u64, voter_index: u16 },

    /// Hardcoded checkpoint carrying signatures
    #[error("Hardcoded checkpoint at height {height} must not carry signatures")]
    UnexpectedSignatures { height: u64 },
}

/// Result type for checkpoint operations
pub type CheckpointResult<T> = Result<T, CheckpointError>;
