//! Checkpoint record codec
//!
//! Persisted form of a checkpoint: `{version, kind, height, block_hash,
//! signatures}` encoded with bincode. The kind is stored as its byte value so
//! unknown kinds are caught at decode time.

use crate::domain::{Checkpoint, CheckpointKind, VoterSignature};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Current record layout version.
pub const RECORD_VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct CheckpointRecord {
    version: u8,
    kind: u8,
    height: u64,
    block_hash: Hash,
    signatures: Vec<VoterSignature>,
}

pub fn encode_checkpoint(checkpoint: &Checkpoint) -> Result<Vec<u8>, CodecError> {
    let record = CheckpointRecord {
        version: RECORD_VERSION,
        kind: checkpoint.kind.as_u8(),
        height: checkpoint.height,
        block_hash: checkpoint.block_hash,
        signatures: checkpoint.signatures.clone(),
    };
    bincode::serialize(&record).map_err(|e| CodecError::Encode(e.to_string()))
}

pub fn decode_checkpoint(bytes: &[u8]) -> Result<Checkpoint, CodecError> {
    let record: CheckpointRecord =
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;

    if record.version != RECORD_VERSION {
        return Err(CodecError::UnsupportedVersion(record.version));
    }
    let kind = CheckpointKind::try_from(record.kind).map_err(CodecError::UnknownKind)?;

    Ok(Checkpoint {
        height: record.height,
        block_hash: record.block_hash,
        kind,
        signatures: record.signatures,
    })
}
