//! Hardcoded checkpoints
//!
//! The table shipped with the release, and the JSON hash-file format that can
//! extend it at startup.

use serde::{Deserialize, Serialize};

/// Mainnet checkpoints as (height, block hash hex).
pub const MAINNET_CHECKPOINTS: &[(u64, &str)] = &[
    (0, "22ec92126ff56094fc3703ad7bb19cc9f38b3a04c899369f19f5b790a7a6dd36"),
    (60, "f25eeab5cd128da57a8e97721a861b9ebe69f9428d272bfbffa9829df6474a63"),
    (61200, "9d197504a3c39aacc6938b5bd8002eb2b8d170c2b6cb575b90d8ababeda8e433"),
    (123060, "cfadf144806891e09e9f79ad08f3cc8b39863009ad030523d2b390a7a269c083"),
    (187440, "2cc3ce81780e1b4a1816d60c82a836c03054f38682d1c8c2e483529d726d9e6c"),
    (253560, "2e9dda663a0e47449d72bf845c69d73c8458d282702032fe9689631b7a2f7b1b"),
    (301260, "eed6975fd1a26e52132ce2e04c5447a3099e9f8e9518485d73bf4df19634fbcd"),
    (347880, "2b36417279b84e4de52db2064d9a0414d03e3f542f545ab2624846960e7a1df9"),
];

/// One entry of the checkpoint hash file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashLine {
    pub height: u64,
    /// Block hash, 64 hex characters.
    pub hash: String,
}

/// Checkpoint hash file: `{"hashlines": [{"height": .., "hash": ".."}]}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashFile {
    pub hashlines: Vec<HashLine>,
}
