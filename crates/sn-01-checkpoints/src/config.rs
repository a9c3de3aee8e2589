//! Checkpoint store configuration from environment variables.

use crate::domain::CheckpointPolicy;
use shared_types::NetworkType;
use std::env;
use std::path::PathBuf;

/// Configuration for the checkpoint store.
#[derive(Debug, Clone, Default)]
pub struct CheckpointConfig {
    /// Network whose hardcoded checkpoints are loaded
    pub network: NetworkType,

    /// Interval and quorum parameters
    pub policy: CheckpointPolicy,

    /// Optional JSON file of extra hardcoded checkpoints
    pub hashfile: Option<PathBuf>,
}

impl CheckpointConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SN_NETWORK`: mainnet, testnet, devnet or fakechain (default: mainnet)
    /// - `SN_CHECKPOINTS_FILE`: path of the checkpoint hash file (default: none)
    pub fn from_env() -> Self {
        let network = match env::var("SN_NETWORK") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %value, "[sn-01] Unknown SN_NETWORK, using mainnet");
                NetworkType::Mainnet
            }),
            Err(_) => NetworkType::Mainnet,
        };

        Self {
            network,
            policy: CheckpointPolicy::default(),
            hashfile: env::var_os("SN_CHECKPOINTS_FILE").map(PathBuf::from),
        }
    }

    pub fn for_network(network: NetworkType) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }
}
