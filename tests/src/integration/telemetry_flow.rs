//! # Telemetry Flow
//!
//! The node installs one global subscriber, then the subsystems log through
//! it. This is the only test in the suite that installs a subscriber.

#[cfg(test)]
mod tests {
    use crate::fixtures::memory_store;
    use shared_types::NetworkType;
    use sn_01_checkpoints::{CheckpointApi, CheckpointPolicy};
    use sn_telemetry::{init_logging, TelemetryConfig, TelemetryError};

    #[test]
    fn test_logging_installs_once_and_subsystems_log_through_it() {
        let config = TelemetryConfig {
            log_level: "sn_01_checkpoints=debug,warn".to_string(),
            json_logs: true,
            network: NetworkType::Testnet.to_string(),
            ..TelemetryConfig::default()
        };
        let guard = init_logging(&config).unwrap();
        assert_eq!(guard.service_name(), "sn-finality-testnet");

        let mut store = memory_store(NetworkType::Testnet, CheckpointPolicy::default()).unwrap();
        assert!(store.add(0, [0u8; 32]));
        assert!(store.is_alternative_block_allowed(0, 1));

        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
    }
}
