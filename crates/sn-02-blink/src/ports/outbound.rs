//! Driven Ports (SPI - Outbound)
//!
//! Blink only needs validator sets. The port is shared with the checkpoint
//! subsystem, so it lives in `shared-types`.

pub use shared_types::{Quorum, QuorumProvider, QuorumType};
