//! Domain layer for Blink voting.

pub mod blink_tx;
pub mod constants;
pub mod slots;
pub mod wire;

pub use blink_tx::{canonical_digest, quorum_height, BlinkStatus, BlinkTx};
pub use constants::*;
pub use slots::{SignatureSlot, SignatureStatus, Subquorum};
pub use wire::BlinkWirePayload;
