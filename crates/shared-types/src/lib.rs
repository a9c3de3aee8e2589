//! # Shared Types Crate
//!
//! Primitive types used by both finality subsystems (checkpoints and blink).
//!
//! ## Contents
//!
//! - `entities`: hashes, keys, signatures, network type
//! - `quorum`: ordered validator sets and the `QuorumProvider` port
//! - `address`: the closed set of peer address variants
//! - `context`: immutable per-connection value
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **Closed Variant Sets**: address kinds are an enum, not a trait object.

pub mod address;
pub mod context;
pub mod entities;
pub mod errors;
pub mod quorum;

pub use address::{AddressZone, NetworkAddress};
pub use context::ConnectionContext;
pub use entities::*;
pub use errors::*;
pub use quorum::{InMemoryQuorumProvider, Quorum, QuorumProvider, QuorumType};
