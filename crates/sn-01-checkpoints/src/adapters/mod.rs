//! Storage adapters for the checkpoint database.

pub mod codec;
pub mod kv_db;
pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocks;

pub use codec::{decode_checkpoint, encode_checkpoint, RECORD_VERSION};
pub use kv_db::KvBlockchainDb;
pub use memory::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use rocks::{RocksDbConfig, RocksDbStore};
