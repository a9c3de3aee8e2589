//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Checkpoint Store.
//!
//! Production: `KvBlockchainDb<RocksDbStore>` (feature `rocksdb`)
//! Testing: `KvBlockchainDb<InMemoryKVStore>`

use crate::domain::{Checkpoint, CheckpointKind, CHECKPOINT_NUM_CHECKPOINTS_FOR_CHAIN_FINALITY};
use crate::error::{DbResult, KVStoreError};
use tracing::warn;

/// Blockchain database as seen by the checkpoint store.
///
/// Methods take `&self`; implementations keep their own interior locking.
/// Transaction and batch start calls return `Ok(false)` when an enclosing
/// scope is already open, in which case the caller must not stop or abort it.
pub trait BlockchainDb: Send + Sync {
    fn is_read_only(&self) -> bool;

    /// Open a read transaction.
    fn block_rtxn_start(&self) -> DbResult<bool>;
    fn block_rtxn_stop(&self);

    /// Open a write transaction.
    fn block_wtxn_start(&self) -> DbResult<bool>;
    /// Commit the open write transaction.
    fn block_wtxn_stop(&self) -> DbResult<()>;
    /// Discard the open write transaction.
    fn block_wtxn_abort(&self);

    /// Open a write batch.
    fn batch_start(&self) -> DbResult<bool>;
    fn batch_stop(&self) -> DbResult<()>;
    fn batch_abort(&self);

    fn get_block_checkpoint(&self, height: u64) -> DbResult<Option<Checkpoint>>;

    /// Insert or overwrite the checkpoint at `checkpoint.height`.
    fn update_block_checkpoint(&self, checkpoint: &Checkpoint) -> DbResult<()>;

    /// Remove the checkpoint at `height`. Returns whether one existed.
    fn remove_block_checkpoint(&self, height: u64) -> DbResult<bool>;

    fn get_top_checkpoint(&self) -> DbResult<Option<Checkpoint>>;

    /// Checkpoints with heights between `start` and `end` inclusive, ordered
    /// from `start` toward `end` (descending when `start > end`). A `limit`
    /// of 0 means unlimited.
    fn get_checkpoints_range(&self, start: u64, end: u64, limit: usize)
        -> DbResult<Vec<Checkpoint>>;

    /// The checkpoint below which the chain cannot reorganise, looking at
    /// heights `<= height`.
    ///
    /// A hardcoded checkpoint is immutable on its own. A service-node
    /// checkpoint only becomes final once another checkpoint sits above it,
    /// so the immutable one is then the second nearest.
    fn get_immutable_checkpoint(&self, height: u64) -> DbResult<Option<Checkpoint>> {
        let mut nearest = self
            .get_checkpoints_range(height, 0, CHECKPOINT_NUM_CHECKPOINTS_FOR_CHAIN_FINALITY)?
            .into_iter();

        match nearest.next() {
            None => Ok(None),
            Some(cp) if cp.kind == CheckpointKind::Hardcoded => Ok(Some(cp)),
            Some(_) => Ok(nearest.next()),
        }
    }
}

/// Read transaction held for the lifetime of the guard.
pub struct DbReadGuard<'a, D: BlockchainDb + ?Sized> {
    db: &'a D,
    owned: bool,
}

impl<'a, D: BlockchainDb + ?Sized> DbReadGuard<'a, D> {
    pub fn new(db: &'a D) -> DbResult<Self> {
        let owned = db.block_rtxn_start()?;
        Ok(Self { db, owned })
    }
}

impl<D: BlockchainDb + ?Sized> Drop for DbReadGuard<'_, D> {
    fn drop(&mut self) {
        if self.owned {
            self.db.block_rtxn_stop();
        }
    }
}

/// Write transaction held for the lifetime of the guard.
///
/// Dropping the guard commits; call [`DbWriteGuard::abort`] to discard.
pub struct DbWriteGuard<'a, D: BlockchainDb + ?Sized> {
    db: &'a D,
    owned: bool,
    finished: bool,
}

impl<'a, D: BlockchainDb + ?Sized> DbWriteGuard<'a, D> {
    pub fn new(db: &'a D) -> DbResult<Self> {
        let owned = db.block_wtxn_start()?;
        Ok(Self {
            db,
            owned,
            finished: false,
        })
    }

    pub fn commit(mut self) -> DbResult<()> {
        self.finished = true;
        if self.owned {
            self.db.block_wtxn_stop()
        } else {
            Ok(())
        }
    }

    pub fn abort(mut self) {
        self.finished = true;
        if self.owned {
            self.db.block_wtxn_abort();
        }
    }
}

impl<D: BlockchainDb + ?Sized> Drop for DbWriteGuard<'_, D> {
    fn drop(&mut self) {
        if self.finished || !self.owned {
            return;
        }
        if let Err(e) = self.db.block_wtxn_stop() {
            warn!(error = %e, "[sn-01] Write transaction commit failed, aborting");
            self.db.block_wtxn_abort();
        }
    }
}

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Either all operations are applied or none are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All pairs whose key starts with `prefix`, in no particular order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}
