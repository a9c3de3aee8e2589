//! # Key-value backed blockchain database
//!
//! Implements [`BlockchainDb`] on any [`KeyValueStore`]. Checkpoints live
//! under `checkpoint:` + big-endian height, so a prefix scan yields them in
//! height order on ordered backends.
//!
//! Outside a write transaction or batch every write commits immediately.
//! Inside one, writes are buffered in an overlay that reads see, flushed with
//! a single atomic batch on stop and dropped on abort. Only one write scope is
//! open at a time; nested starts return `Ok(false)`.

use crate::adapters::codec::{decode_checkpoint, encode_checkpoint};
use crate::domain::Checkpoint;
use crate::error::{DbError, DbResult, KVStoreError};
use crate::ports::outbound::{BatchOperation, BlockchainDb, KeyValueStore};
use parking_lot::Mutex;
use std::collections::BTreeMap;

const CHECKPOINT_PREFIX: &[u8] = b"checkpoint:";

fn checkpoint_key(height: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(CHECKPOINT_PREFIX.len() + 8);
    key.extend_from_slice(CHECKPOINT_PREFIX);
    key.extend_from_slice(&height.to_be_bytes());
    key
}

fn height_from_key(key: &[u8]) -> Result<u64, KVStoreError> {
    key.strip_prefix(CHECKPOINT_PREFIX)
        .and_then(|rest| <[u8; 8]>::try_from(rest).ok())
        .map(u64::from_be_bytes)
        .ok_or_else(|| KVStoreError::CorruptionError {
            message: format!("malformed checkpoint key {}", hex::encode(key)),
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteScope {
    Txn,
    Batch,
}

struct DbState<S> {
    store: S,
    scope: Option<WriteScope>,
    /// Buffered writes of the open scope; `None` marks a removal.
    pending: BTreeMap<u64, Option<Vec<u8>>>,
    rtxn_open: bool,
}

impl<S: KeyValueStore> DbState<S> {
    fn read_raw(&self, height: u64) -> DbResult<Option<Vec<u8>>> {
        if let Some(pending) = self.pending.get(&height) {
            return Ok(pending.clone());
        }
        Ok(self.store.get(&checkpoint_key(height))?)
    }

    fn write_raw(&mut self, height: u64, value: Option<Vec<u8>>) -> DbResult<()> {
        if self.scope.is_some() {
            self.pending.insert(height, value);
            return Ok(());
        }
        let key = checkpoint_key(height);
        match value {
            Some(bytes) => self.store.put(&key, &bytes)?,
            None => self.store.delete(&key)?,
        }
        Ok(())
    }

    /// Stored checkpoints with the overlay applied, keyed by height.
    fn merged(&self) -> DbResult<BTreeMap<u64, Vec<u8>>> {
        let mut map = BTreeMap::new();
        for (key, value) in self.store.prefix_scan(CHECKPOINT_PREFIX)? {
            map.insert(height_from_key(&key)?, value);
        }
        for (height, pending) in &self.pending {
            match pending {
                Some(bytes) => {
                    map.insert(*height, bytes.clone());
                }
                None => {
                    map.remove(height);
                }
            }
        }
        Ok(map)
    }
}

/// [`BlockchainDb`] over a key-value store.
pub struct KvBlockchainDb<S: KeyValueStore> {
    state: Mutex<DbState<S>>,
    read_only: bool,
}

impl<S: KeyValueStore> KvBlockchainDb<S> {
    pub fn new(store: S) -> Self {
        Self::with_mode(store, false)
    }

    /// Database that serves reads and refuses every write.
    pub fn read_only(store: S) -> Self {
        Self::with_mode(store, true)
    }

    fn with_mode(store: S, read_only: bool) -> Self {
        Self {
            state: Mutex::new(DbState {
                store,
                scope: None,
                pending: BTreeMap::new(),
                rtxn_open: false,
            }),
            read_only,
        }
    }

    /// Run `f` against the backing store, bypassing any open overlay.
    pub fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.lock().store)
    }

    fn open_scope(&self, scope: WriteScope) -> DbResult<bool> {
        if self.read_only {
            return Err(DbError::ReadOnly);
        }
        let mut state = self.state.lock();
        if state.scope.is_some() {
            return Ok(false);
        }
        state.scope = Some(scope);
        state.pending.clear();
        Ok(true)
    }

    fn close_scope(&self, scope: WriteScope) -> DbResult<()> {
        let mut state = self.state.lock();
        if state.scope != Some(scope) {
            return Err(DbError::TxnState(format!("no open {:?} to stop", scope)));
        }
        state.scope = None;
        let ops = std::mem::take(&mut state.pending)
            .into_iter()
            .map(|(height, value)| match value {
                Some(bytes) => BatchOperation::put(checkpoint_key(height), bytes),
                None => BatchOperation::delete(checkpoint_key(height)),
            })
            .collect();
        state.store.atomic_batch_write(ops)?;
        Ok(())
    }

    fn discard_scope(&self, scope: WriteScope) {
        let mut state = self.state.lock();
        if state.scope == Some(scope) {
            state.scope = None;
            state.pending.clear();
        }
    }

    fn decode_all<'a>(
        entries: impl Iterator<Item = (&'a u64, &'a Vec<u8>)>,
    ) -> DbResult<Vec<Checkpoint>> {
        entries
            .map(|(_, bytes)| decode_checkpoint(bytes).map_err(DbError::from))
            .collect()
    }
}

impl<S: KeyValueStore> BlockchainDb for KvBlockchainDb<S> {
    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn block_rtxn_start(&self) -> DbResult<bool> {
        let mut state = self.state.lock();
        if state.rtxn_open || state.scope.is_some() {
            return Ok(false);
        }
        state.rtxn_open = true;
        Ok(true)
    }

    fn block_rtxn_stop(&self) {
        self.state.lock().rtxn_open = false;
    }

    fn block_wtxn_start(&self) -> DbResult<bool> {
        self.open_scope(WriteScope::Txn)
    }

    fn block_wtxn_stop(&self) -> DbResult<()> {
        self.close_scope(WriteScope::Txn)
    }

    fn block_wtxn_abort(&self) {
        self.discard_scope(WriteScope::Txn)
    }

    fn batch_start(&self) -> DbResult<bool> {
        self.open_scope(WriteScope::Batch)
    }

    fn batch_stop(&self) -> DbResult<()> {
        self.close_scope(WriteScope::Batch)
    }

    fn batch_abort(&self) {
        self.discard_scope(WriteScope::Batch)
    }

    fn get_block_checkpoint(&self, height: u64) -> DbResult<Option<Checkpoint>> {
        let state = self.state.lock();
        match state.read_raw(height)? {
            Some(bytes) => Ok(Some(decode_checkpoint(&bytes)?)),
            None => Ok(None),
        }
    }

    fn update_block_checkpoint(&self, checkpoint: &Checkpoint) -> DbResult<()> {
        if self.read_only {
            return Err(DbError::ReadOnly);
        }
        let bytes = encode_checkpoint(checkpoint)?;
        self.state.lock().write_raw(checkpoint.height, Some(bytes))
    }

    fn remove_block_checkpoint(&self, height: u64) -> DbResult<bool> {
        if self.read_only {
            return Err(DbError::ReadOnly);
        }
        let mut state = self.state.lock();
        let existed = state.read_raw(height)?.is_some();
        state.write_raw(height, None)?;
        Ok(existed)
    }

    fn get_top_checkpoint(&self) -> DbResult<Option<Checkpoint>> {
        let merged = self.state.lock().merged()?;
        match merged.last_key_value() {
            Some((_, bytes)) => Ok(Some(decode_checkpoint(bytes)?)),
            None => Ok(None),
        }
    }

    fn get_checkpoints_range(
        &self,
        start: u64,
        end: u64,
        limit: usize,
    ) -> DbResult<Vec<Checkpoint>> {
        let merged = self.state.lock().merged()?;
        let limit = if limit == 0 { usize::MAX } else { limit };
        if start <= end {
            Self::decode_all(merged.range(start..=end).take(limit))
        } else {
            Self::decode_all(merged.range(end..=start).rev().take(limit))
        }
    }
}
