//! Checkpoint Store - Core business logic
//!
//! Owns the cull cursor and the cached immutable height for one chain. Not
//! internally synchronised: the blockchain serialises calls under its own
//! lock, and the `&mut self` methods are the only writers of that state.

use crate::config::CheckpointConfig;
use crate::domain::{
    Checkpoint, CheckpointKind, CheckpointPolicy, CullReport, HashFile, MAINNET_CHECKPOINTS,
};
use crate::error::{CheckpointError, CheckpointResult, DbResult};
use crate::metrics;
use crate::ports::inbound::{AltBlockDecision, BlockAddOutcome, BlockCheck, CheckpointApi};
use crate::ports::outbound::{BlockchainDb, DbReadGuard, DbWriteGuard};
use shared_types::{hash_from_hex, short_hex, Hash, NetworkType};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Checkpoint Store implementation
pub struct CheckpointStore<D: BlockchainDb> {
    db: Arc<D>,
    network: NetworkType,
    policy: CheckpointPolicy,
    /// Next height the block-add cull pass starts from: one interval past
    /// the last height it visited, not the last height culled.
    last_cull_height: u64,
    /// Highest immutable height seen by the alternative-block gate.
    immutable_height: u64,
}

impl<D: BlockchainDb> CheckpointStore<D> {
    /// Validate the policy, initialise against `db`, then merge the
    /// configured hash file.
    pub fn new(config: &CheckpointConfig, db: Arc<D>) -> CheckpointResult<Self> {
        config.policy.validate()?;

        let mut store = Self {
            db: Arc::clone(&db),
            network: config.network,
            policy: config.policy.clone(),
            last_cull_height: 0,
            immutable_height: 0,
        };
        store.init(config.network, db)?;

        if let Some(path) = &config.hashfile {
            if !store.db.is_read_only() {
                store.load_checkpoints_from_json(path)?;
            }
        }
        Ok(store)
    }

    /// Reset cursor state and load the hardcoded table for `network`.
    ///
    /// Nothing is written to a read-only database.
    pub fn init(&mut self, network: NetworkType, db: Arc<D>) -> CheckpointResult<()> {
        self.db = db;
        self.network = network;
        self.last_cull_height = 0;
        self.immutable_height = 0;

        if self.db.is_read_only() {
            info!(network = %network, "[sn-01] Read-only database, skipping hardcoded checkpoints");
            return Ok(());
        }

        if network == NetworkType::Mainnet {
            for &(height, hex) in MAINNET_CHECKPOINTS {
                let hash = hash_from_hex(hex).map_err(|e| CheckpointError::InvalidHash {
                    height,
                    reason: e.to_string(),
                })?;
                if !self.add(height, hash) {
                    return Err(CheckpointError::HardcodedInsertFailed { height });
                }
            }
        }

        info!(
            network = %network,
            max_height = self.max_height(),
            "[sn-01] Checkpoint store initialised"
        );
        Ok(())
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn policy(&self) -> &CheckpointPolicy {
        &self.policy
    }

    pub fn last_cull_height(&self) -> u64 {
        self.last_cull_height
    }

    pub fn immutable_height(&self) -> u64 {
        self.immutable_height
    }

    pub fn db(&self) -> &Arc<D> {
        &self.db
    }

    /// Run `f` inside a read transaction.
    fn read<T>(&self, f: impl FnOnce(&D) -> DbResult<T>) -> DbResult<T> {
        let _guard = DbReadGuard::new(self.db.as_ref())?;
        f(self.db.as_ref())
    }

    fn write_checkpoint(&self, checkpoint: &Checkpoint) -> DbResult<()> {
        let batch_started = self.db.batch_start()?;
        if let Err(e) = self.db.update_block_checkpoint(checkpoint) {
            if batch_started {
                self.db.batch_abort();
            }
            return Err(e);
        }
        if batch_started {
            self.db.batch_stop()?;
        }
        Ok(())
    }

    /// Walk the cull cursor up to `end_cull`, removing everything that is
    /// not kept forever.
    fn cull_below(&mut self, db: &D, end_cull: u64, report: &mut CullReport) {
        let start_cull = self
            .policy
            .align_up(end_cull.saturating_sub(self.policy.retention_interval));
        let mut cursor = self
            .policy
            .align_up(self.last_cull_height.max(start_cull));

        while cursor < end_cull {
            if self.policy.is_persistent(cursor) {
                report.skipped_persistent.push(cursor);
            } else {
                match db.remove_block_checkpoint(cursor) {
                    Ok(true) => report.removed.push(cursor),
                    Ok(false) => {}
                    Err(e) => {
                        warn!(height = cursor, error = %e, "[sn-01] Failed to cull checkpoint");
                        report.failed.push(cursor);
                    }
                }
            }
            cursor = cursor.saturating_add(self.policy.checkpoint_interval);
        }
        self.last_cull_height = cursor;
    }
}

impl<D: BlockchainDb> CheckpointApi for CheckpointStore<D> {
    fn get(&self, height: u64) -> Option<Checkpoint> {
        match self.read(|db| db.get_block_checkpoint(height)) {
            Ok(checkpoint) => checkpoint,
            Err(e) => {
                error!(height, error = %e, "[sn-01] Failed to read checkpoint");
                None
            }
        }
    }

    fn add(&self, height: u64, hash: Hash) -> bool {
        match self.read(|db| db.get_block_checkpoint(height)) {
            Ok(Some(existing)) => {
                if existing.check(&hash) {
                    return true;
                }
                warn!(
                    height,
                    existing = %short_hex(&existing.block_hash),
                    new = %short_hex(&hash),
                    "[sn-01] Checkpoint conflicts with stored hash"
                );
                false
            }
            Ok(None) => self.update(&Checkpoint::hardcoded(height, hash)),
            Err(e) => {
                error!(height, error = %e, "[sn-01] Failed to read checkpoint");
                false
            }
        }
    }

    fn update(&self, checkpoint: &Checkpoint) -> bool {
        let height = checkpoint.height;
        match self.read(|db| db.get_block_checkpoint(height)) {
            Ok(Some(existing)) if !existing.check(&checkpoint.block_hash) => {
                warn!(
                    height,
                    existing = %short_hex(&existing.block_hash),
                    new = %short_hex(&checkpoint.block_hash),
                    "[sn-01] Refusing to replace checkpoint with a different hash"
                );
                return false;
            }
            Ok(Some(existing))
                if existing.kind == CheckpointKind::Hardcoded && checkpoint.is_service_node() =>
            {
                debug!(height, "[sn-01] Hardcoded checkpoint already covers this height");
                return true;
            }
            Ok(_) => {}
            Err(e) => {
                error!(height, error = %e, "[sn-01] Failed to read checkpoint");
                return false;
            }
        }

        match self.write_checkpoint(checkpoint) {
            Ok(()) => {
                metrics::record_checkpoint_stored(&checkpoint.kind.to_string());
                debug!(
                    height,
                    block_hash = %short_hex(&checkpoint.block_hash),
                    kind = %checkpoint.kind,
                    "[sn-01] Stored checkpoint"
                );
                true
            }
            Err(e) => {
                error!(
                    height,
                    block_hash = %short_hex(&checkpoint.block_hash),
                    error = %e,
                    "[sn-01] Failed to update checkpoint"
                );
                false
            }
        }
    }

    fn on_block_add(
        &mut self,
        height: u64,
        major_version: u8,
        checkpoint: Option<&Checkpoint>,
    ) -> BlockAddOutcome {
        let mut outcome = BlockAddOutcome::default();
        if height < self.policy.retention_interval || major_version < self.policy.activation_version
        {
            return outcome;
        }

        let db = Arc::clone(&self.db);
        let guard = match DbWriteGuard::new(db.as_ref()) {
            Ok(guard) => guard,
            Err(e) => {
                error!(height, error = %e, "[sn-01] Failed to open write transaction");
                outcome.checkpoint_stored = checkpoint.map(|_| false);
                return outcome;
            }
        };

        let end_cull = match db.get_immutable_checkpoint(height.saturating_add(1)) {
            Ok(immutable) => immutable.map_or(0, |cp| cp.height),
            Err(e) => {
                error!(height, error = %e, "[sn-01] Failed to read immutable checkpoint");
                0
            }
        };

        self.cull_below(db.as_ref(), end_cull, &mut outcome.cull);
        outcome.checkpoint_stored = checkpoint.map(|cp| self.update(cp));

        if let Err(e) = guard.commit() {
            error!(height, error = %e, "[sn-01] Failed to commit block-add changes");
            let lost = std::mem::take(&mut outcome.cull.removed);
            outcome.cull.failed.extend(lost);
            if outcome.checkpoint_stored.is_some() {
                outcome.checkpoint_stored = Some(false);
            }
        }

        metrics::record_cull(outcome.cull.removed.len(), outcome.cull.failed.len());
        if !outcome.cull.removed.is_empty() || !outcome.cull.failed.is_empty() {
            debug!(
                height,
                removed = outcome.cull.removed.len(),
                failed = outcome.cull.failed.len(),
                last_cull_height = self.last_cull_height,
                "[sn-01] Culled checkpoints"
            );
        }
        outcome
    }

    fn on_block_detach(&mut self, height: u64) -> CullReport {
        self.last_cull_height = self.last_cull_height.min(height);
        let mut report = CullReport::default();

        let db = Arc::clone(&self.db);
        let guard = match DbWriteGuard::new(db.as_ref()) {
            Ok(guard) => guard,
            Err(e) => {
                error!(height, error = %e, "[sn-01] Failed to open write transaction");
                return report;
            }
        };

        // Genesis and anything below the first interval stay.
        let floor = height.max(self.policy.checkpoint_interval);
        let doomed = match db.get_checkpoints_range(u64::MAX, floor, 0) {
            Ok(checkpoints) => checkpoints,
            Err(e) => {
                error!(height, error = %e, "[sn-01] Failed to list checkpoints to detach");
                Vec::new()
            }
        };

        for cp in doomed {
            match db.remove_block_checkpoint(cp.height) {
                Ok(_) => report.removed.push(cp.height),
                Err(e) => {
                    warn!(height = cp.height, error = %e, "[sn-01] Failed to remove checkpoint");
                    report.failed.push(cp.height);
                }
            }
        }

        if let Err(e) = guard.commit() {
            error!(height, error = %e, "[sn-01] Failed to commit detach");
            let lost = std::mem::take(&mut report.removed);
            report.failed.extend(lost);
        }

        metrics::record_cull(report.removed.len(), report.failed.len());
        if !report.removed.is_empty() {
            info!(height, removed = report.removed.len(), "[sn-01] Detached checkpoints");
        }
        report
    }

    fn is_in_checkpoint_zone(&self, height: u64) -> bool {
        height <= self.max_height()
    }

    fn check_block(&self, height: u64, hash: &Hash) -> BlockCheck {
        let Some(checkpoint) = self.get(height) else {
            return BlockCheck {
                valid: true,
                is_checkpoint: false,
                is_service_node_checkpoint: false,
            };
        };

        let valid = checkpoint.check(hash);
        if valid {
            debug!(height, block_hash = %short_hex(hash), "[sn-01] Checkpoint passed");
        } else {
            warn!(
                height,
                expected = %short_hex(&checkpoint.block_hash),
                block_hash = %short_hex(hash),
                "[sn-01] Checkpoint failed"
            );
        }

        BlockCheck {
            valid,
            is_checkpoint: true,
            is_service_node_checkpoint: checkpoint.is_service_node(),
        }
    }

    fn alternative_block_decision(
        &mut self,
        chain_height: u64,
        candidate_height: u64,
    ) -> AltBlockDecision {
        if candidate_height == 0 {
            return AltBlockDecision::default();
        }

        let lookup = self.read(|db| {
            let first = db.get_checkpoints_range(0, chain_height, 1)?;
            let covered = first.first().is_some_and(|cp| cp.height <= chain_height);
            if !covered {
                return Ok(None);
            }
            db.get_immutable_checkpoint(chain_height).map(Some)
        });

        let immutable = match lookup {
            Ok(None) => {
                return AltBlockDecision {
                    allowed: true,
                    service_node_checkpoint: false,
                }
            }
            Ok(Some(immutable)) => immutable,
            Err(e) => {
                error!(chain_height, candidate_height, error = %e, "[sn-01] Alternative block check failed");
                return AltBlockDecision::default();
            }
        };

        let service_node_checkpoint = immutable.as_ref().is_some_and(|cp| cp.is_service_node());
        let immutable_height = immutable.map_or(0, |cp| cp.height);
        self.immutable_height = self.immutable_height.max(immutable_height);
        metrics::set_immutable_height(self.immutable_height);

        let allowed = candidate_height > self.immutable_height;
        if !allowed {
            metrics::record_alt_block_rejected();
            debug!(
                candidate_height,
                immutable_height = self.immutable_height,
                "[sn-01] Alternative block below immutable height"
            );
        }

        AltBlockDecision {
            allowed,
            service_node_checkpoint,
        }
    }

    fn max_height(&self) -> u64 {
        match self.read(|db| db.get_top_checkpoint()) {
            Ok(top) => top.map_or(0, |cp| cp.height),
            Err(e) => {
                error!(error = %e, "[sn-01] Failed to read top checkpoint");
                0
            }
        }
    }

    fn checkpoints_in_range(&self, start: u64, end: u64, limit: usize) -> Vec<Checkpoint> {
        match self.read(|db| db.get_checkpoints_range(start, end, limit)) {
            Ok(checkpoints) => checkpoints,
            Err(e) => {
                error!(start, end, error = %e, "[sn-01] Failed to read checkpoint range");
                Vec::new()
            }
        }
    }

    fn load_checkpoints_from_json(&self, path: &Path) -> CheckpointResult<usize> {
        let path_str = path.display().to_string();
        if !path.exists() {
            debug!(path = %path_str, "[sn-01] No checkpoint hash file");
            return Ok(0);
        }

        let hash_file_error = |reason: String| CheckpointError::HashFile {
            path: path_str.clone(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| hash_file_error(e.to_string()))?;
        let file: HashFile =
            serde_json::from_str(&text).map_err(|e| hash_file_error(e.to_string()))?;

        let prev_max_height = self.max_height();
        let mut added = 0;
        for line in file.hashlines {
            if line.height <= prev_max_height {
                debug!(height = line.height, "[sn-01] Hash file entry below top checkpoint, ignored");
                continue;
            }
            let hash = hash_from_hex(&line.hash).map_err(|e| CheckpointError::InvalidHash {
                height: line.height,
                reason: e.to_string(),
            })?;
            if !self.add(line.height, hash) {
                return Err(CheckpointError::AddFailed {
                    height: line.height,
                });
            }
            added += 1;
        }

        info!(path = %path_str, added, "[sn-01] Loaded checkpoints from hash file");
        Ok(added)
    }
}
