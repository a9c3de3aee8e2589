//! Outcome of a cull pass

/// Heights touched by one block-add or detach cull pass.
///
/// Individual removal failures are collected here instead of aborting the
/// pass; they only delay pruning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CullReport {
    /// Checkpoints removed.
    pub removed: Vec<u64>,
    /// Removals the database refused.
    pub failed: Vec<u64>,
    /// Heights left alone because they are kept forever.
    pub skipped_persistent: Vec<u64>,
}

impl CullReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.failed.is_empty() && self.skipped_persistent.is_empty()
    }
}
