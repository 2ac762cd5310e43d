//! Checkpoint-enforced reorganization guard
//!
//! Two acceptance checks are offered to the chain-processing engine: hardened
//! pins from the active variant's table, and a rolling sync checkpoint that
//! sits `span` blocks below the current best tip. The guard holds no mutable
//! state and takes no locks; callers must hold whatever lock keeps the block
//! index consistent for the duration of a call.

use tracing::debug;
use crate::chainparams::NetworkParameters;
use crate::crypto::Hash;
use crate::CHECKPOINT_SPAN;
use super::CheckpointTable;

/// Read-only view of the externally maintained block index
///
/// Refs passed to a view must come from that same index. Implementations
/// should answer for unknown refs rather than panic.
pub trait BlockIndexView {
    /// Handle to an index entry
    type BlockRef: Copy;

    fn height(&self, block: Self::BlockRef) -> u32;

    /// Parent entry, `None` at the chain root
    fn parent(&self, block: Self::BlockRef) -> Option<Self::BlockRef>;

    /// Entry for a block hash, if the block is known locally
    fn lookup(&self, hash: &Hash) -> Option<Self::BlockRef>;
}

#[derive(Debug, Clone, Copy)]
pub struct CheckpointGuard<'a> {
    checkpoints: &'a CheckpointTable,
    span: u32,
}

impl<'a> CheckpointGuard<'a> {
    pub fn new(params: &'a NetworkParameters) -> Self {
        Self::with_table(&params.checkpoints)
    }

    pub fn with_table(checkpoints: &'a CheckpointTable) -> Self {
        Self {
            checkpoints,
            span: CHECKPOINT_SPAN,
        }
    }

    pub fn with_span(mut self, span: u32) -> Self {
        self.span = span;
        self
    }

    pub fn span(&self) -> u32 {
        self.span
    }

    /// False only when `height` is pinned to a different hash
    pub fn check_hardened(&self, height: u32, hash: &Hash) -> bool {
        match self.checkpoints.get(height) {
            None => true,
            Some(pinned) if pinned == hash => true,
            Some(pinned) => {
                debug!(height, %hash, %pinned, "block contradicts hardened checkpoint");
                false
            }
        }
    }

    /// Height of the highest pin, 0 for an empty table
    pub fn total_checkpointed_height(&self) -> u32 {
        self.checkpoints.last().map(|(height, _)| height).unwrap_or(0)
    }

    /// Highest pin whose block is present in the local index
    pub fn last_checkpoint_block<I: BlockIndexView>(&self, index: &I) -> Option<I::BlockRef> {
        self.checkpoints
            .iter()
            .rev()
            .find_map(|(_, hash)| index.lookup(hash))
    }

    /// Walk back from `tip` to the first ancestor at least `span` blocks below it.
    ///
    /// Chains shorter than the span yield their root. A parent link that does
    /// not lower the height ends the walk.
    pub fn auto_select_sync_checkpoint<I: BlockIndexView>(
        &self,
        index: &I,
        tip: I::BlockRef,
    ) -> I::BlockRef {
        let tip_height = u64::from(index.height(tip));
        let span = u64::from(self.span);

        let mut current = tip;
        let mut current_height = tip_height;
        while current_height + span > tip_height {
            let parent = match index.parent(current) {
                Some(parent) => parent,
                None => break,
            };
            let parent_height = u64::from(index.height(parent));
            if parent_height >= current_height {
                debug!(height = current_height, parent_height, "broken parent link in block index");
                break;
            }
            current = parent;
            current_height = parent_height;
        }
        current
    }

    /// True iff `height` lies above the current sync checkpoint
    pub fn check_sync<I: BlockIndexView>(&self, height: u32, index: &I, tip: I::BlockRef) -> bool {
        let sync = self.auto_select_sync_checkpoint(index, tip);
        let sync_height = index.height(sync);
        if height <= sync_height {
            debug!(height, sync_height, "height at or below sync checkpoint");
            return false;
        }
        true
    }
}
