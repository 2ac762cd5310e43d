//! In-memory block index
//!
//! Maps block hashes to (height, parent) entries and tracks the best tip.
//! This is the minimal index the node binary needs to run the checkpoint
//! guard against its genesis block, and the one tests use to inject
//! synthetic chains.

use std::collections::HashMap;
use thiserror::Error;
use crate::checkpoints::BlockIndexView;
use crate::crypto::Hash;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("block {0} already indexed")]
    DuplicateBlock(Hash),

    #[error("unknown parent entry {0:?}")]
    UnknownParent(BlockId),

    #[error("unknown block entry {0:?}")]
    UnknownBlock(BlockId),

    #[error("index already has a genesis block")]
    GenesisExists,
}

/// Slot of an entry in the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

#[derive(Debug, Clone)]
struct IndexEntry {
    hash: Hash,
    height: u32,
    parent: Option<BlockId>,
}

#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    entries: Vec<IndexEntry>,
    by_hash: HashMap<Hash, BlockId>,
    best_tip: Option<BlockId>,
}

impl BlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the chain root; it also becomes the best tip
    pub fn insert_genesis(&mut self, hash: Hash) -> Result<BlockId, IndexError> {
        if !self.entries.is_empty() {
            return Err(IndexError::GenesisExists);
        }
        let id = self.push(hash, 0, None)?;
        self.best_tip = Some(id);
        Ok(id)
    }

    /// Index a block on top of `parent`. The tip moves only if the new block is higher.
    pub fn insert(&mut self, hash: Hash, parent: BlockId) -> Result<BlockId, IndexError> {
        let parent_height = self
            .entries
            .get(parent.0)
            .map(|entry| entry.height)
            .ok_or(IndexError::UnknownParent(parent))?;
        let id = self.push(hash, parent_height + 1, Some(parent))?;

        let tip_height = self.best_tip.map(|tip| self.entries[tip.0].height);
        if tip_height.map_or(true, |h| parent_height + 1 > h) {
            self.best_tip = Some(id);
        }
        Ok(id)
    }

    fn push(&mut self, hash: Hash, height: u32, parent: Option<BlockId>) -> Result<BlockId, IndexError> {
        if self.by_hash.contains_key(&hash) {
            return Err(IndexError::DuplicateBlock(hash));
        }
        let id = BlockId(self.entries.len());
        self.entries.push(IndexEntry { hash, height, parent });
        self.by_hash.insert(hash, id);
        Ok(id)
    }

    /// Override the best tip, as the chain-selection logic would after a reorg
    pub fn set_best_tip(&mut self, tip: BlockId) -> Result<(), IndexError> {
        if tip.0 >= self.entries.len() {
            return Err(IndexError::UnknownBlock(tip));
        }
        self.best_tip = Some(tip);
        Ok(())
    }

    pub fn best_tip(&self) -> Option<BlockId> {
        self.best_tip
    }

    pub fn hash_of(&self, block: BlockId) -> Option<Hash> {
        self.entries.get(block.0).map(|entry| entry.hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A `BlockId` minted by another index reads as a parentless entry at height 0.
impl BlockIndexView for BlockIndex {
    type BlockRef = BlockId;

    fn height(&self, block: BlockId) -> u32 {
        self.entries.get(block.0).map_or(0, |entry| entry.height)
    }

    fn parent(&self, block: BlockId) -> Option<BlockId> {
        self.entries.get(block.0).and_then(|entry| entry.parent)
    }

    fn lookup(&self, hash: &Hash) -> Option<BlockId> {
        self.by_hash.get(hash).copied()
    }
}
