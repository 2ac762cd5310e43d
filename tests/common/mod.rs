//! Synthetic block-index fixtures shared by the integration tests

#![allow(dead_code)]

use labh_core::crypto::{double_sha256, Hash};
use labh_core::storage::{BlockId, BlockIndex};

/// Deterministic stand-in hash for a block on branch `branch` at `height`
pub fn block_hash(branch: u8, height: u32) -> Hash {
    let mut data = [0u8; 5];
    data[0] = branch;
    data[1..].copy_from_slice(&height.to_le_bytes());
    double_sha256(&data)
}

/// Linear chain 0..=tip_height; returns the index and its tip
pub fn linear_chain(tip_height: u32) -> (BlockIndex, BlockId) {
    let mut index = BlockIndex::new();
    let mut tip = index.insert_genesis(block_hash(0, 0)).unwrap();
    for height in 1..=tip_height {
        tip = index.insert(block_hash(0, height), tip).unwrap();
    }
    (index, tip)
}

/// Extend `index` with a side branch forking off `fork_point`
pub fn extend_branch(index: &mut BlockIndex, fork_point: BlockId, branch: u8, len: u32) -> BlockId {
    use labh_core::checkpoints::BlockIndexView;

    let base = index.height(fork_point);
    let mut tip = fork_point;
    for offset in 1..=len {
        tip = index.insert(block_hash(branch, base + offset), tip).unwrap();
    }
    tip
}
