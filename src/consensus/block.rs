//! Block structure for the LABH blockchain
//!
//! Defines the block and the 80-byte block header.

use serde::{Deserialize, Serialize};
use crate::crypto::{compute_merkle_root, scrypt_hash, Hash, HashError};
use super::Transaction;

/// Serialized header length
pub const HEADER_SIZE: usize = 80;

/// Block header containing all metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Protocol version
    pub version: i32,
    /// Hash of the previous block
    pub prev_hash: Hash,
    /// Merkle root of all transactions
    pub merkle_root: Hash,
    /// Block timestamp (seconds since Unix epoch)
    pub time: u32,
    /// Difficulty target (compact representation)
    pub bits: u32,
    /// Nonce used for PoW
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialize the header for hashing
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&self.prev_hash.0);
        bytes[36..68].copy_from_slice(&self.merkle_root.0);
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Block identity hash (scrypt of the serialized header)
    pub fn pow_hash(&self) -> Result<Hash, HashError> {
        scrypt_hash(&self.to_bytes())
    }
}

/// A complete block containing header and transactions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    pub fn hash(&self) -> Result<Hash, HashError> {
        self.header.pow_hash()
    }

    /// Merkle root recomputed from the carried transactions
    pub fn build_merkle_root(&self) -> Hash {
        let txids: Vec<Hash> = self.transactions.iter().map(Transaction::txid).collect();
        compute_merkle_root(&txids)
    }

    pub fn is_genesis(&self) -> bool {
        self.header.prev_hash.is_zero()
    }
}
