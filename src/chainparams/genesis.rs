//! Genesis block reconstruction and validation
//!
//! Every variant shares the same coinbase transaction; only the header time,
//! bits and nonce differ. The computed hash and merkle root must equal the
//! hard-coded values or the parameter set is unusable.

use serde::{Deserialize, Serialize};
use crate::consensus::{
    Block, BlockHeader, OutPoint, Script, Transaction, TxIn, TxOut, OP_0, OP_CHECKSIG,
};
use crate::crypto::Hash;
use super::{NetworkVariant, ParamsError};

/// Headline embedded in the genesis coinbase
pub const GENESIS_TIMESTAMP_MESSAGE: &str =
    "18 April 2018 - Philippines Senator Wants Harsher Penalties for Cryptocurrency Crimes";

/// Public key the genesis output pays to
pub const GENESIS_OUTPUT_PUBKEY: &str = "0449f970bf624677ddb2d6ec0d95409bb540a8cbb70de0e1f99ab10c38b1555e5ea7f1688c5b38c47bca9e4f34235a73062b9585173531203e86878eb3503d5ef6";

/// Number pushed ahead of the headline in the coinbase script
const GENESIS_COINBASE_TAG: u8 = 42;

/// Coinbase transaction time, shared by all variants
pub const GENESIS_TX_TIME: u32 = 1524046794;

/// Full description of a first block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisSpec {
    pub version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
    pub expected_hash: Hash,
    pub expected_merkle_root: Hash,
}

impl GenesisSpec {
    /// Build the coinbase transaction carrying the headline
    pub fn coinbase(&self) -> Result<Transaction, ParamsError> {
        let pubkey = hex::decode(GENESIS_OUTPUT_PUBKEY)?;

        let script_sig = Script::new()
            .push_opcode(OP_0)
            .push_slice(&[GENESIS_COINBASE_TAG])
            .push_slice(GENESIS_TIMESTAMP_MESSAGE.as_bytes());
        let script_pubkey = Script::new().push_slice(&pubkey).push_opcode(OP_CHECKSIG);

        Ok(Transaction {
            version: 1,
            time: GENESIS_TX_TIME,
            inputs: vec![TxIn {
                prevout: OutPoint::null(),
                script_sig,
                sequence: u32::MAX,
            }],
            outputs: vec![TxOut {
                value: 0,
                script_pubkey,
            }],
            lock_time: 0,
        })
    }

    /// Assemble the genesis block
    pub fn build(&self) -> Result<Block, ParamsError> {
        let coinbase = self.coinbase()?;
        let mut block = Block::new(
            BlockHeader {
                version: self.version,
                prev_hash: Hash::zero(),
                merkle_root: Hash::zero(),
                time: self.time,
                bits: self.bits,
                nonce: self.nonce,
            },
            vec![coinbase],
        );
        block.header.merkle_root = block.build_merkle_root();
        Ok(block)
    }

    /// Build, hash and compare against the hard-coded expectations
    pub fn validate(&self, variant: NetworkVariant) -> Result<Block, ParamsError> {
        let block = self.build()?;

        let merkle_root = block.header.merkle_root;
        if merkle_root != self.expected_merkle_root {
            return Err(ParamsError::MerkleRootMismatch {
                variant,
                expected: self.expected_merkle_root,
                computed: merkle_root,
            });
        }

        let hash = block.hash()?;
        if hash != self.expected_hash {
            return Err(ParamsError::GenesisHashMismatch {
                variant,
                expected: self.expected_hash,
                computed: hash,
            });
        }

        tracing::debug!(%variant, %hash, "genesis block validated");
        Ok(block)
    }
}
