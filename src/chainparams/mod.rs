//! Network parameter registry
//!
//! Consensus constants, genesis blocks and seed lists for the three LABH
//! network variants, plus the registry that selects the active one at
//! startup.

mod genesis;
mod network;
mod params;
mod registry;
mod seeds;

pub use genesis::*;
pub use network::*;
pub use params::*;
pub use registry::*;
pub use seeds::*;

use thiserror::Error;
use crate::crypto::{Hash, HashError};

/// Errors raised while constructing or selecting parameter sets.
///
/// Everything except `InvalidNetwork` means the compiled-in constants are
/// inconsistent and the node must not start.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("genesis hash mismatch on {variant}: expected {expected}, computed {computed}")]
    GenesisHashMismatch {
        variant: NetworkVariant,
        expected: Hash,
        computed: Hash,
    },

    #[error("genesis merkle root mismatch on {variant}: expected {expected}, computed {computed}")]
    MerkleRootMismatch {
        variant: NetworkVariant,
        expected: Hash,
        computed: Hash,
    },

    #[error("genesis bits 0x{bits:08x} on {variant} do not encode the pow limit 0x{expected:08x}")]
    GenesisBitsMismatch {
        variant: NetworkVariant,
        bits: u32,
        expected: u32,
    },

    #[error("unimplemented network variant id {0}")]
    UnknownVariant(u32),

    #[error("invalid network name: {0}")]
    InvalidNetwork(String),

    #[error("duplicate checkpoint at height {0}")]
    DuplicateCheckpoint(u32),

    #[error("invalid hex constant: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ParamsError {
    /// True for errors that indicate corrupted compiled-in constants
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ParamsError::InvalidNetwork(_))
    }
}
