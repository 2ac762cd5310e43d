//! LABH Core Library
//!
//! Network parameters and checkpoint-enforced reorganization guard for the
//! LABH proof-of-work/proof-of-stake chain.
//!
//! The host builds a [`chainparams::ParamsRegistry`] once at startup, selects
//! a network variant from configuration, and hands the active
//! [`chainparams::NetworkParameters`] to a [`checkpoints::CheckpointGuard`]
//! that the chain-processing engine consults before accepting blocks or
//! reorganizations.

pub mod chainparams;
pub mod checkpoints;
pub mod config;
pub mod consensus;
pub mod crypto;
pub mod storage;

/// Protocol constants
pub mod constants {
    /// Chain name
    pub const CHAIN_NAME: &str = "LABH";

    /// Tip-relative depth of the sync checkpoint, in blocks
    pub const CHECKPOINT_SPAN: u32 = 500;
}

pub use constants::CHECKPOINT_SPAN;
