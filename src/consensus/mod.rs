//! Consensus module - Block and transaction structure, proof-of-work targets

mod block;
mod difficulty;
mod transaction;

pub use block::*;
pub use difficulty::*;
pub use transaction::*;
