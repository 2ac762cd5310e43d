//! Storage module - in-memory block index

mod block_index;

pub use block_index::*;
