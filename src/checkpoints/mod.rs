//! Checkpoint guard - hardened pins and the rolling sync checkpoint

mod guard;
mod table;

pub use guard::*;
pub use table::*;
