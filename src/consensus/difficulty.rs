//! Proof-of-work targets and the compact ("bits") encoding
//!
//! Targets are 256-bit unsigned integers stored big-endian, so the derived
//! ordering is numeric ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::crypto::Hash;

/// 256-bit difficulty target
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target(pub [u8; 32]);

impl Target {
    pub const ZERO: Target = Target([0u8; 32]);
    pub const MAX: Target = Target([0xffu8; 32]);

    /// `~0 >> shift`, the form every proof-of-work limit is written in
    pub fn limit(shift: u32) -> Self {
        let mut target = [0xffu8; 32];
        let shift = shift.min(256) as usize;
        let zero_bytes = shift / 8;
        for byte in target.iter_mut().take(zero_bytes) {
            *byte = 0;
        }
        if zero_bytes < 32 {
            target[zero_bytes] = 0xff >> (shift % 8);
        }
        Target(target)
    }

    /// Interpret a hash as a number (hashes are little-endian internally)
    pub fn from_hash(hash: &Hash) -> Self {
        let mut bytes = hash.0;
        bytes.reverse();
        Target(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Decode compact bits.
    ///
    /// Returns `None` for negative encodings and for values that do not fit
    /// in 256 bits.
    pub fn from_compact(bits: u32) -> Option<Self> {
        let size = (bits >> 24) as i32;
        let mut word = bits & 0x007f_ffff;
        let negative = bits & 0x0080_0000 != 0;

        if word != 0 && negative {
            return None;
        }

        let mut target = [0u8; 32];
        if size <= 3 {
            word >>= 8 * (3 - size) as u32;
            target[29..32].copy_from_slice(&word.to_be_bytes()[1..4]);
            return Some(Target(target));
        }

        for k in 0..3i32 {
            let byte = ((word >> (8 * k)) & 0xff) as u8;
            if byte == 0 {
                continue;
            }
            let power = size - 3 + k;
            if power > 31 {
                return None;
            }
            target[(31 - power) as usize] = byte;
        }
        Some(Target(target))
    }

    /// Encode to compact bits, rounding down to the top three significant bytes
    pub fn to_compact(&self) -> u32 {
        let first_nonzero = match self.0.iter().position(|&b| b != 0) {
            Some(i) => i,
            None => return 0,
        };
        let mut size = (32 - first_nonzero) as u32;

        let mut mantissa: u32 = 0;
        for offset in 0..3 {
            let byte = self.0.get(first_nonzero + offset).copied().unwrap_or(0);
            mantissa = (mantissa << 8) | byte as u32;
        }

        // The sign bit of the mantissa must stay clear
        if mantissa & 0x0080_0000 != 0 {
            mantissa >>= 8;
            size += 1;
        }

        (size << 24) | mantissa
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", hex::encode(self.0))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Check that `hash` satisfies the compact target `bits` and that the target
/// itself is within `pow_limit`
pub fn check_proof_of_work(hash: &Hash, bits: u32, pow_limit: &Target) -> bool {
    let target = match Target::from_compact(bits) {
        Some(target) => target,
        None => return false,
    };

    if target.is_zero() || target > *pow_limit {
        return false;
    }

    Target::from_hash(hash) <= target
}
