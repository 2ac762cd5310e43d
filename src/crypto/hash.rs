//! Hash types and the two hash functions the LABH chain is built on.
//!
//! Transaction ids and merkle nodes use double SHA-256. Block identity uses
//! scrypt (N=1024, r=1, p=1) over the serialized 80-byte header.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// scrypt cost as log2(N)
const SCRYPT_LOG_N: u8 = 10;
const SCRYPT_R: u32 = 1;
const SCRYPT_P: u32 = 1;

/// Errors raised by the hashing backends
#[derive(Debug, Error)]
pub enum HashError {
    #[error("scrypt failure: {0}")]
    Scrypt(String),

    #[error("invalid hash hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// 32-byte hash output.
///
/// Bytes are kept in internal order (as produced by the hash function, which
/// is little-endian when read as a 256-bit number). Hex text is always in
/// display order, i.e. byte-reversed, matching block explorers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// All-zero hash (previous-block hash of genesis)
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    /// Wrap raw bytes in internal order
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Parse display-order hex, with or without a `0x` prefix
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex)?;
        if bytes.len() != 32 {
            return Err(HashError::InvalidHex(hex::FromHexError::InvalidStringLength));
        }
        let mut arr = [0u8; 32];
        for (dst, src) in arr.iter_mut().zip(bytes.iter().rev()) {
            *dst = *src;
        }
        Ok(Hash(arr))
    }

    /// Display-order hex
    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

/// SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    Hash(out)
}

/// Hash two merkle nodes together
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(&left.0);
    data[32..].copy_from_slice(&right.0);
    double_sha256(&data)
}

/// scrypt(N=1024, r=1, p=1) with the input used as both password and salt
pub fn scrypt_hash(data: &[u8]) -> Result<Hash, HashError> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, 32)
        .map_err(|e| HashError::Scrypt(e.to_string()))?;
    let mut out = [0u8; 32];
    scrypt::scrypt(data, data, &params, &mut out).map_err(|e| HashError::Scrypt(e.to_string()))?;
    Ok(Hash(out))
}
