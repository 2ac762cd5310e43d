//! Hardened checkpoint tables
//!
//! A good checkpoint block is surrounded by blocks with reasonable timestamps
//! and contains no strange transactions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::chainparams::ParamsError;
use crate::crypto::Hash;

/// Curated mainnet pins, ascending by height
const MAINNET_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "00000172a7e27a0c53a9c6fd4d322aa3150bb74dc2669b8a41e76b09eb8befe6"),
    (10000, "9a2dd91c7f73ca2542e22b3ee9f63ad9e7fb8679f5021744688e7d92bd8267ba"),
    (15000, "caca63ae9f8a774f0bc4c5391d08c536c38465f42b865dd6b6c8186ce88a88d3"),
    (20000, "2de82840a6e8478966bb196fec2a53f436a9042d8f69baf2f7fff6113dd51859"),
    (25000, "2c54e5949176f3f6a9026b40b8aea1ea562fa8b168f412e02c43324da99bcd42"),
    (30000, "5c0d7fe76c43986c2cadf6890db68de6eb9c3619d8f081934cbad5ada8f6cb2c"),
    (35000, "f0620aced91009b07c55596bcbb1b607c2b5b03129dae19f98f0caf8ef96afe7"),
    (40000, "a1b2d1e9a87ae243249d7b2b3fdc73b2bb725e954296f77e46dc5403b247e5d0"),
    (45000, "16dfd446006f39549fba599c614bfc0106b03fb5cc67757cc4d6b52bb43d89c8"),
    (50000, "b8e17fed3e668304bcc9b692fcf2d736dc8f668492abcbc23a70c4905f99dc8d"),
    (51718, "768d3fd2b3bcd11087108eda200bdd3c7f18d6887029d6878cbd51a4404b85ce"),
    (55000, "a65a6b6b0666952d9beff5c25f058006b552620a0dbaedda25683e08f8d7930d"),
    (57878, "d2e0da2b391044aa0501b8c23030667efeda7b3c0f2cd0db00caa5015fa9e14b"),
    (76118, "2e78d418fcf4ea971987142de0c15778f4c436aad228eab5e96be03c1b1176af"),
    (90000, "4961f45686a719fa79d82e90d4bb9cf8013efb6eb7aa53a431de3fc808c53f4a"),
    (116094, "d6c3c39b77b1355d302edfa96388a6c32f46f412f3829879c609ae4f99d55b9e"),
    (159202, "5b19e9f462f5349623843eb2fc43480c9dec7ec3fff3d90244e7210bc14db4a1"),
    (191892, "3c921318d38293b820072669e4f29fee20857d110af961778b541ae98154953a"),
];

/// Height-ordered (height → block hash) pins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointTable {
    entries: BTreeMap<u32, Hash>,
}

impl CheckpointTable {
    /// Build from (height, hash) pairs; a height may appear only once
    pub fn from_entries<I>(entries: I) -> Result<Self, ParamsError>
    where
        I: IntoIterator<Item = (u32, Hash)>,
    {
        let mut map = BTreeMap::new();
        for (height, hash) in entries {
            if map.insert(height, hash).is_some() {
                return Err(ParamsError::DuplicateCheckpoint(height));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn mainnet() -> Result<Self, ParamsError> {
        let entries = MAINNET_CHECKPOINTS
            .iter()
            .map(|(height, hex)| -> Result<(u32, Hash), ParamsError> {
                Ok((*height, Hash::from_hex(hex)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    pub fn get(&self, height: u32) -> Option<&Hash> {
        self.entries.get(&height)
    }

    /// Highest pin
    pub fn last(&self) -> Option<(u32, &Hash)> {
        self.entries.iter().next_back().map(|(h, hash)| (*h, hash))
    }

    /// Pins in ascending height order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u32, &Hash)> + '_ {
        self.entries.iter().map(|(h, hash)| (*h, hash))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
