//! Per-network consensus parameters
//!
//! Main is written out in full. Testnet is derived from Main and Regtest from
//! Testnet by copying the parent value and overriding a fixed set of fields,
//! so each variant stays an ordinary, independently inspectable value.

use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::checkpoints::CheckpointTable;
use crate::consensus::{Block, Target};
use crate::crypto::Hash;
use super::genesis::GenesisSpec;
use super::seeds::{expand_seed_table, DnsSeed, FixedSeed, SEED_TABLE_MAIN, SEED_TABLE_TEST};
use super::{NetworkVariant, ParamsError};

const MAIN_ALERT_PUBKEY: &str = "04570b1f958d27475d9f8d3a01dcb515da31deffe9fe83e20dfff9d3014ff195ac6d6bdea089c31b1477092879257d682fb2394f2536bf2dd92c09cd6e7a13d336";
const TESTNET_ALERT_PUBKEY: &str = "04554f17a7d120239ce82c375efe544dc3d4a0f1e28337841732e052d9a5dca0ce276496e1f468eb9e866fe014d220e6ecd69e50c09fa705cf1ad0b3c148ff18c4";

const GENESIS_MERKLE_ROOT: &str = "03a08719de74ac48559e57007342c2c71beda542df15c687dd4c78e6ff322ff1";
const MAIN_GENESIS_HASH: &str = "00000172a7e27a0c53a9c6fd4d322aa3150bb74dc2669b8a41e76b09eb8befe6";
const TESTNET_GENESIS_HASH: &str = "0000bde475eff44f3279af2d6462b692619688f6ab5719574139070b828ba088";
const REGTEST_GENESIS_HASH: &str = "6c80deb3a4d673f8e8cb5768ae60195bf107b451ea4608e96db72e0174eb0253";

/// Text-encoding domains for addresses and keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

/// Version prefixes per encoding domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPrefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl AddressPrefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

/// Immutable consensus parameters of one network variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParameters {
    pub variant: NetworkVariant,
    /// Message-start bytes framing every wire message
    pub magic: [u8; 4],
    pub alert_pubkey: Vec<u8>,
    pub default_port: u16,
    pub rpc_port: u16,
    /// Easiest admissible proof-of-work target
    pub pow_limit: Target,
    pub genesis: GenesisSpec,
    pub address_prefixes: AddressPrefixes,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<FixedSeed>,
    /// Last height accepting proof-of-work blocks
    pub last_pow_block_height: u32,
    pub min_staking_confirmations_before_superblock: u32,
    pub data_dir: String,
    pub require_rpc_password: bool,
    /// Hardened (height, hash) pins
    pub checkpoints: CheckpointTable,
}

impl NetworkParameters {
    /// Build and validate the parameters of one variant using the wall clock
    pub fn for_variant(variant: NetworkVariant) -> Result<Self, ParamsError> {
        Self::for_variant_at(variant, chrono::Utc::now().timestamp(), &mut rand::thread_rng())
    }

    /// Build and validate with an explicit clock and randomness source
    pub fn for_variant_at<R: Rng + ?Sized>(
        variant: NetworkVariant,
        now: i64,
        rng: &mut R,
    ) -> Result<Self, ParamsError> {
        let main = main_params(now, rng)?;
        let params = match variant {
            NetworkVariant::Main => main,
            NetworkVariant::Testnet => derive_testnet(&main, now, rng)?,
            NetworkVariant::Regtest => derive_regtest(&derive_testnet(&main, now, rng)?)?,
        };
        params.validate()?;
        Ok(params)
    }

    /// Rebuild the genesis block and check it against the expected constants
    pub fn validate(&self) -> Result<Block, ParamsError> {
        let block = self.genesis.validate(self.variant)?;
        if block.header.bits != self.pow_limit.to_compact() {
            return Err(ParamsError::GenesisBitsMismatch {
                variant: self.variant,
                bits: block.header.bits,
                expected: self.pow_limit.to_compact(),
            });
        }
        Ok(block)
    }

    /// Genesis hash; equal to the computed hash once `validate` has passed
    pub fn genesis_hash(&self) -> Hash {
        self.genesis.expected_hash
    }

    pub fn genesis_block(&self) -> Result<Block, ParamsError> {
        self.genesis.build()
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.address_prefixes.get(kind)
    }

    /// Base58Check-encode `payload` in the domain of `kind`
    pub fn encode_base58_check(&self, kind: Base58Type, payload: &[u8]) -> String {
        let prefix = self.base58_prefix(kind);
        let mut data = Vec::with_capacity(prefix.len() + payload.len());
        data.extend_from_slice(prefix);
        data.extend_from_slice(payload);
        bs58::encode(data).with_check().into_string()
    }
}

fn main_params<R: Rng + ?Sized>(now: i64, rng: &mut R) -> Result<NetworkParameters, ParamsError> {
    let pow_limit = Target::limit(20);

    Ok(NetworkParameters {
        variant: NetworkVariant::Main,
        magic: [0x3f, 0x4c, 0xbe, 0xd4],
        alert_pubkey: hex::decode(MAIN_ALERT_PUBKEY)?,
        default_port: 26667,
        rpc_port: 26668,
        pow_limit,
        genesis: GenesisSpec {
            version: 1,
            time: 1524046794,
            bits: pow_limit.to_compact(),
            nonce: 3386701,
            expected_hash: Hash::from_hex(MAIN_GENESIS_HASH)?,
            expected_merkle_root: Hash::from_hex(GENESIS_MERKLE_ROOT)?,
        },
        address_prefixes: AddressPrefixes {
            pubkey_address: vec![48],  // L
            script_address: vec![125], // s
            secret_key: vec![45],
            ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
            ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
        },
        dns_seeds: vec![
            DnsSeed::new("seed1", "seed1.labhcoin.com"),
            DnsSeed::new("seed2", "seed2.labhcoin.com"),
        ],
        fixed_seeds: expand_seed_table(SEED_TABLE_MAIN, now, rng),
        last_pow_block_height: 5000,
        min_staking_confirmations_before_superblock: 10,
        data_dir: NetworkVariant::Main.data_dir().to_string(),
        require_rpc_password: true,
        checkpoints: CheckpointTable::mainnet()?,
    })
}

/// Testnet: Main with its own magic, ports, keys, prefixes and an easier limit
pub fn derive_testnet<R: Rng + ?Sized>(
    main: &NetworkParameters,
    now: i64,
    rng: &mut R,
) -> Result<NetworkParameters, ParamsError> {
    let mut params = main.clone();
    params.variant = NetworkVariant::Testnet;
    params.magic = [0x76, 0x3d, 0xa9, 0x74];
    params.pow_limit = Target::limit(16);
    params.alert_pubkey = hex::decode(TESTNET_ALERT_PUBKEY)?;
    params.default_port = 16667;
    params.rpc_port = 16668;
    params.data_dir = NetworkVariant::Testnet.data_dir().to_string();

    params.genesis.bits = params.pow_limit.to_compact();
    params.genesis.nonce = 452629;
    params.genesis.expected_hash = Hash::from_hex(TESTNET_GENESIS_HASH)?;

    params.dns_seeds.clear();
    params.fixed_seeds = expand_seed_table(SEED_TABLE_TEST, now, rng);

    params.address_prefixes = AddressPrefixes {
        pubkey_address: vec![127], // t
        script_address: vec![125], // s
        secret_key: vec![107],
        ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
        ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
    };

    params.last_pow_block_height = 0x7fff_ffff;
    params.min_staking_confirmations_before_superblock = 2;
    params.checkpoints = CheckpointTable::default();
    Ok(params)
}

/// Regtest: Testnet with a trivial limit, a fresh genesis time/nonce and no DNS seeds
pub fn derive_regtest(testnet: &NetworkParameters) -> Result<NetworkParameters, ParamsError> {
    let mut params = testnet.clone();
    params.variant = NetworkVariant::Regtest;
    params.magic = [0x9c, 0x4b, 0x5f, 0xa9];
    params.pow_limit = Target::limit(1);
    params.default_port = 18444;
    params.data_dir = NetworkVariant::Regtest.data_dir().to_string();
    params.require_rpc_password = false;

    params.genesis.time = 1411111111;
    params.genesis.bits = params.pow_limit.to_compact();
    params.genesis.nonce = 196647;
    params.genesis.expected_hash = Hash::from_hex(REGTEST_GENESIS_HASH)?;

    params.dns_seeds.clear();
    params.checkpoints = CheckpointTable::default();
    Ok(params)
}
