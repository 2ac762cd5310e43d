//! Registry selection and end-to-end startup scenarios

mod common;

use common::linear_chain;
use labh_core::chainparams::{NetworkVariant, ParamsError, ParamsRegistry};
use labh_core::checkpoints::{BlockIndexView, CheckpointGuard};
use labh_core::config::{ConfigError, NodeConfig};
use labh_core::consensus::check_proof_of_work;
use labh_core::crypto::Hash;
use labh_core::storage::BlockIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAIN_GENESIS: &str = "00000172a7e27a0c53a9c6fd4d322aa3150bb74dc2669b8a41e76b09eb8befe6";
const TESTNET_GENESIS: &str = "0000bde475eff44f3279af2d6462b692619688f6ab5719574139070b828ba088";
const REGTEST_GENESIS: &str = "6c80deb3a4d673f8e8cb5768ae60195bf107b451ea4608e96db72e0174eb0253";
const MERKLE_ROOT: &str = "03a08719de74ac48559e57007342c2c71beda542df15c687dd4c78e6ff322ff1";

fn registry() -> ParamsRegistry {
    ParamsRegistry::build_at(1_700_000_000, &mut StdRng::seed_from_u64(11)).unwrap()
}

#[test]
fn test_genesis_constants_per_variant() {
    let registry = registry();
    for (variant, expected) in [
        (NetworkVariant::Main, MAIN_GENESIS),
        (NetworkVariant::Testnet, TESTNET_GENESIS),
        (NetworkVariant::Regtest, REGTEST_GENESIS),
    ] {
        let params = registry.get(variant);
        let block = params.validate().unwrap();
        assert_eq!(block.hash().unwrap().to_hex(), expected, "{}", variant);
        assert_eq!(block.header.merkle_root.to_hex(), MERKLE_ROOT, "{}", variant);
        assert!(check_proof_of_work(&block.hash().unwrap(), block.header.bits, &params.pow_limit));
    }
}

#[test]
fn test_main_genesis_is_first_checkpoint() {
    let registry = registry();
    let main = registry.get(NetworkVariant::Main);
    let guard = CheckpointGuard::new(main);
    assert!(guard.check_hardened(0, &main.genesis_hash()));
    assert!(!guard.check_hardened(0, &registry.get(NetworkVariant::Testnet).genesis_hash()));
}

#[test]
fn test_main_hardened_table() {
    let registry = registry();
    let main = registry.get(NetworkVariant::Main);
    let guard = CheckpointGuard::new(main);

    for (height, hash) in main.checkpoints.iter() {
        assert!(guard.check_hardened(height, hash));
    }

    let pinned = Hash::from_hex("9a2dd91c7f73ca2542e22b3ee9f63ad9e7fb8679f5021744688e7d92bd8267ba").unwrap();
    assert!(guard.check_hardened(10000, &pinned));
    assert!(!guard.check_hardened(10000, &Hash::zero()));
    assert!(guard.check_hardened(12345, &Hash::zero()));
    assert_eq!(guard.total_checkpointed_height(), 191892);
}

#[test]
fn test_test_networks_have_no_pins() {
    let registry = registry();
    for variant in [NetworkVariant::Testnet, NetworkVariant::Regtest] {
        let guard = CheckpointGuard::new(registry.get(variant));
        assert_eq!(guard.total_checkpointed_height(), 0);
        assert!(guard.check_hardened(0, &Hash::zero()));
        assert!(guard.check_hardened(10000, &Hash::zero()));
        assert!(guard.last_checkpoint_block(&linear_chain(10).0).is_none());
    }
}

#[test]
fn test_last_checkpoint_block_on_main() {
    let registry = registry();
    let main = registry.get(NetworkVariant::Main);
    let guard = CheckpointGuard::new(main);

    let mut index = BlockIndex::new();
    assert!(guard.last_checkpoint_block(&index).is_none());

    let genesis = index.insert_genesis(main.genesis_hash()).unwrap();
    assert_eq!(guard.last_checkpoint_block(&index), Some(genesis));
}

#[test]
fn test_select_from_config_flags() {
    let mut registry = registry();
    assert!(matches!(
        registry.select_from_config(true, true),
        Err(ConfigError::ConflictingNetworkFlags)
    ));
    registry.select_from_config(false, false).unwrap();
    assert_eq!(registry.active().variant, NetworkVariant::Main);
    registry.select_from_config(false, true).unwrap();
    assert_eq!(registry.active().variant, NetworkVariant::Regtest);
}

#[test]
fn test_active_is_idempotent() {
    let mut registry = registry();
    registry.select(NetworkVariant::Testnet);
    let first = registry.active();
    let second = registry.active();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_variant_id_is_fatal() {
    let err = NetworkVariant::try_from(7).unwrap_err();
    assert!(matches!(err, ParamsError::UnknownVariant(7)));
    assert!(err.is_fatal());
}

#[test]
fn test_config_file_drives_selection() {
    let mut config = NodeConfig::from_toml_str("[network]\nregtest = true\n").unwrap();
    config.merge_flags(false, false);

    let mut registry = registry();
    registry.select(config.variant().unwrap());
    assert_eq!(registry.active_variant(), NetworkVariant::Regtest);
}

/// Regtest startup: genesis checks out, no pins, and a single-block chain
/// accepts height 1
#[test]
fn test_regtest_end_to_end() {
    let mut registry = registry();
    registry.select_from_config(false, true).unwrap();
    let params = registry.active();

    assert_eq!(params.genesis_hash().to_hex(), REGTEST_GENESIS);
    assert!(params.checkpoints.is_empty());

    let genesis = params.validate().unwrap();
    let mut index = BlockIndex::new();
    let tip = index.insert_genesis(genesis.hash().unwrap()).unwrap();

    let guard = CheckpointGuard::new(params);
    assert_eq!(index.height(guard.auto_select_sync_checkpoint(&index, tip)), 0);
    assert!(guard.check_sync(1, &index, tip));
    assert!(!guard.check_sync(0, &index, tip));
}
