//! Property-based and adversarial tests for the LABH checkpoint guard
//!
//! These tests verify the reorg horizon and hardened pins hold under random
//! chain shapes and attack scenarios.

mod common;

use common::{block_hash, extend_branch, linear_chain};
use labh_core::chainparams::{NetworkParameters, NetworkVariant};
use labh_core::checkpoints::{BlockIndexView, CheckpointGuard, CheckpointTable};
use labh_core::crypto::Hash;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn params(variant: NetworkVariant) -> NetworkParameters {
    NetworkParameters::for_variant_at(variant, 1_700_000_000, &mut StdRng::seed_from_u64(3)).unwrap()
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The sync checkpoint sits exactly `span` below the tip, or at the root
    #[test]
    fn prop_sync_checkpoint_depth(
        tip_height in 0u32..1500,
        span in 1u32..700,
    ) {
        let (index, tip) = linear_chain(tip_height);
        let table = CheckpointTable::default();
        let guard = CheckpointGuard::with_table(&table).with_span(span);

        let sync = guard.auto_select_sync_checkpoint(&index, tip);
        prop_assert_eq!(index.height(sync), tip_height.saturating_sub(span));
    }

    /// check_sync splits heights exactly at the sync checkpoint
    #[test]
    fn prop_check_sync_is_threshold(
        tip_height in 0u32..1200,
        height in 0u32..1500,
    ) {
        let (index, tip) = linear_chain(tip_height);
        let table = CheckpointTable::default();
        let guard = CheckpointGuard::with_table(&table);
        let sync_height = index.height(guard.auto_select_sync_checkpoint(&index, tip));

        prop_assert_eq!(guard.check_sync(height, &index, tip), height > sync_height);
    }

    /// Unpinned heights never constrain a block
    #[test]
    fn prop_unpinned_heights_accept_anything(
        height in 0u32..250_000,
        bytes in any::<[u8; 32]>(),
    ) {
        let main = params(NetworkVariant::Main);
        let guard = CheckpointGuard::new(&main);
        prop_assume!(main.checkpoints.get(height).is_none());
        prop_assert!(guard.check_hardened(height, &Hash(bytes)));
    }

    /// Pinned heights accept only their pinned hash
    #[test]
    fn prop_pinned_heights_reject_other_hashes(
        pick in 0usize..18,
        bytes in any::<[u8; 32]>(),
    ) {
        let main = params(NetworkVariant::Main);
        let guard = CheckpointGuard::new(&main);
        let (height, pinned) = main.checkpoints.iter().nth(pick).unwrap();
        prop_assume!(Hash(bytes) != *pinned);
        prop_assert!(!guard.check_hardened(height, &Hash(bytes)));
        prop_assert!(guard.check_hardened(height, pinned));
    }
}

// ============================================================================
// ADVERSARIAL TESTS
// ============================================================================

/// Test: Deep reorg refused
///
/// An attacker offers a branch forking 600 blocks below a 1000-block tip.
/// The fork point is below the sync checkpoint, so the reorg target fails.
#[test]
fn test_deep_reorg_rejected() {
    let (index, tip) = linear_chain(1000);
    let table = CheckpointTable::default();
    let guard = CheckpointGuard::with_table(&table);

    // First block of the attacking branch
    let fork_height = 400;
    assert!(!guard.check_sync(fork_height + 1, &index, tip));
    assert!(!guard.check_sync(500, &index, tip));
}

/// Test: Shallow reorg allowed
///
/// A competing branch forking 100 blocks below the tip stays above the horizon.
#[test]
fn test_shallow_reorg_allowed() {
    let (mut index, tip) = linear_chain(1000);
    let table = CheckpointTable::default();
    let guard = CheckpointGuard::with_table(&table);

    let fork_point = index.lookup(&block_hash(0, 900)).unwrap();
    let attacker_tip = extend_branch(&mut index, fork_point, 1, 150);
    assert_eq!(index.height(attacker_tip), 1050);

    // Horizon is measured against the honest tip handed in by the caller
    assert!(guard.check_sync(901, &index, tip));
}

/// Test: Horizon follows the tip passed in, not a cached value
#[test]
fn test_horizon_recomputed_per_call() {
    let (mut index, tip) = linear_chain(600);
    let table = CheckpointTable::default();
    let guard = CheckpointGuard::with_table(&table);
    assert!(guard.check_sync(150, &index, tip));

    let new_tip = extend_branch(&mut index, tip, 0, 100);
    assert!(!guard.check_sync(150, &index, new_tip));
    assert!(guard.check_sync(201, &index, new_tip));
}

/// Test: Hardened pin beats claimed work
///
/// A block at a pinned height with any other hash is rejected outright.
#[test]
fn test_conflicting_pin_rejected() {
    let main = params(NetworkVariant::Main);
    let guard = CheckpointGuard::new(&main);
    let forged = Hash::from_hex("00000000000000000000000000000000000000000000000000000000deadbeef").unwrap();
    assert!(!guard.check_hardened(10000, &forged));
    assert!(!guard.check_hardened(0, &forged));
}
