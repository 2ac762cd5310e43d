//! Seed Node Configuration
//!
//! DNS seeds and the compiled-in fixed seed table used for initial peer
//! discovery. Fixed seeds are handed to the address manager with a synthetic
//! last-seen time between one and two weeks in the past, so a node only
//! leans on them until it has learned fresher peers by gossip.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

/// One week in seconds
pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;

/// DNS seed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

impl DnsSeed {
    pub fn new(name: &str, host: &str) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
        }
    }
}

/// Packed seed record: IPv6 (or IPv4-mapped) address and port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

/// Fixed seed handed to the address manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSeed {
    pub addr: SocketAddr,
    /// Synthetic last-seen time (seconds since Unix epoch)
    pub last_seen: i64,
}

/// Mainnet fixed seeds. Filled by the seed generator before a release.
pub const SEED_TABLE_MAIN: &[SeedSpec6] = &[];

/// Testnet fixed seeds
pub const SEED_TABLE_TEST: &[SeedSpec6] = &[];

/// Expand a packed table into socket addresses with randomized last-seen times
pub fn expand_seed_table<R: Rng + ?Sized>(
    table: &[SeedSpec6],
    now: i64,
    rng: &mut R,
) -> Vec<FixedSeed> {
    table
        .iter()
        .map(|spec| {
            let ip = Ipv6Addr::from(spec.addr);
            let ip = match ip.to_ipv4_mapped() {
                Some(v4) => IpAddr::V4(v4),
                None => IpAddr::V6(ip),
            };
            FixedSeed {
                addr: SocketAddr::new(ip, spec.port),
                last_seen: now - rng.gen_range(0..ONE_WEEK) - ONE_WEEK,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mapped(a: u8, b: u8, c: u8, d: u8, port: u16) -> SeedSpec6 {
        let mut addr = [0u8; 16];
        addr[10] = 0xff;
        addr[11] = 0xff;
        addr[12..].copy_from_slice(&[a, b, c, d]);
        SeedSpec6 { addr, port }
    }

    #[test]
    fn test_ipv4_mapped_seed_becomes_ipv4() {
        let mut rng = StdRng::seed_from_u64(7);
        let seeds = expand_seed_table(&[mapped(10, 0, 0, 1, 26667)], 2_000_000_000, &mut rng);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].addr.to_string(), "10.0.0.1:26667");
    }

    #[test]
    fn test_ipv6_seed_kept() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut addr = [0u8; 16];
        addr[0] = 0x20;
        addr[1] = 0x01;
        addr[15] = 0x01;
        let seeds = expand_seed_table(&[SeedSpec6 { addr, port: 16667 }], 0, &mut rng);
        assert_eq!(seeds[0].addr.to_string(), "[2001::1]:16667");
    }

    #[test]
    fn test_last_seen_between_one_and_two_weeks() {
        let now = 1_700_000_000;
        let mut rng = StdRng::seed_from_u64(42);
        let table: Vec<SeedSpec6> = (0..200).map(|i| mapped(192, 168, 0, i as u8, 26667)).collect();

        for seed in expand_seed_table(&table, now, &mut rng) {
            let age = now - seed.last_seen;
            assert!(age >= ONE_WEEK, "seed too fresh: {}", age);
            assert!(age < 2 * ONE_WEEK, "seed too stale: {}", age);
        }
    }
}
