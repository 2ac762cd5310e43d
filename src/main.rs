//! LABH node bootstrap
//!
//! Resolves the network variant from config and flags, validates every
//! parameter set, seeds a block index with the genesis block and runs the
//! checkpoint guard self-check before anything touches the network.

use anyhow::{Context, Result};
use clap::Parser;
use labh_core::chainparams::{NetworkParameters, NetworkVariant, ParamsRegistry};
use labh_core::checkpoints::{BlockIndexView, CheckpointGuard};
use labh_core::config::NodeConfig;
use labh_core::constants::CHAIN_NAME;
use labh_core::storage::BlockIndex;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "labh-node", version, about = "LABH node bootstrap")]
struct Cli {
    /// Use the public test network
    #[arg(long)]
    testnet: bool,

    /// Use the local regression-test network
    #[arg(long)]
    regtest: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the selected network summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct NetworkSummary<'a> {
    chain: &'static str,
    network: NetworkVariant,
    magic: String,
    default_port: u16,
    rpc_port: u16,
    genesis_hash: String,
    pow_limit_bits: String,
    last_pow_block_height: u32,
    dns_seeds: Vec<&'a str>,
    fixed_seeds: usize,
    checkpoints: usize,
    total_checkpointed_height: u32,
    sync_checkpoint_height: u32,
}

fn init_tracing(config: &NodeConfig) {
    let filter = std::env::var("LABH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .or_else(|| config.log_filter.clone())
        .unwrap_or_else(|| "info".into());
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn load_config(cli: &Cli) -> Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => NodeConfig::default(),
    };
    config.merge_flags(cli.testnet, cli.regtest);
    Ok(config)
}

/// Seed an index with genesis and run both guard checks against it
fn self_check<'a>(params: &'a NetworkParameters, guard: &CheckpointGuard<'_>) -> Result<NetworkSummary<'a>> {
    let genesis = params.validate().context("genesis validation")?;
    let genesis_hash = genesis.hash()?;

    let mut index = BlockIndex::new();
    let tip = index.insert_genesis(genesis_hash)?;

    anyhow::ensure!(
        guard.check_hardened(0, &genesis_hash),
        "genesis {} contradicts the hardened checkpoint at height 0",
        genesis_hash
    );
    let sync = guard.auto_select_sync_checkpoint(&index, tip);

    Ok(NetworkSummary {
        chain: CHAIN_NAME,
        network: params.variant,
        magic: hex::encode(params.magic),
        default_port: params.default_port,
        rpc_port: params.rpc_port,
        genesis_hash: genesis_hash.to_hex(),
        pow_limit_bits: format!("0x{:08x}", params.pow_limit.to_compact()),
        last_pow_block_height: params.last_pow_block_height,
        dns_seeds: params.dns_seeds.iter().map(|s| s.host.as_str()).collect(),
        fixed_seeds: params.fixed_seeds.len(),
        checkpoints: params.checkpoints.len(),
        total_checkpointed_height: guard.total_checkpointed_height(),
        sync_checkpoint_height: index.height(sync),
    })
}

fn run(cli: Cli, config: NodeConfig) -> Result<()> {
    let variant = config.variant()?;

    let mut registry = ParamsRegistry::build().context("building network parameters")?;
    registry.select(variant);
    let registry = registry.into_shared();
    let params = registry.active();

    let guard = CheckpointGuard::new(params);
    let summary = self_check(params, &guard)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(
            chain = summary.chain,
            network = %summary.network,
            magic = %summary.magic,
            port = summary.default_port,
            rpc_port = summary.rpc_port,
            "network parameters ready"
        );
        info!(
            genesis = %summary.genesis_hash,
            pow_limit = %summary.pow_limit_bits,
            last_pow_block = summary.last_pow_block_height,
            "genesis validated"
        );
        info!(
            checkpoints = summary.checkpoints,
            checkpointed_height = summary.total_checkpointed_height,
            sync_checkpoint = summary.sync_checkpoint_height,
            span = guard.span(),
            "checkpoint guard ready"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("labh-node: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("startup aborted: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
