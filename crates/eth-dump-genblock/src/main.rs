//! # eth-dump-genblock
//!
//! Reads a genesis configuration file, commits the genesis block it
//! describes against a fresh in-memory store, and prints the block to
//! stdout in `eth_getBlockByNumber` JSON shape.
//!
//! ## Pipeline
//!
//! 1. Read the file named by the single positional argument
//! 2. Parse it as a genesis config
//! 3. Commit: state trie from the alloc, header from the config and forks
//! 4. Marshal to RPC JSON and print with two-space indentation
//!
//! Any failure goes to stderr and the process exits non-zero; stdout only
//! ever carries the block JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use genblock_core::{commit, GenesisConfig};
use genblock_rpc::RpcBlock;
use genblock_state::MemoryStore;

fn cli() -> Command {
    Command::new("eth-dump-genblock")
        .about("Dump the genesis block derived from a genesis configuration file")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("genesis-file")
                .help("Path to the genesis configuration JSON file")
                .value_name("GENESIS_FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // Diagnostics go to stderr; stdout is reserved for the block JSON.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(genesis_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(genesis_path)
        .context("Failed to read genesis config file")?;

    let genesis: GenesisConfig =
        serde_json::from_str(&raw).context("Failed to parse genesis config")?;
    debug!(
        path = %genesis_path.display(),
        accounts = genesis.alloc.len(),
        "genesis config loaded"
    );

    let store = MemoryStore::new();
    let block = commit(&genesis, &store).context("Failed to create genesis block")?;

    let rendered = RpcBlock::from_genesis(&block)
        .to_pretty_json()
        .context("Failed to convert block to JSON")?;

    println!("{rendered}");
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbosity"));

    // required arg, present whenever get_matches returns
    let Some(genesis_path) = matches.get_one::<PathBuf>("genesis-file") else {
        return ExitCode::FAILURE;
    };

    if let Err(err) = run(genesis_path) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
