//! # CLI Interface
//!
//! Defines the command-line argument structure for `chainlab` using `clap`
//! derive. Supports four subcommands: `chain`, `digest`, `mine`, and
//! `version`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use chainlab::config::{DEFAULT_GENESIS_PAYLOAD, DEFAULT_SUCCESSOR_PAYLOAD};

/// Blockchain teaching simulations in the terminal.
///
/// Shows how editing a block breaks the hash link to the next one, and how
/// proof-of-work mining searches for a nonce.
#[derive(Parser, Debug)]
#[command(
    name = "chainlab",
    about = "Blockchain teaching simulations",
    version,
    propagate_version = true
)]
pub struct ChainlabCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "CHAINLAB_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Log library internals at debug level.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the two-block chain and show it before and after each edit.
    Chain(ChainArgs),
    /// Print the simulation digest of a string.
    Digest(DigestArgs),
    /// Run the proof-of-work miner.
    Mine(MineArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `chain` subcommand.
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Payload of the first block when the chain is built.
    #[arg(long, env = "CHAINLAB_GENESIS", default_value = DEFAULT_GENESIS_PAYLOAD)]
    pub genesis: String,

    /// Payload of the second block.
    #[arg(long, default_value = DEFAULT_SUCCESSOR_PAYLOAD)]
    pub successor: String,

    /// Replacement text for the first block. Repeat to show several edits.
    #[arg(long = "edit", short = 'e')]
    pub edits: Vec<String>,

    /// Emit one JSON object per frame instead of block cards.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Text to digest.
    pub input: String,

    /// Nonce appended to the input before hashing.
    #[arg(long)]
    pub nonce: Option<String>,
}

/// Arguments for the `mine` subcommand.
///
/// Flags override values from `--config`, which override the built-in demo
/// defaults.
#[derive(Args, Debug)]
pub struct MineArgs {
    /// JSON file with a miner configuration.
    #[arg(long, short = 'c', env = "CHAINLAB_MINER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data hashed together with each nonce.
    #[arg(long)]
    pub data: Option<String>,

    /// Hex prefix the digest must start with.
    #[arg(long, env = "CHAINLAB_DIFFICULTY")]
    pub difficulty: Option<String>,

    /// Give up once the nonce goes past this value.
    #[arg(long, env = "CHAINLAB_MAX_NONCE")]
    pub max_nonce: Option<u64>,

    /// Milliseconds between attempts while animating.
    #[arg(long, env = "CHAINLAB_TICK_MS")]
    pub tick_ms: Option<u64>,

    /// Skip the animation and print only the result.
    #[arg(long)]
    pub instant: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}
