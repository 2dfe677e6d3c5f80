// Copyright (c) 2026 Chainlab Contributors. MIT License.
// See LICENSE for details.

//! # Chainlab CLI
//!
//! Entry point for the `chainlab` binary. Parses CLI arguments, initializes
//! logging, and runs one of the simulations against the library.
//!
//! The binary supports four subcommands:
//!
//! - `chain`: build the two-block chain and show it after each edit
//! - `digest`: print the simulation digest of a string
//! - `mine`: run the proof-of-work miner, animated or instant
//! - `version`: print build version information

mod cli;
mod logging;
mod render;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::signal;

use chainlab::chain::{ChainModel, ChainView};
use chainlab::config::MinerConfig;
use chainlab::digest::digest;
use chainlab::pow::{Miner, MiningOutcome, MiningStatus};

use cli::{ChainlabCli, Commands};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ChainlabCli::parse();

    logging::init_logging(
        logging::default_directives(cli.verbose),
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Chain(args) => run_chain(args),
        Commands::Digest(args) => {
            println!("{}", digest(&args.input, args.nonce.as_deref()));
            Ok(())
        }
        Commands::Mine(args) => run_mine(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// One rendered state of the chain demo, as emitted with `--json`.
#[derive(Serialize)]
struct Frame<'a> {
    payload: &'a str,
    #[serde(flatten)]
    view: &'a ChainView,
}

/// Builds the chain once, then recomputes for the initial payload and for
/// every `--edit`, in order.
fn run_chain(args: cli::ChainArgs) -> Result<()> {
    let model = ChainModel::new(args.genesis.as_str(), args.successor.as_str());
    tracing::info!(
        genesis = %args.genesis,
        edits = args.edits.len(),
        "chain built"
    );

    let payloads = std::iter::once(args.genesis.as_str())
        .chain(args.edits.iter().map(String::as_str));
    for (i, payload) in payloads.enumerate() {
        let view = model.recompute(payload);
        if args.json {
            let line = serde_json::to_string(&Frame { payload, view: &view })
                .context("failed to serialize chain frame")?;
            println!("{}", line);
        } else {
            if i > 0 {
                println!();
            }
            println!("{}", render::render_frame(&model, payload, &view));
        }
    }
    Ok(())
}

/// Resolves the miner configuration: defaults, then the config file, then
/// individual flags.
fn miner_config(args: &cli::MineArgs) -> Result<MinerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read miner config {}", path.display()))?;
            MinerConfig::from_json(&json)
                .with_context(|| format!("invalid miner config {}", path.display()))?
        }
        None => MinerConfig::default(),
    };

    if let Some(data) = &args.data {
        config.data = data.clone();
    }
    if let Some(difficulty) = &args.difficulty {
        config.difficulty = difficulty.clone();
    }
    if let Some(max_nonce) = args.max_nonce {
        config.max_nonce = max_nonce;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }
    Ok(config)
}

/// Runs the miner, one attempt per tick unless `--instant` (or a zero tick)
/// is requested. Ctrl+C stops an animated run and reports the last nonce.
async fn run_mine(args: cli::MineArgs) -> Result<()> {
    let config = miner_config(&args)?;
    let mut miner = Miner::new(config).context("cannot start miner")?;
    let tick = miner.config().tick();

    tracing::info!(
        data = %miner.config().data,
        difficulty = %miner.config().difficulty,
        max_nonce = miner.config().max_nonce,
        "mining"
    );

    let outcome = if args.instant || tick.is_zero() {
        Some(miner.run_to_completion())
    } else {
        animate(&mut miner, tick, !args.json).await?
    };

    match outcome {
        Some(outcome) if args.json => {
            println!(
                "{}",
                serde_json::to_string(&outcome).context("failed to serialize mining outcome")?
            );
        }
        Some(outcome) => println!("{}", render::mining_summary(&outcome)),
        None => {
            tracing::warn!(nonce = miner.nonce(), "mining interrupted");
            println!("Mining stopped at nonce {}.", miner.nonce());
        }
    }
    Ok(())
}

/// Steps the miner on every tick of a tokio interval until it finishes or a
/// shutdown signal arrives. Returns `None` when interrupted.
async fn animate(
    miner: &mut Miner,
    tick: std::time::Duration,
    show_progress: bool,
) -> Result<Option<MiningOutcome>> {
    let mut interval = tokio::time::interval(tick);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    miner.start();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let step = miner.step();
                if show_progress {
                    write!(stdout, "\r{}", render::mining_line(&step))?;
                    stdout.flush()?;
                }
                if step.status != MiningStatus::Mining {
                    if show_progress {
                        writeln!(stdout)?;
                    }
                    return Ok(step.outcome());
                }
            }
            _ = &mut shutdown => {
                miner.cancel();
                if show_progress {
                    writeln!(stdout)?;
                }
                return Ok(None);
            }
        }
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("chainlab {}", env!("CARGO_PKG_VERSION"));
    println!("rustc    {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
