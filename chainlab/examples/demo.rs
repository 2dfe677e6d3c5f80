//! Guided terminal walkthrough of both chainlab simulations.
//!
//! Builds a short chain, forges an early record, shows exactly which link
//! breaks, then mines a block at increasing difficulty. The output uses ANSI
//! escape codes for colored, storytelling-style terminal rendering.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use chainlab::chain::{Chain, ChainModel, LinkStatus};
use chainlab::config::{MinerConfig, DEFAULT_GENESIS_PAYLOAD};
use chainlab::pow::Miner;

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(title: &str) {
    println!();
    println!("{BOLD}{CYAN}== {title} =={RESET}");
}

fn print_chain(chain: &Chain) {
    let verification = chain.verify();
    for (i, (record, link)) in chain.records().iter().zip(&verification.links).enumerate() {
        let (color, label) = match link {
            LinkStatus::Genesis => (GREEN, "genesis"),
            LinkStatus::Linked => (GREEN, "linked"),
            LinkStatus::Broken { .. } => (RED, "BROKEN"),
        };
        let digest = chain.record_digest(i).map(|d| d.short(16)).unwrap_or_default();
        println!(
            "  {color}[{i}] {label:<8}{RESET} {:<28} {DIM}{}...{RESET}",
            record.payload, digest
        );
    }
}

fn main() {
    println!("{BOLD}{YELLOW}chainlab walkthrough{RESET}");

    // --- Part 1: the two-block page ---
    section("Two linked blocks");
    let model = ChainModel::default();
    for payload in [DEFAULT_GENESIS_PAYLOAD, "Transacción A: 5000 BTC", DEFAULT_GENESIS_PAYLOAD] {
        let view = model.recompute(payload);
        let status = if view.is_successor_valid {
            format!("{GREEN}valid{RESET}")
        } else {
            format!("{RED}CHAIN BROKEN{RESET}")
        };
        println!("  {:<26} -> {}", payload, status);
    }

    // --- Part 2: a longer chain ---
    section("Forging record 2 of 6");
    let mut chain = Chain::new("alice mints 100");
    for payload in [
        "alice pays bob 30",
        "bob pays carol 10",
        "carol pays dave 5",
        "dave pays erin 2",
        "erin pays frank 1",
    ] {
        chain.append(payload);
    }
    print_chain(&chain);
    println!();
    if let Err(e) = chain.replace_payload(2, "bob pays mallory 10") {
        println!("  {RED}{e}{RESET}");
        return;
    }
    print_chain(&chain);

    // --- Part 3: mining ---
    section("Mining");
    for difficulty in ["0", "00", "000"] {
        let config = MinerConfig {
            difficulty: difficulty.to_string(),
            ..MinerConfig::default()
        };
        let mut miner = match Miner::new(config) {
            Ok(miner) => miner,
            Err(e) => {
                println!("  {RED}{e}{RESET}");
                continue;
            }
        };
        let started = Instant::now();
        let outcome = miner.run_to_completion();
        let verdict = if outcome.is_found() {
            format!("{GREEN}found{RESET}")
        } else {
            format!("{RED}exhausted{RESET}")
        };
        println!(
            "  difficulty {:<4} {} at nonce {:>6} in {:?}  {DIM}{}{RESET}",
            difficulty,
            verdict,
            outcome.nonce(),
            started.elapsed(),
            outcome.digest().short(24)
        );
    }
}
