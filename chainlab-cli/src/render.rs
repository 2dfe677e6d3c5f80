//! # Text Rendering
//!
//! Turns [`ChainView`]s and mining steps into the block cards and status
//! lines printed by the binary. Layout only; every value shown comes from
//! the library.

use chainlab::chain::{ChainModel, ChainView};
use chainlab::pow::{MiningOutcome, MiningStep};

/// Payload characters shown on a card before it is cut off.
const DATA_PREVIEW_CHARS: usize = 30;

/// Hex characters shown for each digest on a card.
const DIGEST_PREVIEW_CHARS: usize = 16;

/// Banner printed under a broken chain.
pub const BROKEN_BANNER: &str = "CHAIN BROKEN (invalid hash)";

/// `text` cut to `max` characters, with `...` appended if anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// One block card.
pub fn render_block(
    number: usize,
    payload: &str,
    previous_digest: &str,
    digest_hex: &str,
    valid: bool,
) -> String {
    let status = if valid { "VALID" } else { "INVALID" };
    let previous: String = previous_digest.chars().take(DIGEST_PREVIEW_CHARS).collect();
    let current: String = digest_hex.chars().take(DIGEST_PREVIEW_CHARS).collect();

    format!(
        "+-- BLOCK {} [{}]\n\
         |  Data      : {}\n\
         |  Prev Hash : {}...\n\
         |  Hash      : {}...\n\
         +--",
        number,
        status,
        truncate(payload, DATA_PREVIEW_CHARS),
        previous,
        current
    )
}

/// Both blocks, the link between them, and the banner when broken.
pub fn render_frame(model: &ChainModel, current_payload: &str, view: &ChainView) -> String {
    let genesis = model.genesis();
    let successor = model.successor();

    let mut out = render_block(
        1,
        current_payload,
        &genesis.previous_digest,
        &view.genesis_digest.to_hex(),
        view.is_genesis_valid(),
    );
    out.push('\n');
    let link = if view.is_successor_valid {
        "   |\n   v  linked"
    } else {
        "   |\n   x  link broken"
    };
    out.push_str(link);
    out.push('\n');
    out.push_str(&render_block(
        2,
        &successor.payload,
        &successor.previous_digest,
        &view.successor_digest.to_hex(),
        view.is_successor_valid,
    ));
    if view.is_broken() {
        out.push('\n');
        out.push_str(BROKEN_BANNER);
    }
    out
}

/// Single-line progress for an animation tick.
pub fn mining_line(step: &MiningStep) -> String {
    format!("Nonce: {:>8}  Hash: {}", step.nonce, step.digest)
}

/// Final message for a mining run.
pub fn mining_summary(outcome: &MiningOutcome) -> String {
    match outcome {
        MiningOutcome::Found { nonce, digest } => {
            format!("BLOCK MINED! (Nonce: {})\nHash: {}", nonce, digest)
        }
        MiningOutcome::Exhausted { nonce, digest } => {
            format!("No valid nonce up to {}.\nHash: {}", nonce.saturating_sub(1), digest)
        }
    }
}
