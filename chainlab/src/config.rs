//! # Simulation Configuration & Constants
//!
//! Every fixed value the simulations depend on lives here: the sentinel that
//! anchors the genesis record, the demo payloads, and the proof-of-work
//! parameters. The pages that embed these simulations print some of them
//! verbatim, so changing one changes what learners see.

use std::time::Duration;

use serde::Deserialize;

use crate::error::LabError;

// ---------------------------------------------------------------------------
// Digest Parameters
// ---------------------------------------------------------------------------

/// Length of every digest in hexadecimal characters.
pub const DIGEST_HEX_LENGTH: usize = 64;

/// Length of every digest in raw bytes.
pub const DIGEST_BYTE_LENGTH: usize = DIGEST_HEX_LENGTH / 2;

/// Digest returned for empty hashed material.
pub const EMPTY_DIGEST_HEX: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

// ---------------------------------------------------------------------------
// Chain Demo
// ---------------------------------------------------------------------------

/// Predecessor reference of the genesis record. It has no predecessor, so it
/// points at this placeholder instead.
pub const SENTINEL: &str = "00000000000000000000000000000000";

/// Initial payload of the first block in the linkage demo.
pub const DEFAULT_GENESIS_PAYLOAD: &str = "Transacción A: 50 BTC";

/// Payload of the second block in the linkage demo. Never edited.
pub const DEFAULT_SUCCESSOR_PAYLOAD: &str = "Transacción B: 10 BTC";

// ---------------------------------------------------------------------------
// Proof of Work Demo
// ---------------------------------------------------------------------------

/// Data the mining demo hashes with each candidate nonce.
pub const POW_DATA: &str = "Transacciones Merkle Root";

/// Prefix a mined digest must start with.
pub const POW_DIFFICULTY: &str = "0000";

/// Nonce budget. Mining gives up once the nonce goes past this value.
pub const POW_MAX_NONCE: u64 = 100_000;

/// Delay between two mining attempts in the animated front-end.
pub const MINING_TICK: Duration = Duration::from_millis(10);

/// [`MINING_TICK`] in milliseconds, for flags and config files.
pub const MINING_TICK_MS: u64 = 10;

// ---------------------------------------------------------------------------
// MinerConfig
// ---------------------------------------------------------------------------

/// Runtime parameters of a [`Miner`](crate::pow::Miner).
///
/// Deserializable so front-ends can load it from a JSON file; every field
/// falls back to the demo constants above.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Base data hashed with every nonce.
    pub data: String,
    /// Hex prefix the digest must start with.
    pub difficulty: String,
    /// Largest nonce tried before giving up.
    pub max_nonce: u64,
    /// Animation delay between attempts, in milliseconds.
    pub tick_ms: u64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            data: POW_DATA.to_string(),
            difficulty: POW_DIFFICULTY.to_string(),
            max_nonce: POW_MAX_NONCE,
            tick_ms: MINING_TICK_MS,
        }
    }
}

impl MinerConfig {
    /// Check that the configuration can ever be satisfied by a digest.
    ///
    /// # Errors
    ///
    /// - [`LabError::InvalidDifficulty`] if the prefix is longer than a digest
    ///   or holds anything other than lowercase hex digits.
    /// - [`LabError::InvalidConfig`] if `max_nonce` is zero.
    pub fn validate(&self) -> Result<(), LabError> {
        if self.difficulty.len() > DIGEST_HEX_LENGTH {
            return Err(LabError::InvalidDifficulty(format!(
                "prefix has {} characters, digests only have {}",
                self.difficulty.len(),
                DIGEST_HEX_LENGTH
            )));
        }
        if let Some(bad) = self
            .difficulty
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(LabError::InvalidDifficulty(format!(
                "'{}' is not a lowercase hex digit",
                bad
            )));
        }
        if self.max_nonce == 0 {
            return Err(LabError::InvalidConfig(
                "max_nonce must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Tick delay as a [`Duration`].
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Parse a JSON document into a validated config.
    pub fn from_json(json: &str) -> Result<Self, LabError> {
        let config: MinerConfig =
            serde_json::from_str(json).map_err(|e| LabError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
