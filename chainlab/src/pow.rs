//! # Proof-of-Work Miner
//!
//! The mining animation: keep bumping a nonce, hash `data || nonce`, and stop
//! once the digest starts with the difficulty prefix or the nonce budget runs
//! out.
//!
//! The miner is a plain state machine. It never sleeps or spawns anything;
//! a front-end calls [`Miner::step`] once per animation tick (or
//! [`Miner::run_to_completion`] when it does not animate).
//!
//! ```text
//!          start()            digest has prefix
//!   Idle ──────────► Mining ─────────────────────► Found ──┐
//!    ▲                 │  nonce > max_nonce                 │ start()
//!    │ cancel()        └─────────────────────► Exhausted    │ resets nonce
//!    └─────────────────┘                                    ▼
//!                                                         Mining
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::config::MinerConfig;
use crate::digest::{digest, Digest};
use crate::error::LabError;

/// Where the miner is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MiningStatus {
    /// Not started, or cancelled.
    Idle,
    /// Trying nonces.
    Mining,
    /// The current nonce satisfies the difficulty.
    Found,
    /// The nonce went past the budget without a match.
    Exhausted,
}

/// What one attempt produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MiningStep {
    /// Nonce that was hashed.
    pub nonce: u64,
    /// Digest of `data || nonce`.
    pub digest: Digest,
    /// Status after this attempt.
    pub status: MiningStatus,
}

impl MiningStep {
    /// Whether this attempt found a valid nonce.
    pub fn found(&self) -> bool {
        self.status == MiningStatus::Found
    }

    /// The final outcome, if this attempt ended the run.
    pub fn outcome(&self) -> Option<MiningOutcome> {
        match self.status {
            MiningStatus::Found => Some(MiningOutcome::Found {
                nonce: self.nonce,
                digest: self.digest,
            }),
            MiningStatus::Exhausted => Some(MiningOutcome::Exhausted {
                nonce: self.nonce,
                digest: self.digest,
            }),
            MiningStatus::Idle | MiningStatus::Mining => None,
        }
    }
}

/// Final result of a mining run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MiningOutcome {
    /// `digest` starts with the difficulty prefix.
    Found { nonce: u64, digest: Digest },
    /// Budget spent; `nonce` is the last one tried.
    Exhausted { nonce: u64, digest: Digest },
}

impl MiningOutcome {
    /// Last nonce tried.
    pub fn nonce(&self) -> u64 {
        match self {
            MiningOutcome::Found { nonce, .. } | MiningOutcome::Exhausted { nonce, .. } => *nonce,
        }
    }

    /// Digest for the last nonce tried.
    pub fn digest(&self) -> &Digest {
        match self {
            MiningOutcome::Found { digest, .. } | MiningOutcome::Exhausted { digest, .. } => digest,
        }
    }

    /// Whether the run succeeded.
    pub fn is_found(&self) -> bool {
        matches!(self, MiningOutcome::Found { .. })
    }
}

/// Nonce search over the simulation digest.
#[derive(Clone, Debug)]
pub struct Miner {
    config: MinerConfig,
    nonce: u64,
    status: MiningStatus,
}

impl Miner {
    /// Create an idle miner at nonce 0.
    ///
    /// # Errors
    ///
    /// Whatever [`MinerConfig::validate`] rejects.
    pub fn new(config: MinerConfig) -> Result<Self, LabError> {
        config.validate()?;
        Ok(Self {
            config,
            nonce: 0,
            status: MiningStatus::Idle,
        })
    }

    /// The configuration this miner runs with.
    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Current nonce.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Current status.
    pub fn status(&self) -> MiningStatus {
        self.status
    }

    /// Digest for the current nonce.
    pub fn current_digest(&self) -> Digest {
        nonce_digest(&self.config.data, self.nonce)
    }

    /// Begin (or resume) mining.
    ///
    /// Returns `false` without doing anything if already mining. A run that
    /// previously ended in [`MiningStatus::Found`] starts over from nonce 0;
    /// any other state resumes from the current nonce.
    pub fn start(&mut self) -> bool {
        if self.status == MiningStatus::Mining {
            return false;
        }
        if self.status == MiningStatus::Found {
            self.nonce = 0;
        }
        self.status = MiningStatus::Mining;
        debug!(nonce = self.nonce, difficulty = %self.config.difficulty, "mining started");
        true
    }

    /// Stop mining and go back to idle, keeping the nonce.
    pub fn cancel(&mut self) {
        if self.status == MiningStatus::Mining {
            self.status = MiningStatus::Idle;
            debug!(nonce = self.nonce, "mining cancelled");
        }
    }

    /// Try the next nonce.
    ///
    /// Outside [`MiningStatus::Mining`] this reports the current state
    /// without advancing.
    pub fn step(&mut self) -> MiningStep {
        if self.status != MiningStatus::Mining {
            return MiningStep {
                nonce: self.nonce,
                digest: self.current_digest(),
                status: self.status,
            };
        }

        let Some(next) = self.nonce.checked_add(1) else {
            self.status = MiningStatus::Exhausted;
            info!(nonce = self.nonce, "nonce space exhausted");
            return MiningStep {
                nonce: self.nonce,
                digest: self.current_digest(),
                status: self.status,
            };
        };
        self.nonce = next;
        let digest = self.current_digest();

        if digest.starts_with(&self.config.difficulty) {
            self.status = MiningStatus::Found;
            info!(nonce = self.nonce, digest = %digest, "block mined");
        } else if self.nonce > self.config.max_nonce {
            self.status = MiningStatus::Exhausted;
            info!(nonce = self.nonce, max_nonce = self.config.max_nonce, "nonce budget exhausted");
        }

        MiningStep {
            nonce: self.nonce,
            digest,
            status: self.status,
        }
    }

    /// Mine until a nonce is found or the budget runs out.
    pub fn run_to_completion(&mut self) -> MiningOutcome {
        self.start();
        loop {
            if let Some(outcome) = self.step().outcome() {
                return outcome;
            }
        }
    }
}

/// Digest of `data` salted with the decimal form of `nonce`.
pub fn nonce_digest(data: &str, nonce: u64) -> Digest {
    digest(data, Some(&nonce.to_string()))
}

/// Whether `nonce` is a valid proof of work for `data` at `difficulty`.
pub fn verify_nonce(data: &str, nonce: u64, difficulty: &str) -> bool {
    nonce_digest(data, nonce).starts_with(difficulty)
}
