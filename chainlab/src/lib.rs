// Copyright (c) 2026 Chainlab Contributors. MIT License.
// See LICENSE for details.

//! # Chainlab: Core Library
//!
//! The logic behind two blockchain teaching pages: a pair of linked blocks
//! that turns red when the first one is edited, and a proof-of-work miner
//! that hunts for a nonce. Drawing is somebody else's job; this crate only
//! computes what should be drawn.
//!
//! ## Modules
//!
//! - **digest**: The 64-hex-character simulation digest. Not cryptographic.
//! - **chain**: Records, hash links, tamper detection, and the two-block
//!   demo model.
//! - **pow**: Nonce search against a hex-prefix difficulty.
//! - **config**: Demo constants and the miner configuration.
//! - **error**: [`LabError`](error::LabError) for the few fallible calls.
//!
//! ## Quick Tour
//!
//! ```
//! use chainlab::chain::ChainModel;
//!
//! let model = ChainModel::default();
//! assert!(model.recompute("Transacción A: 50 BTC").is_successor_valid);
//! assert!(model.recompute("Transacción A: 5000 BTC").is_broken());
//! ```

pub mod chain;
pub mod config;
pub mod digest;
pub mod error;
pub mod pow;

pub use chain::{Chain, ChainModel, ChainView};
pub use digest::{digest, Digest};
pub use error::LabError;
pub use pow::{Miner, MiningOutcome};
