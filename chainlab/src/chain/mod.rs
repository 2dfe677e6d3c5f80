//! # Chain Module
//!
//! The hash-chaining protocol behind the linked-blocks demo.
//!
//! ## Architecture
//!
//! ```text
//! record.rs: Record, the N-record Chain, and link-by-link verification
//! model.rs : ChainModel, the two-record demo state and its recompute()
//! ```
//!
//! ## Linkage Rule
//!
//! A record's digest covers `payload || previous_digest`. Record `i > 0` is
//! linked when the digest of record `i - 1` equals the `previous_digest`
//! stored in record `i`. The genesis record has no predecessor; it stores the
//! [`SENTINEL`](crate::config::SENTINEL) and is always valid.
//!
//! A `previous_digest` is captured once, when its record is created, and is
//! never refreshed afterwards. Editing an earlier payload therefore leaves a
//! stale reference behind, and that stale reference is what verification
//! reports as a broken link. Refreshing it on every redraw would make every
//! edit look valid.

pub mod model;
pub mod record;

pub use model::{ChainModel, ChainView};
pub use record::{Chain, ChainVerification, LinkStatus, Record};
