//! # Two-Block Demo Model
//!
//! The state behind the linked-blocks page: a genesis record whose payload
//! the learner edits, and a successor record that remembers what the genesis
//! digest was when it was created.
//!
//! The model is built once. Every edit calls [`ChainModel::recompute`] with
//! the whole current payload and redraws from the returned [`ChainView`].
//! `recompute` takes `&self`, so nothing about an earlier edit can leak into
//! a later one.

use serde::Serialize;
use tracing::debug;

use crate::config::{DEFAULT_GENESIS_PAYLOAD, DEFAULT_SUCCESSOR_PAYLOAD};
use crate::digest::Digest;

use super::record::{digest_record, Chain, Record};

/// Everything a renderer needs to draw one frame of the demo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainView {
    /// Live digest of the genesis record.
    pub genesis_digest: Digest,
    /// Digest of the successor record, which never changes.
    pub successor_digest: Digest,
    /// Whether the successor's frozen reference still matches the genesis.
    pub is_successor_valid: bool,
}

impl ChainView {
    /// The genesis record has nothing to be checked against.
    pub fn is_genesis_valid(&self) -> bool {
        true
    }

    /// Whether the renderer should show the broken-chain indicator.
    pub fn is_broken(&self) -> bool {
        !self.is_successor_valid
    }
}

/// Frozen two-record chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainModel {
    genesis: Record,
    successor: Record,
}

impl ChainModel {
    /// Build the chain, freezing the successor's reference to the digest of
    /// `genesis_payload` as it is right now.
    pub fn new(genesis_payload: impl Into<String>, successor_payload: impl Into<String>) -> Self {
        let genesis = Record::genesis(genesis_payload);
        let successor = Record::linked(successor_payload, &genesis.digest());
        debug!(frozen_link = %successor.previous_digest, "chain model built");
        Self { genesis, successor }
    }

    /// The genesis record as it was at construction.
    pub fn genesis(&self) -> &Record {
        &self.genesis
    }

    /// The successor record, including its frozen reference.
    pub fn successor(&self) -> &Record {
        &self.successor
    }

    /// Recompute every derived value for the current genesis payload.
    ///
    /// Pure: the successor's reference is compared against, never written.
    pub fn recompute(&self, current_genesis_payload: &str) -> ChainView {
        let genesis_digest =
            digest_record(current_genesis_payload, &self.genesis.previous_digest);
        let is_successor_valid = genesis_digest.matches(&self.successor.previous_digest);
        let successor_digest = self.successor.digest();

        debug!(
            genesis = %genesis_digest.short(16),
            valid = is_successor_valid,
            "chain recomputed"
        );

        ChainView {
            genesis_digest,
            successor_digest,
            is_successor_valid,
        }
    }

    /// The model as a general [`Chain`] with the genesis payload replaced by
    /// `current_genesis_payload`.
    pub fn to_chain(&self, current_genesis_payload: &str) -> Chain {
        let mut genesis = self.genesis.clone();
        genesis.payload = current_genesis_payload.to_string();
        Chain::from_parts(vec![genesis, self.successor.clone()])
    }
}

impl Default for ChainModel {
    /// The payloads the demo page opens with.
    fn default() -> Self {
        Self::new(DEFAULT_GENESIS_PAYLOAD, DEFAULT_SUCCESSOR_PAYLOAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SENTINEL;
    use crate::digest::digest_str;

    const P0: &str = "Transacción A: 50 BTC";

    #[test]
    fn successor_reference_frozen_at_construction() {
        let model = ChainModel::new(P0, "Transacción B: 10 BTC");
        let expected = digest_str(&format!("{}{}", P0, SENTINEL)).to_hex();
        assert_eq!(model.successor().previous_digest, expected);
        assert_eq!(model.genesis().previous_digest, SENTINEL);
    }

    #[test]
    fn unchanged_payload_is_valid() {
        let view = ChainModel::new(P0, "B").recompute(P0);
        assert!(view.is_successor_valid);
        assert!(!view.is_broken());
    }

    #[test]
    fn changed_payload_breaks_the_chain() {
        let model = ChainModel::new(P0, "B");
        for edit in ["Transacción A: 500 BTC", "", " ", "transacción A: 50 BTC"] {
            assert!(model.recompute(edit).is_broken(), "edit {:?}", edit);
        }
    }

    #[test]
    fn same_length_edit_breaks_the_demo_chain() {
        let model = ChainModel::default();
        for edit in ["Transacción A: 4O BTC", "Transacción A: 51 BTC", "Transacción A: 05 BTC"] {
            let view = model.recompute(edit);
            assert!(view.is_broken(), "edit {:?}", edit);
            assert!(!view.is_successor_valid);
        }
    }

    #[test]
    fn genesis_always_valid() {
        let model = ChainModel::default();
        assert!(model.recompute(P0).is_genesis_valid());
        assert!(model.recompute("tampered").is_genesis_valid());
    }

    #[test]
    fn recompute_is_idempotent() {
        let model = ChainModel::default();
        assert_eq!(model.recompute(P0), model.recompute(P0));
        assert_eq!(model.recompute("x"), model.recompute("x"));
    }

    #[test]
    fn broken_then_restored() {
        let model = ChainModel::default();
        assert!(model.recompute(P0).is_successor_valid);
        assert!(!model.recompute(&format!("{}X", P0)).is_successor_valid);
        assert!(model.recompute(P0).is_successor_valid);
    }

    #[test]
    fn successor_digest_ignores_genesis_edits() {
        let model = ChainModel::default();
        assert_eq!(
            model.recompute(P0).successor_digest,
            model.recompute("anything else").successor_digest
        );
    }

    #[test]
    fn genesis_digest_tracks_the_edit() {
        let model = ChainModel::default();
        let view = model.recompute("edited");
        assert_eq!(view.genesis_digest, digest_str(&format!("edited{}", SENTINEL)));
    }

    #[test]
    fn agrees_with_general_chain() {
        let model = ChainModel::default();
        for payload in [P0, "forged"] {
            let view = model.recompute(payload);
            let verification = model.to_chain(payload).verify();
            assert_eq!(view.is_successor_valid, verification.is_valid);
            assert_eq!(
                view.genesis_digest,
                model.to_chain(payload).record_digest(0).unwrap()
            );
        }
    }

    #[test]
    fn empty_genesis_payload_is_total() {
        let model = ChainModel::new("", "");
        assert!(model.recompute("").is_successor_valid);
        assert!(!model.recompute("a").is_successor_valid);
    }

    #[test]
    fn default_uses_demo_payloads() {
        let model = ChainModel::default();
        assert_eq!(model.genesis().payload, DEFAULT_GENESIS_PAYLOAD);
        assert_eq!(model.successor().payload, DEFAULT_SUCCESSOR_PAYLOAD);
    }

    #[test]
    fn view_serializes_for_renderers() {
        let view = ChainModel::default().recompute("x");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["is_successor_valid"], false);
        assert_eq!(json["genesis_digest"].as_str().unwrap().len(), 64);
    }
}
