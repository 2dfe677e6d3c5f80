//! # Records and Chains
//!
//! A [`Record`] is a payload plus the digest of its predecessor as it was
//! when the record was appended. A [`Chain`] is an ordered, never-empty list
//! of records starting at a genesis record.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SENTINEL;
use crate::digest::{digest, Digest};
use crate::error::LabError;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One position in a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Free-form payload, e.g. a transaction description.
    pub payload: String,
    /// Hex digest of the predecessor at append time. [`SENTINEL`] for genesis.
    pub previous_digest: String,
}

impl Record {
    /// A genesis record pointing at the sentinel.
    pub fn genesis(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            previous_digest: SENTINEL.to_string(),
        }
    }

    /// A record whose predecessor reference is frozen to `previous`.
    pub fn linked(payload: impl Into<String>, previous: &Digest) -> Self {
        Self {
            payload: payload.into(),
            previous_digest: previous.to_hex(),
        }
    }

    /// Digest of `payload || previous_digest`.
    pub fn digest(&self) -> Digest {
        digest_record(&self.payload, &self.previous_digest)
    }
}

/// Digest of a record made of `payload` and `previous_digest`, without
/// building the record.
pub fn digest_record(payload: &str, previous_digest: &str) -> Digest {
    digest(payload, Some(previous_digest))
}

// ---------------------------------------------------------------------------
// Verification Result
// ---------------------------------------------------------------------------

/// Linkage state of a single record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// The first record. Valid by definition.
    Genesis,
    /// The stored reference matches the predecessor's live digest.
    Linked,
    /// The predecessor changed after this record was appended.
    Broken {
        /// Reference stored in this record.
        expected: String,
        /// Live digest of the predecessor.
        actual: Digest,
    },
}

impl LinkStatus {
    /// `false` only for [`LinkStatus::Broken`].
    pub fn is_valid(&self) -> bool {
        !matches!(self, LinkStatus::Broken { .. })
    }
}

/// Outcome of [`Chain::verify`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainVerification {
    /// Whether every record is linked.
    pub is_valid: bool,
    /// Number of records checked.
    pub record_count: usize,
    /// Position of the first broken link, if any.
    pub first_broken_index: Option<usize>,
    /// One entry per record, in chain order.
    pub links: Vec<LinkStatus>,
}

impl ChainVerification {
    /// Whether the record at `index` is linked. Out-of-range indices are not.
    pub fn is_linked(&self, index: usize) -> bool {
        self.links.get(index).is_some_and(LinkStatus::is_valid)
    }

    /// Indices of every broken record.
    pub fn broken_indices(&self) -> Vec<usize> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| !link.is_valid())
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// An ordered chain of records, always holding at least the genesis record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chain {
    records: Vec<Record>,
}

impl Chain {
    /// Start a chain with a single genesis record.
    pub fn new(genesis_payload: impl Into<String>) -> Self {
        Self {
            records: vec![Record::genesis(genesis_payload)],
        }
    }

    /// Callers guarantee `records` is non-empty.
    pub(crate) fn from_parts(records: Vec<Record>) -> Self {
        debug_assert!(!records.is_empty());
        Self { records }
    }

    /// Append a record linked to the current tip.
    ///
    /// The tip's digest is captured now. Later edits to the tip do not
    /// update the new record.
    pub fn append(&mut self, payload: impl Into<String>) -> &Record {
        let previous = self.tip().digest();
        self.records.push(Record::linked(payload, &previous));
        debug!(height = self.records.len(), previous = %previous, "record appended");
        self.tip()
    }

    /// All records, genesis first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Number of records, genesis included.
    pub fn height(&self) -> usize {
        self.records.len()
    }

    /// The most recently appended record.
    pub fn tip(&self) -> &Record {
        // Never empty: every constructor seeds a genesis record.
        &self.records[self.records.len() - 1]
    }

    /// Live digest of the record at `index`.
    pub fn record_digest(&self, index: usize) -> Option<Digest> {
        self.records.get(index).map(Record::digest)
    }

    /// Replace a record's payload wholesale.
    ///
    /// Stored predecessor references are left exactly as they were, so
    /// replacing the payload of record `i` breaks the link into `i + 1`
    /// (unless the new payload equals the old one).
    ///
    /// # Errors
    ///
    /// [`LabError::RecordOutOfRange`] if `index` is past the tip.
    pub fn replace_payload(
        &mut self,
        index: usize,
        payload: impl Into<String>,
    ) -> Result<(), LabError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(LabError::RecordOutOfRange { index, len })?;
        record.payload = payload.into();
        Ok(())
    }

    /// Check every link.
    ///
    /// Each record is compared against its own predecessor, so a break at
    /// position `i` does not hide a second break further down.
    pub fn verify(&self) -> ChainVerification {
        let mut links = Vec::with_capacity(self.records.len());
        links.push(LinkStatus::Genesis);

        let mut previous = self.records[0].digest();
        for record in &self.records[1..] {
            if previous.matches(&record.previous_digest) {
                links.push(LinkStatus::Linked);
            } else {
                links.push(LinkStatus::Broken {
                    expected: record.previous_digest.clone(),
                    actual: previous,
                });
            }
            previous = record.digest();
        }

        let first_broken_index = links.iter().position(|link| !link.is_valid());
        debug!(
            records = links.len(),
            first_broken = ?first_broken_index,
            "chain verified"
        );

        ChainVerification {
            is_valid: first_broken_index.is_none(),
            record_count: links.len(),
            first_broken_index,
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::digest_str;

    fn chain_of_three() -> Chain {
        let mut chain = Chain::new("alice pays bob 5");
        chain.append("bob pays carol 2");
        chain.append("carol pays dave 1");
        chain
    }

    #[test]
    fn genesis_points_at_sentinel() {
        let chain = Chain::new("genesis");
        assert_eq!(chain.height(), 1);
        assert_eq!(chain.records()[0].previous_digest, SENTINEL);
    }

    #[test]
    fn record_digest_covers_payload_and_reference() {
        let record = Record::genesis("data");
        assert_eq!(record.digest(), digest_str(&format!("data{}", SENTINEL)));
    }

    #[test]
    fn append_freezes_tip_digest() {
        let mut chain = Chain::new("first");
        let expected = chain.tip().digest().to_hex();
        let appended = chain.append("second");
        assert_eq!(appended.previous_digest, expected);
    }

    #[test]
    fn single_record_chain_is_valid() {
        let result = Chain::new("alone").verify();
        assert!(result.is_valid);
        assert_eq!(result.record_count, 1);
        assert_eq!(result.links, vec![LinkStatus::Genesis]);
    }

    #[test]
    fn untouched_chain_verifies() {
        let result = chain_of_three().verify();
        assert!(result.is_valid);
        assert_eq!(result.record_count, 3);
        assert!(result.first_broken_index.is_none());
        assert!(result.broken_indices().is_empty());
    }

    #[test]
    fn tampering_breaks_next_link_only() {
        let mut chain = chain_of_three();
        chain.replace_payload(0, "alice pays bob 500").unwrap();

        let result = chain.verify();
        assert!(!result.is_valid);
        assert_eq!(result.first_broken_index, Some(1));
        assert!(result.is_linked(0));
        assert!(!result.is_linked(1));
        // Record 2 still references record 1's unchanged digest.
        assert!(result.is_linked(2));
    }

    #[test]
    fn broken_link_reports_both_sides() {
        let mut chain = chain_of_three();
        let stored = chain.records()[1].previous_digest.clone();
        chain.replace_payload(0, "forged").unwrap();

        match &chain.verify().links[1] {
            LinkStatus::Broken { expected, actual } => {
                assert_eq!(expected, &stored);
                assert_eq!(*actual, chain.record_digest(0).unwrap());
            }
            other => panic!("expected broken link, got {:?}", other),
        }
    }

    #[test]
    fn every_break_is_reported() {
        let mut chain = chain_of_three();
        chain.replace_payload(0, "x").unwrap();
        chain.replace_payload(1, "y").unwrap();
        assert_eq!(chain.verify().broken_indices(), vec![1, 2]);
    }

    #[test]
    fn tampering_the_tip_keeps_chain_valid() {
        // Nothing references the tip yet.
        let mut chain = chain_of_three();
        chain.replace_payload(2, "rewritten").unwrap();
        assert!(chain.verify().is_valid);
    }

    #[test]
    fn restoring_payload_heals_the_link() {
        let mut chain = chain_of_three();
        chain.replace_payload(0, "tampered").unwrap();
        assert!(!chain.verify().is_valid);
        chain.replace_payload(0, "alice pays bob 5").unwrap();
        assert!(chain.verify().is_valid);
    }

    #[test]
    fn genesis_is_valid_even_with_foreign_reference() {
        let chain = Chain::from_parts(vec![Record {
            payload: "imported".to_string(),
            previous_digest: "not-a-sentinel".to_string(),
        }]);
        assert!(chain.verify().is_linked(0));
    }

    #[test]
    fn replace_out_of_range() {
        let mut chain = Chain::new("only");
        assert_eq!(
            chain.replace_payload(3, "nope"),
            Err(LabError::RecordOutOfRange { index: 3, len: 1 })
        );
        assert!(chain.record_digest(3).is_none());
        assert!(chain.get(3).is_none());
    }

    #[test]
    fn empty_payloads_are_fine() {
        let mut chain = Chain::new("");
        chain.append("");
        assert!(chain.verify().is_valid);
    }

    #[test]
    fn verification_serializes_with_status_tags() {
        let mut chain = chain_of_three();
        chain.replace_payload(0, "t").unwrap();
        let json = serde_json::to_value(chain.verify()).unwrap();
        assert_eq!(json["links"][0]["status"], "genesis");
        assert_eq!(json["links"][1]["status"], "broken");
        assert_eq!(json["links"][2]["status"], "linked");
        assert_eq!(json["first_broken_index"], 1);
    }
}
