//! # Simulation Digest
//!
//! The fingerprint function behind every "hash" the simulations show.
//!
//! **This is not a cryptographic hash.** It is a visible, easy-to-explain
//! checksum: deterministic, order-sensitive, and always 64 hex characters
//! long. Nothing else is promised. Pre-images are easy to find and collisions
//! exist. The lesson text next to the simulations walks through this exact
//! algorithm, so it must not be swapped for a real hash function behind the
//! learner's back.
//!
//! ## Algorithm
//!
//! ```text
//! material = input || salt                      (UTF-16 code units)
//! lane[k]  = SEED[k]
//! for unit in material:
//!     lane[k] = lane[k] * FOLD[k] + unit        (FOLD = 31, 37, 131, 257)
//! lane[k]  = mix(lane[k] * 99_991)
//! digest   = hex(lane[0] || lane[1] || lane[2] || lane[3])   (big-endian)
//! ```
//!
//! Lane 0 is the classic `(h << 5) - h + unit` string hash. The other lanes
//! fold with different odd multipliers, so the short collisions of the
//! `* 31` fold (`"Aa"` and `"BB"`) do not carry over to the full digest.
//!
//! Empty material short-circuits to the all-zero digest, which the chain demo
//! also uses as its "nothing here yet" marker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{DIGEST_BYTE_LENGTH, DIGEST_HEX_LENGTH};
use crate::error::LabError;

/// Starting value of each accumulator lane (leading hex digits of pi).
const LANE_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Per-unit folding step of each lane. Lane 0 is `(h << 5) - h`.
const FOLD_MULTIPLIERS: [u64; 4] = [31, 37, 131, 257];

/// Fixed multiplicative step applied to each lane before mixing.
const SPREAD_MULTIPLIER: u64 = 99_991;

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// A 32-byte simulation digest, shown as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_BYTE_LENGTH]);

impl Digest {
    /// Digest of empty material.
    pub const EMPTY: Digest = Digest([0u8; DIGEST_BYTE_LENGTH]);

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_BYTE_LENGTH] {
        &self.0
    }

    /// The 64-character lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First `len` hex characters, the form block cards display.
    pub fn short(&self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len);
        hex
    }

    /// Whether the hex form starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.to_hex().starts_with(prefix)
    }

    /// Whether a stored hex reference points at this digest.
    pub fn matches(&self, reference: &str) -> bool {
        self.to_hex() == reference
    }

    /// True for the all-zero digest produced by empty material.
    pub fn is_empty_marker(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGEST_HEX_LENGTH {
            return Err(LabError::InvalidDigest(format!(
                "expected {} hex characters, got {}",
                DIGEST_HEX_LENGTH,
                s.len()
            )));
        }
        let mut bytes = [0u8; DIGEST_BYTE_LENGTH];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| LabError::InvalidDigest(e.to_string()))?;
        Ok(Digest(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Digest `input`, with `salt` appended to the hashed material when given.
///
/// `digest(a, Some(b))` is the same as `digest_str(&format!("{a}{b}"))`; the
/// salt exists so callers such as the miner can vary the output without
/// rebuilding the base string.
///
/// # Example
///
/// ```
/// use chainlab::digest::digest;
///
/// let d = digest("Transacciones Merkle Root", Some("42"));
/// assert_eq!(d.to_hex().len(), 64);
/// assert_eq!(d, digest("Transacciones Merkle Root", Some("42")));
/// ```
pub fn digest(input: &str, salt: Option<&str>) -> Digest {
    let material = input
        .encode_utf16()
        .chain(salt.unwrap_or_default().encode_utf16());

    let mut lanes = LANE_SEEDS;
    let mut folded_any = false;
    for unit in material {
        folded_any = true;
        for (lane, multiplier) in lanes.iter_mut().zip(FOLD_MULTIPLIERS) {
            *lane = lane.wrapping_mul(multiplier).wrapping_add(u64::from(unit));
        }
    }

    if !folded_any {
        return Digest::EMPTY;
    }

    let mut bytes = [0u8; DIGEST_BYTE_LENGTH];
    for (chunk, lane) in bytes.chunks_exact_mut(8).zip(lanes) {
        chunk.copy_from_slice(&mix(lane.wrapping_mul(SPREAD_MULTIPLIER)).to_be_bytes());
    }
    Digest(bytes)
}

/// Digest `input` with no salt.
pub fn digest_str(input: &str) -> Digest {
    digest(input, None)
}

/// 64-bit finalizer so that every hex position depends on every unit.
fn mix(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EMPTY_DIGEST_HEX;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn deterministic() {
        let a = digest_str("Transacción A: 50 BTC");
        let b = digest_str("Transacción A: 50 BTC");
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_length_lowercase_hex() {
        let long = "x".repeat(10_000);
        for input in ["", "a", "Transacción A: 50 BTC", "ñandú 🦀", long.as_str()] {
            let hex = digest_str(input).to_hex();
            assert_eq!(hex.len(), 64, "input {:?}", input);
            assert!(is_lower_hex(&hex), "input {:?} gave {}", input, hex);
        }
    }

    #[test]
    fn empty_input_maps_to_sentinel() {
        assert_eq!(digest_str("").to_hex(), EMPTY_DIGEST_HEX);
        assert_eq!(digest("", Some("")), Digest::EMPTY);
        assert!(digest_str("").is_empty_marker());
    }

    #[test]
    fn non_empty_input_is_not_the_sentinel() {
        assert!(!digest_str("a").is_empty_marker());
        assert!(!digest("", Some("0")).is_empty_marker());
    }

    #[test]
    fn order_sensitive() {
        assert_ne!(digest_str("ab"), digest_str("ba"));
    }

    #[test]
    fn same_length_fold_collisions_are_separated() {
        // Each pair collides under a single `* 31` fold.
        assert_ne!(digest_str("Aa"), digest_str("BB"));
        assert_ne!(digest_str("50"), digest_str("4O"));
        assert_ne!(
            digest_str("Transacción A: 50 BTC"),
            digest_str("Transacción A: 4O BTC")
        );
    }

    #[test]
    fn case_sensitive() {
        assert_ne!(digest_str("nova"), digest_str("Nova"));
    }

    #[test]
    fn salt_is_concatenated() {
        assert_eq!(digest("block", Some("7")), digest_str("block7"));
        assert_ne!(digest("block", Some("7")), digest("block", Some("8")));
        assert_ne!(digest("block", Some("7")), digest_str("block"));
    }

    #[test]
    fn none_and_empty_salt_agree() {
        assert_eq!(digest("block", None), digest("block", Some("")));
    }

    #[test]
    fn hex_roundtrip_through_from_str() {
        let d = digest_str("roundtrip");
        let parsed: Digest = d.to_hex().parse().unwrap();
        assert_eq!(parsed, d);
        assert!(d.matches(&d.to_hex()));
    }

    #[test]
    fn from_str_rejects_bad_input() {
        assert!(matches!(
            "abc".parse::<Digest>(),
            Err(LabError::InvalidDigest(_))
        ));
        let not_hex = "z".repeat(64);
        assert!(not_hex.parse::<Digest>().is_err());
    }

    #[test]
    fn short_and_prefix_helpers() {
        let d = digest_str("helpers");
        let hex = d.to_hex();
        assert_eq!(d.short(16), &hex[..16]);
        assert_eq!(d.short(100), hex);
        assert!(d.starts_with(&hex[..4]));
        assert!(d.starts_with(""));
    }

    #[test]
    fn serializes_as_hex_string() {
        let d = digest_str("serde");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", d.to_hex()));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
