//! Deterministic outcome derivation from request-bound entropy
//!
//! The winning number is derived from the transaction hash, the block
//! timestamp and the player's seed phrase. Identical inputs always yield the
//! identical number, which is what makes rounds replayable and testable.
//!
//! This is pseudo-random relative to a player, who cannot predict the exact
//! transaction hash and timestamp in advance. It is NOT secure against a
//! host that can influence the timestamp or choose which transaction lands
//! where; such hosts need a commit-reveal or VRF scheme instead.

use crate::types::Outcome;
use sha2::{Digest, Sha256};

/// Number of discrete spin positions; the raw spin is a residue in
/// `[0, SPIN_TICKS)` read as ticks of `1/SPIN_TICKS`.
pub const SPIN_TICKS: u32 = 100_000;

/// Draws the round outcome from the entropy bound to this request.
///
/// The entropy string is the lowercase hex of the transaction id, the
/// decimal timestamp, and the user seed, concatenated in that order. Its
/// SHA-256 digest, read as a big-endian integer modulo [`SPIN_TICKS`],
/// gives the raw spin; the winning number is the spin scaled to [0, 99].
pub fn generate(transaction_id: &[u8], block_timestamp: u64, user_seed: &str) -> Outcome {
    let entropy = format!(
        "{}{}{}",
        hex::encode(transaction_id),
        block_timestamp,
        user_seed
    );
    let digest = Sha256::digest(entropy.as_bytes());

    // Big-endian residue, folded byte by byte so no bigint is needed.
    let raw_spin = digest
        .iter()
        .fold(0u64, |acc, &byte| (acc * 256 + byte as u64) % SPIN_TICKS as u64)
        as u32;

    Outcome {
        winning_number: (raw_spin / (SPIN_TICKS / 100)) as u8,
        raw_spin,
    }
}
