//! Chunked nonce search over a block header.

use crate::block::{BlockHeader, NONCE_OFFSET};
use crate::difficulty::Target;
use crate::hash::{double_hash, hash_le, Hash256, MAX_HASH};

/// Lowest hash seen so far and the nonce pair that produced it.
///
/// `nonce2` names the coinbase the hash was computed over, so the pair
/// rebuilds the exact header even after later rollovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestHash {
    pub hash: Hash256,
    pub nonce: u32,
    pub nonce2: u32,
}

impl Default for BestHash {
    fn default() -> Self {
        BestHash {
            hash: MAX_HASH,
            nonce: 0,
            nonce2: 0,
        }
    }
}

impl BestHash {
    /// Keep `hash` if it is at or below the current best.
    #[inline]
    pub fn offer(&mut self, nonce: u32, nonce2: u32, hash: Hash256) -> bool {
        if hash_le(&hash, &self.hash) {
            self.hash = hash;
            self.nonce = nonce;
            self.nonce2 = nonce2;
            true
        } else {
            false
        }
    }
}

/// How a search chunk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A hash met the target; the header nonce is the winner.
    Found { nonce: u32, hash: Hash256 },
    /// The nonce reached `u32::MAX` without meeting the target.
    Exhausted,
    /// Cycle budget spent; resume from the header nonce.
    Pending,
}

/// Result of one search chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// Hashes computed in this chunk.
    pub hashes: u32,
}

/// Hash up to `cycles` nonces starting at `header.nonce`.
///
/// `nonce2` is the counter the header's coinbase was built with; it is
/// recorded alongside any hash kept in `best`. The header nonce is advanced in place so a later call resumes exactly
/// where this one stopped. On success or exhaustion the header keeps the
/// last nonce hashed. Every non-winning hash is offered to `best`; a winning
/// hash is always recorded there.
pub fn search_nonces(
    header: &mut BlockHeader,
    nonce2: u32,
    target: &Target,
    best: &mut BestHash,
    cycles: u32,
) -> SearchResult {
    let mut bytes = header.to_bytes();
    let mut nonce = header.nonce;
    let mut hashes = 0u32;

    let outcome = loop {
        if hashes == cycles {
            break SearchOutcome::Pending;
        }

        bytes[NONCE_OFFSET..].copy_from_slice(&nonce.to_le_bytes());
        let hash = double_hash(&bytes);
        hashes += 1;

        if target.is_met_by(&hash) {
            *best = BestHash { hash, nonce, nonce2 };
            break SearchOutcome::Found { nonce, hash };
        }

        best.offer(nonce, nonce2, hash);

        if nonce == u32::MAX {
            break SearchOutcome::Exhausted;
        }
        nonce += 1;
    };

    header.nonce = nonce;
    SearchResult { outcome, hashes }
}
