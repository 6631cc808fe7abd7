//! Compact "bits" to 256-bit target conversion.

use crate::error::{EngineError, Result};
use crate::hash::{hash_le, Hash256, HASH_SIZE};

/// Smallest exponent that still places every mantissa byte in the buffer.
const MIN_EXPONENT: usize = 4;

/// A 256-bit difficulty threshold in display (big-endian) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target([u8; HASH_SIZE]);

impl Target {
    /// Decode compact bits into a target.
    ///
    /// The bits format is `[exponent (1 byte)][mantissa (3 bytes)]`. The three
    /// mantissa bytes land high byte first at offset `32 - exponent` of an
    /// otherwise zeroed buffer. Exponents of 3 or less, or above 32, cannot
    /// be laid out that way and are rejected.
    pub fn from_bits(bits: u32) -> Result<Self> {
        let exponent = (bits >> 24) as usize;
        let mantissa = bits & 0x00FF_FFFF;

        if !(MIN_EXPONENT..=HASH_SIZE).contains(&exponent) {
            return Err(EngineError::InvalidBits(bits));
        }

        let mut target = [0u8; HASH_SIZE];
        let pos = HASH_SIZE - exponent;
        target[pos] = (mantissa >> 16) as u8;
        target[pos + 1] = (mantissa >> 8) as u8;
        target[pos + 2] = mantissa as u8;

        Ok(Target(target))
    }

    /// Wrap raw display-order bytes.
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Target(bytes)
    }

    /// The raw display-order bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// A hash meets the target when it is numerically at or below it.
    #[inline]
    pub fn is_met_by(&self, hash: &Hash256) -> bool {
        hash_le(hash, &self.0)
    }
}
