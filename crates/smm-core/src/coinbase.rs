//! Coinbase assembly for the work engine.
//!
//! The engine controls only the head and (optionally) the tail of the
//! coinbase: a 4-byte height tag is prepended to the caller's fragment, and
//! under the extended-counter profile the nonce2 counter is appended so each
//! rollover yields a fresh Merkle root.

use alloc::vec::Vec;

use crate::error::{EngineError, Result};

/// Largest block height the 3-byte height tag can carry.
pub const MAX_HEIGHT: u32 = 0x00FF_FFFF;

/// Leading byte of the height tag: push the next 3 bytes.
pub const HEIGHT_PUSH: u8 = 0x03;

/// Size of the height tag in bytes.
pub const HEIGHT_PREFIX_SIZE: usize = 4;

/// Encode a block height as `[0x03, h0, h1, h2]` (little-endian height).
pub fn height_prefix(height: u32) -> Result<[u8; HEIGHT_PREFIX_SIZE]> {
    if height > MAX_HEIGHT {
        return Err(EngineError::HeightOutOfRange(height));
    }
    let [h0, h1, h2, _] = height.to_le_bytes();
    Ok([HEIGHT_PUSH, h0, h1, h2])
}

/// Build the stored coinbase: height tag, fragment, then the optional
/// nonce2 suffix in little-endian order.
pub fn build_coinbase(height: u32, fragment: &[u8], nonce2: Option<u32>) -> Result<Vec<u8>> {
    let prefix = height_prefix(height)?;

    let mut coinbase = Vec::with_capacity(HEIGHT_PREFIX_SIZE + fragment.len() + 4);
    coinbase.extend_from_slice(&prefix);
    coinbase.extend_from_slice(fragment);
    if let Some(nonce2) = nonce2 {
        coinbase.extend_from_slice(&nonce2.to_le_bytes());
    }

    Ok(coinbase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_prefix() {
        assert_eq!(height_prefix(0).unwrap(), [0x03, 0x00, 0x00, 0x00]);
        assert_eq!(height_prefix(875_000).unwrap(), [0x03, 0xF8, 0x59, 0x0D]);
        assert_eq!(height_prefix(MAX_HEIGHT).unwrap(), [0x03, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            height_prefix(MAX_HEIGHT + 1),
            Err(EngineError::HeightOutOfRange(0x0100_0000))
        );
    }

    #[test]
    fn test_build_coinbase() {
        let coinbase = build_coinbase(0x010203, b"abc", None).unwrap();
        assert_eq!(coinbase, [0x03, 0x03, 0x02, 0x01, b'a', b'b', b'c']);
    }

    #[test]
    fn test_build_coinbase_with_nonce2() {
        let coinbase = build_coinbase(1, b"x", Some(0x0A0B0C0D)).unwrap();
        assert_eq!(coinbase.len(), 9);
        assert_eq!(&coinbase[5..], &[0x0D, 0x0C, 0x0B, 0x0A]);
    }
}
