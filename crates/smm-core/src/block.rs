//! Block header layout and serialization.

use crate::error::{EngineError, Result};
use crate::hash::{double_hash, Hash256, HASH_SIZE};

/// Serialized block header size in bytes.
pub const BLOCK_HEADER_SIZE: usize = 80;

/// Byte offset of the nonce within the serialized header.
pub const NONCE_OFFSET: usize = 76;

/// A Bitcoin-style block header (80 bytes on the wire).
///
/// Hash fields are stored exactly as they appear on the wire; integers are
/// little-endian when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockHeader {
    /// Block version.
    pub version: u32,
    /// Hash of the previous block, wire byte order.
    pub prev_block_hash: Hash256,
    /// Merkle root, wire byte order.
    pub merkle_root: Hash256,
    /// Block timestamp (Unix time).
    pub timestamp: u32,
    /// Difficulty target in compact "bits" format.
    pub bits: u32,
    /// Nonce for proof of work.
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialize the block header to 80 bytes.
    pub fn to_bytes(&self) -> [u8; BLOCK_HEADER_SIZE] {
        let mut header = [0u8; BLOCK_HEADER_SIZE];
        header[..NONCE_OFFSET].copy_from_slice(&self.serialize_without_nonce());
        header[NONCE_OFFSET..].copy_from_slice(&self.nonce.to_le_bytes());
        header
    }

    /// Serialize the header without the nonce (76 bytes).
    /// Used for efficient mining where we only change the nonce.
    pub fn serialize_without_nonce(&self) -> [u8; NONCE_OFFSET] {
        let mut header = [0u8; NONCE_OFFSET];

        header[0..4].copy_from_slice(&self.version.to_le_bytes());
        header[4..36].copy_from_slice(&self.prev_block_hash);
        header[36..68].copy_from_slice(&self.merkle_root);
        header[68..72].copy_from_slice(&self.timestamp.to_le_bytes());
        header[72..76].copy_from_slice(&self.bits.to_le_bytes());

        header
    }

    /// Parse an 80-byte serialized header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BLOCK_HEADER_SIZE {
            return Err(EngineError::InvalidHeaderLength(bytes.len()));
        }

        let mut prev_block_hash = [0u8; HASH_SIZE];
        prev_block_hash.copy_from_slice(&bytes[4..36]);
        let mut merkle_root = [0u8; HASH_SIZE];
        merkle_root.copy_from_slice(&bytes[36..68]);

        Ok(BlockHeader {
            version: read_u32_le(bytes, 0),
            prev_block_hash,
            merkle_root,
            timestamp: read_u32_le(bytes, 68),
            bits: read_u32_le(bytes, 72),
            nonce: read_u32_le(bytes, NONCE_OFFSET),
        })
    }

    /// Display-order double hash of the serialized header.
    pub fn hash(&self) -> Hash256 {
        double_hash(&self.to_bytes())
    }
}

pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 0x2000_0000,
            prev_block_hash: [0x12u8; 32],
            merkle_root: [0x34u8; 32],
            timestamp: 1_700_000_000,
            bits: 0x1703_4219,
            nonce: 0xDEAD_BEEF,
        }
    }

    #[test]
    fn test_block_header_serialization() {
        let header = sample_header();
        let serialized = header.to_bytes();

        assert_eq!(serialized.len(), 80);
        assert_eq!(&serialized[0..4], &[0x00, 0x00, 0x00, 0x20]);
        assert_eq!(&serialized[4..36], &[0x12u8; 32][..]);
        assert_eq!(&serialized[36..68], &[0x34u8; 32][..]);
        assert_eq!(&serialized[72..76], &[0x19, 0x42, 0x03, 0x17]);
        assert_eq!(&serialized[76..80], &[0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(&serialized[..76], &header.serialize_without_nonce()[..]);
    }

    #[test]
    fn test_block_header_parse() {
        let header = sample_header();
        let parsed = BlockHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed, header);

        assert_eq!(
            BlockHeader::from_bytes(&[0u8; 79]),
            Err(EngineError::InvalidHeaderLength(79))
        );
    }

    #[test]
    fn test_genesis_header_hash() {
        // Bitcoin genesis block header, wire byte order
        let raw = hex::decode(concat!(
            "01000000",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "3ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a",
            "29ab5f49",
            "ffff001d",
            "1dac2b7c"
        ))
        .unwrap();

        let header = BlockHeader::from_bytes(&raw).unwrap();
        assert_eq!(header.bits, 0x1d00ffff);
        assert_eq!(header.nonce, 2_083_236_893);
        assert_eq!(
            hex::encode(header.hash()),
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        );
    }
}
