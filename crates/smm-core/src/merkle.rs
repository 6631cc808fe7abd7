//! Merkle root reconstruction from a coinbase and its sibling path.

use alloc::vec::Vec;

use crate::error::{EngineError, Result};
use crate::hash::{double_hash, Hash256, HASH_SIZE};

/// Maximum number of sibling hashes in a path.
pub const MAX_MERKLE_PATH: usize = 16;

/// Ordered sibling hashes, applied bottom-up from the coinbase leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerklePath {
    siblings: Vec<Hash256>,
}

impl MerklePath {
    /// Build a path, rejecting more than [`MAX_MERKLE_PATH`] siblings.
    pub fn new(siblings: Vec<Hash256>) -> Result<Self> {
        if siblings.len() > MAX_MERKLE_PATH {
            return Err(EngineError::MerklePathTooLong(siblings.len()));
        }
        Ok(MerklePath { siblings })
    }

    /// Parse concatenated 32-byte sibling hashes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % HASH_SIZE != 0 {
            return Err(EngineError::MerklePathMisaligned(bytes.len()));
        }
        let count = bytes.len() / HASH_SIZE;
        if count > MAX_MERKLE_PATH {
            return Err(EngineError::MerklePathTooLong(count));
        }

        let siblings = bytes
            .chunks_exact(HASH_SIZE)
            .map(|chunk| {
                let mut hash = [0u8; HASH_SIZE];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();
        Ok(MerklePath { siblings })
    }

    /// An empty path: the root is the coinbase hash itself.
    pub fn empty() -> Self {
        MerklePath::default()
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn siblings(&self) -> &[Hash256] {
        &self.siblings
    }
}

/// Fold the coinbase hash up the path into a Merkle root.
///
/// Starts from `double_hash(coinbase)` and, for each sibling in order,
/// replaces the running hash with `double_hash(running || sibling)`.
pub fn compute_merkle_root(coinbase: &[u8], path: &MerklePath) -> Hash256 {
    let mut hash = double_hash(coinbase);
    let mut combined = [0u8; HASH_SIZE * 2];

    for sibling in path.siblings() {
        combined[..HASH_SIZE].copy_from_slice(&hash);
        combined[HASH_SIZE..].copy_from_slice(sibling);
        hash = double_hash(&combined);
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_empty_path_root_is_coinbase_hash() {
        let coinbase = b"\x03\x01\x02\x03coinbase";
        let root = compute_merkle_root(coinbase, &MerklePath::empty());
        assert_eq!(root, double_hash(coinbase));
    }

    #[test]
    fn test_two_sibling_root() {
        let coinbase = [0x42u8; 20];
        let s1 = [0x11u8; 32];
        let s2 = [0x22u8; 32];
        let path = MerklePath::new(vec![s1, s2]).unwrap();

        let root = compute_merkle_root(&coinbase, &path);

        let leaf = double_hash(&coinbase);
        let mut combined = [0u8; 64];
        combined[..32].copy_from_slice(&leaf);
        combined[32..].copy_from_slice(&s1);
        let level1 = double_hash(&combined);
        combined[..32].copy_from_slice(&level1);
        combined[32..].copy_from_slice(&s2);
        let expected = double_hash(&combined);

        assert_eq!(root, expected);
    }

    #[test]
    fn test_sibling_order_matters() {
        let coinbase = [0x07u8; 12];
        let forward = MerklePath::new(vec![[0xAA; 32], [0xBB; 32]]).unwrap();
        let swapped = MerklePath::new(vec![[0xBB; 32], [0xAA; 32]]).unwrap();

        assert_ne!(
            compute_merkle_root(&coinbase, &forward),
            compute_merkle_root(&coinbase, &swapped)
        );
    }

    #[test]
    fn test_path_length_cap() {
        assert!(MerklePath::new(vec![[0u8; 32]; MAX_MERKLE_PATH]).is_ok());
        assert_eq!(
            MerklePath::new(vec![[0u8; 32]; MAX_MERKLE_PATH + 1]),
            Err(EngineError::MerklePathTooLong(17))
        );
    }

    #[test]
    fn test_from_bytes() {
        let mut bytes = vec![0x11u8; 32];
        bytes.extend_from_slice(&[0x22u8; 32]);

        let path = MerklePath::from_bytes(&bytes).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.siblings()[1], [0x22u8; 32]);

        assert_eq!(
            MerklePath::from_bytes(&bytes[..40]),
            Err(EngineError::MerklePathMisaligned(40))
        );
        assert_eq!(
            MerklePath::from_bytes(&[0u8; 32 * 17]),
            Err(EngineError::MerklePathTooLong(17))
        );
        assert!(MerklePath::from_bytes(&[]).unwrap().is_empty());
    }
}
