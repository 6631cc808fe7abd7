//! SHA256 double-hashing and 256-bit hash comparison.
//!
//! Every hash the engine produces goes through [`double_hash`], which
//! returns the digest byte-reversed. All comparisons against targets and
//! best-so-far values happen in that reversed (display) order, where byte 0
//! is the most significant.

use sha2::{Digest, Sha256};

/// Size of a SHA256 digest in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte hash in display (most-significant-byte-first) order.
pub type Hash256 = [u8; HASH_SIZE];

/// The largest representable 256-bit value. Seeds the best-hash tracker.
pub const MAX_HASH: Hash256 = [0xFF; HASH_SIZE];

/// Bitcoin's double SHA256 in natural digest order: SHA256(SHA256(data)).
#[inline]
pub fn sha256d(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(&first);
    let mut result = [0u8; HASH_SIZE];
    result.copy_from_slice(&second);
    result
}

/// Double SHA256 reversed into display order.
///
/// This is the only hash the engine ever compares or stores.
#[inline]
pub fn double_hash(data: &[u8]) -> Hash256 {
    reverse_bytes(&sha256d(data))
}

/// Reverse the byte order of a 32-byte array.
#[inline]
pub fn reverse_bytes(bytes: &Hash256) -> Hash256 {
    let mut reversed = *bytes;
    reversed.reverse();
    reversed
}

/// Returns true when `a <= b` as unsigned 256-bit big-endian integers.
#[inline]
pub fn hash_le(a: &Hash256, b: &Hash256) -> bool {
    // Lexicographic order on equal-length byte arrays is numeric order.
    a <= b
}

/// Hex rendering of a display-order hash.
pub fn hash_to_hex(hash: &Hash256) -> alloc::string::String {
    hex::encode(hash)
}

/// Count leading zero bits of a display-order hash.
pub fn count_leading_zeros(hash: &Hash256) -> u32 {
    let mut zeros = 0u32;
    for byte in hash.iter() {
        if *byte == 0 {
            zeros += 8;
        } else {
            zeros += byte.leading_zeros();
            break;
        }
    }
    zeros
}
