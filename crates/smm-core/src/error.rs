//! Error types for the work engine and the payload cipher.

use thiserror::Error;

/// Configuration and decoding errors raised by the work engine.
///
/// These never abort the host: the engine records the error, moves to
/// [`Status::Error`](crate::Status::Error) where the operation requires it,
/// and waits for a corrected call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Coinbase fragment longer than the profile's cap.
    #[error("coinbase fragment of {len} bytes exceeds the {max} byte cap")]
    CoinbaseTooLarge { len: usize, max: usize },

    /// Block height does not fit in 24 bits.
    #[error("block height {0} does not fit in 24 bits")]
    HeightOutOfRange(u32),

    /// More sibling hashes than the path can hold.
    #[error("merkle path of {0} hashes exceeds the 16 hash limit")]
    MerklePathTooLong(usize),

    /// Raw path bytes are not a whole number of 32-byte hashes.
    #[error("merkle path of {0} bytes is not a multiple of 32")]
    MerklePathMisaligned(usize),

    /// Compact bits whose exponent cannot place the mantissa in 32 bytes.
    #[error("compact bits {0:#010x} have no valid target")]
    InvalidBits(u32),

    /// Serialized header is not 80 bytes.
    #[error("block header must be 80 bytes, got {0}")]
    InvalidHeaderLength(usize),

    /// Serialized report has the wrong size.
    #[error("mining report must be 60 bytes, got {0}")]
    InvalidReportLength(usize),

    /// Status byte outside the closed set.
    #[error("unknown status code {0}")]
    UnknownStatus(u8),

    /// Mode byte outside the closed set.
    #[error("unknown mode code {0}")]
    UnknownMode(u8),
}

/// Payload cipher errors.
///
/// Every variant leaves the caller's buffer untouched except
/// [`CipherError::InvalidPadding`], which is only detectable after
/// decryption has run in place.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// Padded payload would not fit in the buffer.
    #[error("padded payload of {needed} bytes exceeds buffer capacity of {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// Ciphertext length is zero or not a multiple of 4.
    #[error("ciphertext length {0} is not a positive multiple of 4")]
    MalformedLength(usize),

    /// Decrypted trailer is not a padding count in 1..=4.
    #[error("invalid padding count {0}")]
    InvalidPadding(u8),
}

/// Result type for engine operations.
pub type Result<T> = core::result::Result<T, EngineError>;
