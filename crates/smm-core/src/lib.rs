//! Proof-of-work work engine for the solar mining module.
//!
//! This crate provides pure Rust implementations of:
//! - Block header layout and serialization
//! - Coinbase height tagging and Merkle root reconstruction
//! - Compact difficulty bits to 256-bit target decoding
//! - A chunked, resumable nonce search with best-hash tracking
//! - Hash rate estimation
//! - The XXTEA payload cipher used on coordinator messages

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod block;
pub mod cipher;
pub mod clock;
pub mod coinbase;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod hash;
pub mod hashrate;
pub mod merkle;
pub mod report;
pub mod search;

pub use block::BlockHeader;
pub use cipher::{decrypt, encrypt, CipherKey};
pub use clock::{Clock, ManualClock};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use config::{EngineProfile, ExhaustionPolicy, MerkleMode, Mode};
pub use difficulty::Target;
pub use engine::{Engine, MiningSession, FIRMWARE_VERSION};
pub use error::{CipherError, EngineError};
pub use hash::{double_hash, Hash256};
pub use merkle::{compute_merkle_root, MerklePath};
pub use report::{MiningReport, Status};
