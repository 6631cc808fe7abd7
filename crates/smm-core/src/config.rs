//! Engine profiles.
//!
//! A profile fixes the behaviors that differ between module builds: how
//! large a coinbase fragment may be, whether the Merkle root is rebuilt
//! from the path, and what happens when the nonce space runs out.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Default coinbase fragment cap.
pub const COINBASE_CAP: usize = 64;

/// Coinbase fragment cap of the extended profile.
pub const EXTENDED_COINBASE_CAP: usize = 128;

/// Nonces per `mine_chunk` call.
pub const DEFAULT_CYCLES: u32 = 1024;

/// How hashes are produced. Reported verbatim, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Software hashing on the host CPU.
    #[default]
    Emulated = 0,
    /// Hashing offloaded to a hardware module.
    Hardware = 1,
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for Mode {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, EngineError> {
        match code {
            0 => Ok(Mode::Emulated),
            1 => Ok(Mode::Hardware),
            other => Err(EngineError::UnknownMode(other)),
        }
    }
}

/// Where the header's Merkle root comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerkleMode {
    /// Rebuild the root from the coinbase and the sibling path.
    #[default]
    Reconstruct,
    /// Keep the root carried by the supplied header.
    Supplied,
}

/// What the search does when the 32-bit nonce runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// End the assignment with `Status::Fail`.
    #[default]
    Fail,
    /// Bump nonce2, rebuild the coinbase and keep searching from nonce 0.
    RollNonce2,
}

/// Behavior switches fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineProfile {
    pub mode: Mode,
    pub coinbase_cap: usize,
    pub merkle_mode: MerkleMode,
    pub exhaustion: ExhaustionPolicy,
    pub default_cycles: u32,
}

impl Default for EngineProfile {
    fn default() -> Self {
        EngineProfile {
            mode: Mode::Emulated,
            coinbase_cap: COINBASE_CAP,
            merkle_mode: MerkleMode::Reconstruct,
            exhaustion: ExhaustionPolicy::Fail,
            default_cycles: DEFAULT_CYCLES,
        }
    }
}

impl EngineProfile {
    /// Larger coinbase cap with nonce2 rollover instead of failing.
    pub fn extended() -> Self {
        EngineProfile {
            coinbase_cap: EXTENDED_COINBASE_CAP,
            exhaustion: ExhaustionPolicy::RollNonce2,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_merkle_mode(mut self, merkle_mode: MerkleMode) -> Self {
        self.merkle_mode = merkle_mode;
        self
    }

    pub fn with_exhaustion(mut self, exhaustion: ExhaustionPolicy) -> Self {
        self.exhaustion = exhaustion;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = EngineProfile::default();
        assert_eq!(profile.coinbase_cap, 64);
        assert_eq!(profile.exhaustion, ExhaustionPolicy::Fail);
        assert_eq!(profile.merkle_mode, MerkleMode::Reconstruct);
        assert_eq!(profile.default_cycles, 1024);
    }

    #[test]
    fn test_extended_profile() {
        let profile = EngineProfile::extended();
        assert_eq!(profile.coinbase_cap, 128);
        assert_eq!(profile.exhaustion, ExhaustionPolicy::RollNonce2);
    }

    #[test]
    fn test_profile_from_partial_json() {
        let profile: EngineProfile =
            serde_json::from_str(r#"{"exhaustion":"roll_nonce2","mode":"hardware"}"#).unwrap();
        assert_eq!(profile.exhaustion, ExhaustionPolicy::RollNonce2);
        assert_eq!(profile.mode, Mode::Hardware);
        assert_eq!(profile.coinbase_cap, COINBASE_CAP);
    }

    #[test]
    fn test_profile_builders() {
        let profile = EngineProfile::default()
            .with_mode(Mode::Hardware)
            .with_merkle_mode(MerkleMode::Supplied)
            .with_exhaustion(ExhaustionPolicy::RollNonce2);
        assert_eq!(profile.mode, Mode::Hardware);
        assert_eq!(profile.merkle_mode, MerkleMode::Supplied);
        assert_eq!(profile.exhaustion, ExhaustionPolicy::RollNonce2);
        assert_eq!(profile.coinbase_cap, COINBASE_CAP);
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(u8::from(Mode::Hardware), 1);
        assert_eq!(Mode::try_from(0), Ok(Mode::Emulated));
        assert_eq!(Mode::try_from(9), Err(EngineError::UnknownMode(9)));
    }
}
