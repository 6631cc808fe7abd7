//! Mining status codes and the fixed-width mining report.

use serde::{Deserialize, Serialize};

use crate::block::read_u32_le;
use crate::config::Mode;
use crate::error::{EngineError, Result};
use crate::hash::{Hash256, HASH_SIZE};

/// Serialized report size in bytes.
pub const REPORT_SIZE: usize = 60;

/// Engine status, a closed set callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No work loaded.
    #[default]
    Idle = 0,
    /// Coinbase fragment accepted, awaiting `init`.
    Ready = 1,
    /// Configured and searching.
    Mining = 2,
    /// Target met; winning nonce recorded.
    Done = 3,
    /// Nonce space exhausted without meeting the target.
    Fail = 4,
    /// Configuration rejected; must not mine.
    Error = 5,
}

impl Status {
    /// True for `Done` and `Fail`: the assignment is over.
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Done | Status::Fail)
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for Status {
    type Error = EngineError;

    fn try_from(code: u8) -> core::result::Result<Self, EngineError> {
        match code {
            0 => Ok(Status::Idle),
            1 => Ok(Status::Ready),
            2 => Ok(Status::Mining),
            3 => Ok(Status::Done),
            4 => Ok(Status::Fail),
            5 => Ok(Status::Error),
            other => Err(EngineError::UnknownStatus(other)),
        }
    }
}

/// Snapshot of a mining session.
///
/// Wire layout (60 bytes, integers little-endian):
///
/// | offset | size | field                |
/// |--------|------|----------------------|
/// | 0      | 1    | mode                 |
/// | 1      | 1    | status               |
/// | 2      | 2    | reserved (zero)      |
/// | 4      | 4    | height               |
/// | 8      | 4    | nonce                |
/// | 12     | 4    | nonce2               |
/// | 16     | 32   | best hash            |
/// | 48     | 4    | hash time (ms)       |
/// | 52     | 8    | hash rate (f64)      |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningReport {
    pub mode: Mode,
    pub status: Status,
    pub height: u32,
    pub nonce: u32,
    pub nonce2: u32,
    pub best_hash: Hash256,
    pub hash_time: u64,
    pub hash_rate: f64,
}

impl MiningReport {
    pub fn to_bytes(&self) -> [u8; REPORT_SIZE] {
        let mut buf = [0u8; REPORT_SIZE];
        buf[0] = self.mode.into();
        buf[1] = self.status.into();
        buf[4..8].copy_from_slice(&self.height.to_le_bytes());
        buf[8..12].copy_from_slice(&self.nonce.to_le_bytes());
        buf[12..16].copy_from_slice(&self.nonce2.to_le_bytes());
        buf[16..48].copy_from_slice(&self.best_hash);
        let hash_time = u32::try_from(self.hash_time).unwrap_or(u32::MAX);
        buf[48..52].copy_from_slice(&hash_time.to_le_bytes());
        buf[52..60].copy_from_slice(&self.hash_rate.to_le_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != REPORT_SIZE {
            return Err(EngineError::InvalidReportLength(bytes.len()));
        }

        let mut best_hash = [0u8; HASH_SIZE];
        best_hash.copy_from_slice(&bytes[16..48]);
        let mut rate = [0u8; 8];
        rate.copy_from_slice(&bytes[52..60]);

        Ok(MiningReport {
            mode: Mode::try_from(bytes[0])?,
            status: Status::try_from(bytes[1])?,
            height: read_u32_le(bytes, 4),
            nonce: read_u32_le(bytes, 8),
            nonce2: read_u32_le(bytes, 12),
            best_hash,
            hash_time: read_u32_le(bytes, 48) as u64,
            hash_rate: f64::from_le_bytes(rate),
        })
    }
}
