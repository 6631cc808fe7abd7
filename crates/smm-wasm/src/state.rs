//! JS-facing views of engine state.

use serde::{Deserialize, Serialize};
use smm_core::hash::{count_leading_zeros, hash_to_hex};
use smm_core::hashrate::format_hash_rate;
use smm_core::{MiningReport, Mode, Status};
use wasm_bindgen::prelude::*;

/// Mining report with hashes rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfo {
    /// Hashing mode ("emulated" or "hardware").
    pub mode: Mode,
    /// Engine status name.
    pub status: Status,
    /// Numeric status code, stable across releases.
    pub status_code: u8,
    /// Block height of the assignment.
    pub height: u32,
    /// Nonce paired with the best hash.
    pub nonce: u32,
    /// Extended nonce counter the best hash was found under.
    pub nonce2: u32,
    /// Best (lowest) hash so far, hex.
    pub best_hash: String,
    /// Leading zero bits of the best hash.
    pub best_leading_zeros: u32,
    /// Milliseconds spent hashing.
    pub hash_time_ms: u64,
    /// Hashes per second.
    pub hash_rate: f64,
    /// Formatted hash rate, e.g. "1.20 KH/s".
    pub hash_rate_display: String,
}

impl From<&MiningReport> for ReportInfo {
    fn from(report: &MiningReport) -> Self {
        ReportInfo {
            mode: report.mode,
            status: report.status,
            status_code: report.status.into(),
            height: report.height,
            nonce: report.nonce,
            nonce2: report.nonce2,
            best_hash: hash_to_hex(&report.best_hash),
            best_leading_zeros: count_leading_zeros(&report.best_hash),
            hash_time_ms: report.hash_time,
            hash_rate: report.hash_rate,
            hash_rate_display: format_hash_rate(report.hash_rate),
        }
    }
}

impl ReportInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}
