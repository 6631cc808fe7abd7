//! Hash rate estimation from nonce progress and accumulated hash time.

/// Total nonces tried in a session.
///
/// Counts every full 32-bit sweep recorded in `nonce2` plus the distance of
/// the live nonce from where the session started. The sweep count sits in
/// the high word, so the sum cannot overflow and a rollover that leaves the
/// nonce below its start still counts exactly.
pub fn nonces_tried(nonce2: u32, nonce: u32, start_nonce: u32) -> u64 {
    let position = (u64::from(nonce2) << 32) | u64::from(nonce);
    position.saturating_sub(u64::from(start_nonce))
}

/// Hashes per second over the accumulated hash time.
///
/// Returns 0 when no time has been recorded.
pub fn hash_rate(nonce2: u32, nonce: u32, start_nonce: u32, hash_time_millis: u64) -> f64 {
    if hash_time_millis == 0 {
        return 0.0;
    }
    let seconds = hash_time_millis as f64 / 1000.0;
    nonces_tried(nonce2, nonce, start_nonce) as f64 / seconds
}

/// Format a hash rate for display.
pub fn format_hash_rate(rate: f64) -> alloc::string::String {
    if rate >= 1_000_000_000.0 {
        alloc::format!("{:.2} GH/s", rate / 1_000_000_000.0)
    } else if rate >= 1_000_000.0 {
        alloc::format!("{:.2} MH/s", rate / 1_000_000.0)
    } else if rate >= 1_000.0 {
        alloc::format!("{:.2} KH/s", rate / 1_000.0)
    } else {
        alloc::format!("{:.2} H/s", rate)
    }
}
