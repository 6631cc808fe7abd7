//! The mining work engine.
//!
//! One engine owns one [`MiningSession`]. A session is started with
//! [`Engine::begin`], configured once with [`Engine::init`], advanced with
//! bounded [`Engine::mine`] calls, and parked with [`Engine::end`]:
//!
//! ```text
//! Idle --begin--> Ready --init--> Mining --mine--> Done | Fail
//!                   |                 ^
//!                   +--init (bad)--> Error
//! ```
//!
//! Nothing here blocks or spawns; `mine` hashes at most `cycles` nonces and
//! returns, so the engine can live inside a cooperative host loop.

use alloc::vec::Vec;
use tracing::{debug, info, warn};

use crate::block::BlockHeader;
use crate::clock::Clock;
use crate::coinbase::build_coinbase;
use crate::config::{EngineProfile, ExhaustionPolicy, MerkleMode};
use crate::difficulty::Target;
use crate::error::{EngineError, Result};
use crate::hash::Hash256;
use crate::hashrate::hash_rate;
use crate::merkle::{compute_merkle_root, MerklePath};
use crate::report::{MiningReport, Status};
use crate::search::{search_nonces, BestHash, SearchOutcome};

/// Firmware version this engine speaks for.
pub const FIRMWARE_VERSION: &str = "1.0.0-A";

/// Work assignment state, created fresh by every `begin`.
#[derive(Debug, Clone, Default)]
pub struct MiningSession {
    height: u32,
    fragment: Vec<u8>,
    coinbase: Vec<u8>,
    merkle_path: MerklePath,
    header: BlockHeader,
    target: Option<Target>,
    best: BestHash,
    nonce2: u32,
    start_nonce: u32,
    hash_time: u64,
}

impl MiningSession {
    fn new(fragment: &[u8]) -> Self {
        MiningSession {
            fragment: fragment.to_vec(),
            ..Self::default()
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The coinbase as hashed: height tag, fragment, optional nonce2.
    pub fn coinbase(&self) -> &[u8] {
        &self.coinbase
    }

    pub fn merkle_path(&self) -> &MerklePath {
        &self.merkle_path
    }

    pub fn best_hash(&self) -> &Hash256 {
        &self.best.hash
    }

    pub fn best_nonce(&self) -> u32 {
        self.best.nonce
    }

    /// The nonce2 the best hash was found under.
    pub fn best_nonce2(&self) -> u32 {
        self.best.nonce2
    }

    pub fn nonce2(&self) -> u32 {
        self.nonce2
    }

    pub fn start_nonce(&self) -> u32 {
        self.start_nonce
    }

    /// Milliseconds spent inside `mine`.
    pub fn hash_time(&self) -> u64 {
        self.hash_time
    }

    fn nonce2_suffix(&self, policy: ExhaustionPolicy) -> Option<u32> {
        match policy {
            ExhaustionPolicy::RollNonce2 => Some(self.nonce2),
            ExhaustionPolicy::Fail => None,
        }
    }
}

/// Proof-of-work search engine driven one bounded chunk at a time.
pub struct Engine<C> {
    profile: EngineProfile,
    clock: C,
    status: Status,
    session: MiningSession,
    last_error: Option<EngineError>,
}

impl<C: Clock> Engine<C> {
    pub fn new(profile: EngineProfile, clock: C) -> Self {
        Engine {
            profile,
            clock,
            status: Status::Idle,
            session: MiningSession::default(),
            last_error: None,
        }
    }

    pub fn firmware_version(&self) -> &'static str {
        FIRMWARE_VERSION
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn profile(&self) -> &EngineProfile {
        &self.profile
    }

    pub fn session(&self) -> &MiningSession {
        &self.session
    }

    /// The live header, nonce included.
    pub fn header(&self) -> &BlockHeader {
        &self.session.header
    }

    /// The decoded target, once `init` has succeeded.
    pub fn target(&self) -> Option<&Target> {
        self.session.target.as_ref()
    }

    /// The most recent configuration error, cleared by a successful
    /// `begin` or `init`.
    pub fn last_error(&self) -> Option<EngineError> {
        self.last_error
    }

    /// Start a new assignment with a coinbase fragment.
    ///
    /// On success every session field is reset and the engine is `Ready`.
    /// An oversized fragment is rejected without touching the engine.
    pub fn begin(&mut self, fragment: &[u8]) -> Result<Status> {
        if fragment.len() > self.profile.coinbase_cap {
            let err = EngineError::CoinbaseTooLarge {
                len: fragment.len(),
                max: self.profile.coinbase_cap,
            };
            warn!(error = %err, "rejected coinbase fragment");
            self.last_error = Some(err);
            return Err(err);
        }

        self.session = MiningSession::new(fragment);
        self.status = Status::Ready;
        self.last_error = None;
        debug!(len = fragment.len(), "work begun");
        Ok(self.status)
    }

    /// Configure the assignment: height tag, Merkle root and target.
    ///
    /// Any rejection leaves the engine in `Status::Error` with no target.
    pub fn init(&mut self, height: u32, header: BlockHeader, path: &[Hash256]) -> Result<Status> {
        let path = match MerklePath::new(path.to_vec()) {
            Ok(path) => path,
            Err(err) => return self.reject(err),
        };
        self.configure(height, header, path)
    }

    /// [`Engine::init`] from wire bytes: an 80-byte header and
    /// concatenated 32-byte siblings.
    pub fn init_from_bytes(&mut self, height: u32, header: &[u8], path: &[u8]) -> Result<Status> {
        let header = match BlockHeader::from_bytes(header) {
            Ok(header) => header,
            Err(err) => return self.reject(err),
        };
        let path = match MerklePath::from_bytes(path) {
            Ok(path) => path,
            Err(err) => return self.reject(err),
        };
        self.configure(height, header, path)
    }

    fn configure(&mut self, height: u32, header: BlockHeader, path: MerklePath) -> Result<Status> {
        let suffix = self.session.nonce2_suffix(self.profile.exhaustion);
        let coinbase = match build_coinbase(height, &self.session.fragment, suffix) {
            Ok(coinbase) => coinbase,
            Err(err) => return self.reject(err),
        };

        let session = &mut self.session;
        session.height = height;
        session.coinbase = coinbase;
        session.merkle_path = path;
        session.header = header;
        if self.profile.merkle_mode == MerkleMode::Reconstruct {
            session.header.merkle_root = compute_merkle_root(&session.coinbase, &session.merkle_path);
        }

        let target = match Target::from_bits(header.bits) {
            Ok(target) => target,
            Err(err) => return self.reject(err),
        };
        self.session.target = Some(target);
        self.session.start_nonce = header.nonce;
        self.status = Status::Mining;
        self.last_error = None;

        debug!(
            height,
            bits = header.bits,
            path_len = self.session.merkle_path.len(),
            start_nonce = header.nonce,
            "work configured"
        );
        Ok(self.status)
    }

    fn reject(&mut self, err: EngineError) -> Result<Status> {
        warn!(error = %err, "rejected work configuration");
        self.session.target = None;
        self.status = Status::Error;
        self.last_error = Some(err);
        Err(err)
    }

    /// Hash at most `cycles` nonces.
    ///
    /// Does nothing unless the engine is `Mining`. Stops early on success
    /// (`Done`) or when the nonce space is exhausted (`Fail`, or a nonce2
    /// rollover under [`ExhaustionPolicy::RollNonce2`]). Time spent here is
    /// added to the session's hash time.
    pub fn mine(&mut self, cycles: u32) -> Status {
        if self.status != Status::Mining {
            return self.status;
        }
        let target = match self.session.target {
            Some(target) => target,
            None => return self.status,
        };

        let started = self.clock.now_millis();
        let mut remaining = cycles;

        while remaining > 0 {
            let session = &mut self.session;
            let result = search_nonces(
                &mut session.header,
                session.nonce2,
                &target,
                &mut session.best,
                remaining,
            );
            remaining -= result.hashes;

            match result.outcome {
                SearchOutcome::Found { nonce, hash } => {
                    info!(nonce, nonce2 = session.nonce2, hash = %hex::encode(hash), "target met");
                    self.status = Status::Done;
                    break;
                }
                SearchOutcome::Exhausted => {
                    if !self.roll_nonce2() {
                        info!(nonce2 = self.session.nonce2, "nonce space exhausted");
                        self.status = Status::Fail;
                        break;
                    }
                }
                SearchOutcome::Pending => break,
            }
        }

        let elapsed = self.clock.now_millis().saturating_sub(started);
        self.session.hash_time = self.session.hash_time.saturating_add(elapsed);
        self.status
    }

    /// [`Engine::mine`] with the profile's default chunk size.
    pub fn mine_chunk(&mut self) -> Status {
        self.mine(self.profile.default_cycles)
    }

    /// Move to the next nonce2 and rebuild the Merkle root.
    ///
    /// Returns false when the profile does not roll, when the root is
    /// supplied by the caller (rolling could not change the header), or
    /// when nonce2 is itself exhausted.
    fn roll_nonce2(&mut self) -> bool {
        if self.profile.exhaustion != ExhaustionPolicy::RollNonce2
            || self.profile.merkle_mode != MerkleMode::Reconstruct
        {
            return false;
        }

        let session = &mut self.session;
        let nonce2 = match session.nonce2.checked_add(1) {
            Some(nonce2) => nonce2,
            None => return false,
        };
        let coinbase = match build_coinbase(session.height, &session.fragment, Some(nonce2)) {
            Ok(coinbase) => coinbase,
            Err(_) => return false,
        };

        session.nonce2 = nonce2;
        session.coinbase = coinbase;
        session.header.merkle_root = compute_merkle_root(&session.coinbase, &session.merkle_path);
        session.header.nonce = 0;
        info!(nonce2, "rolled extended nonce counter");
        true
    }

    /// Park the engine. Session data is kept until the next `begin`.
    pub fn end(&mut self) {
        debug!(status = ?self.status, "work ended");
        self.status = Status::Idle;
    }

    /// Snapshot the session. Valid in every state.
    ///
    /// `nonce` and `nonce2` are the pair that produced `best_hash`: the
    /// winner once `Done`, otherwise the best candidate so far. They can lag
    /// the live search position after a rollover.
    pub fn report(&self) -> MiningReport {
        let session = &self.session;
        MiningReport {
            mode: self.profile.mode,
            status: self.status,
            height: session.height,
            nonce: session.best.nonce,
            nonce2: session.best.nonce2,
            best_hash: session.best.hash,
            hash_time: session.hash_time,
            hash_rate: hash_rate(
                session.nonce2,
                session.header.nonce,
                session.start_nonce,
                session.hash_time,
            ),
        }
    }
}

#[cfg(feature = "std")]
impl Default for Engine<crate::clock::SystemClock> {
    fn default() -> Self {
        Engine::new(EngineProfile::default(), crate::clock::SystemClock::new())
    }
}
