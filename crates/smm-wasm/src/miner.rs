//! Mining controller for the WASM host.
//!
//! The host's event loop is the scheduler: it calls [`Miner::mine`] with a
//! small cycle budget between frames and polls [`Miner::report`].

use smm_core::{Engine, EngineProfile, Status};
use wasm_bindgen::prelude::*;

use crate::clock::PerformanceClock;
use crate::state::ReportInfo;

/// The main mining controller.
#[wasm_bindgen]
pub struct Miner {
    engine: Engine<PerformanceClock>,
}

#[wasm_bindgen]
impl Miner {
    /// Create a miner.
    ///
    /// # Arguments
    /// * `profile` - Optional engine profile object, e.g.
    ///   `{ exhaustion: "roll_nonce2", coinbase_cap: 128 }`. Missing fields
    ///   take their defaults; `undefined` or `null` selects the default profile.
    #[wasm_bindgen(constructor)]
    pub fn new(profile: JsValue) -> Result<Miner, JsValue> {
        let profile = if profile.is_undefined() || profile.is_null() {
            EngineProfile::default()
        } else {
            serde_wasm_bindgen::from_value(profile)
                .map_err(|e| JsValue::from_str(&format!("Invalid profile: {}", e)))?
        };

        Ok(Miner {
            engine: Engine::new(profile, PerformanceClock::new()),
        })
    }

    /// Start new work with a coinbase fragment. Returns the status code.
    #[wasm_bindgen]
    pub fn begin(&mut self, coinbase: &[u8]) -> Result<u8, JsValue> {
        self.engine
            .begin(coinbase)
            .map(u8::from)
            .map_err(|e| rejected("coinbase", e))
    }

    /// Configure the work from an 80-byte header and concatenated 32-byte
    /// Merkle siblings. Returns the status code.
    #[wasm_bindgen]
    pub fn init(&mut self, height: u32, header: &[u8], path: &[u8]) -> Result<u8, JsValue> {
        self.engine
            .init_from_bytes(height, header, path)
            .map(u8::from)
            .map_err(|e| rejected("work", e))
    }

    /// [`Miner::init`] with hex-encoded header and path.
    #[wasm_bindgen]
    pub fn init_hex(&mut self, height: u32, header_hex: &str, path_hex: &str) -> Result<u8, JsValue> {
        let header = hex::decode(header_hex)
            .map_err(|_| JsValue::from_str("Invalid header hex"))?;
        let path = hex::decode(path_hex)
            .map_err(|_| JsValue::from_str("Invalid merkle path hex"))?;
        self.init(height, &header, &path)
    }

    /// Hash at most `cycles` nonces. Returns the status code.
    #[wasm_bindgen]
    pub fn mine(&mut self, cycles: u32) -> u8 {
        self.engine.mine(cycles).into()
    }

    /// Hash one default-sized chunk. Returns the status code.
    #[wasm_bindgen]
    pub fn mine_chunk(&mut self) -> u8 {
        self.engine.mine_chunk().into()
    }

    /// Return to idle. Session data stays readable.
    #[wasm_bindgen]
    pub fn end(&mut self) {
        self.engine.end();
    }

    /// Current status code.
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.engine.status().into()
    }

    /// Whether the current assignment is over (done or failed).
    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool {
        self.engine.status().is_finished()
    }

    /// Whether a hash met the target.
    #[wasm_bindgen(getter)]
    pub fn found(&self) -> bool {
        self.engine.status() == Status::Done
    }

    /// Mining report as a JS object.
    #[wasm_bindgen]
    pub fn report(&self) -> Result<JsValue, JsValue> {
        ReportInfo::from(&self.engine.report()).to_js()
    }

    /// Mining report in its fixed 60-byte wire layout.
    #[wasm_bindgen]
    pub fn report_bytes(&self) -> Vec<u8> {
        self.engine.report().to_bytes().to_vec()
    }

    /// The live 80-byte header as hex, winning nonce included once found.
    #[wasm_bindgen]
    pub fn header_hex(&self) -> String {
        hex::encode(self.engine.header().to_bytes())
    }

    /// The last configuration error message, if any.
    #[wasm_bindgen(getter)]
    pub fn last_error(&self) -> Option<String> {
        self.engine.last_error().map(|e| e.to_string())
    }

    /// Firmware version this engine speaks for.
    #[wasm_bindgen]
    pub fn firmware_version(&self) -> String {
        self.engine.firmware_version().to_string()
    }
}

fn rejected(what: &str, err: smm_core::EngineError) -> JsValue {
    let message = format!("Rejected {}: {}", what, err);
    console_log(&message);
    JsValue::from_str(&message)
}

/// Log to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
