//! WebAssembly bindings for the solar mining module work engine.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Loading work (coinbase fragment, header, Merkle path)
//! - Mining in bounded chunks from the host event loop
//! - Reading mining reports
//! - Encrypting and decrypting coordinator payloads

use wasm_bindgen::prelude::*;

pub mod clock;
pub mod miner;
pub mod payload;
pub mod state;

// Re-export main types for JS access
pub use miner::Miner;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
