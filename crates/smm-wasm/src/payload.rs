//! Payload cipher bindings for the host's transport code.
//!
//! Buffers are passed as `Uint8Array`s and updated in place; keys are
//! `Uint32Array`s of exactly four words.

use smm_core::CipherKey;
use wasm_bindgen::prelude::*;

fn key_from_words(key: &[u32]) -> Result<CipherKey, JsValue> {
    match key {
        [a, b, c, d] => Ok(CipherKey::new([*a, *b, *c, *d])),
        _ => Err(JsValue::from_str("Cipher key must be 4 words")),
    }
}

/// Pad and encrypt the first `payload_len` bytes of `buf` in place.
///
/// Returns the encrypted length. On a capacity error the buffer is left
/// untouched and an error is thrown.
#[wasm_bindgen]
pub fn encrypt_payload(buf: &mut [u8], payload_len: usize, key: &[u32]) -> Result<usize, JsValue> {
    let key = key_from_words(key)?;
    smm_core::encrypt(buf, payload_len, &key).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decrypt `buf` in place and return the payload length.
#[wasm_bindgen]
pub fn decrypt_payload(buf: &mut [u8], key: &[u32]) -> Result<usize, JsValue> {
    let key = key_from_words(key)?;
    smm_core::decrypt(buf, &key).map_err(|e| JsValue::from_str(&e.to_string()))
}
