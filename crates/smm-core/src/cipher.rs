//! Payload cipher: XXTEA over little-endian 32-bit words with count padding.
//!
//! Encryption always appends 1 to 4 padding bytes, each holding the padding
//! count, so the padded length is a whole number of words. Decryption reads
//! the count back from the final plaintext byte.

use alloc::vec::Vec;

use crate::error::CipherError;

const DELTA: u32 = 0x9E37_79B9;

/// Word size the cipher operates on.
const WORD: usize = 4;

/// 128-bit cipher key as four 32-bit words.
///
/// Supplied by the transport layer; the engine never generates or stores it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CipherKey([u32; 4]);

impl CipherKey {
    pub const fn new(words: [u32; 4]) -> Self {
        CipherKey(words)
    }

    /// Build a key from 16 bytes laid out as little-endian words.
    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(WORD)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        CipherKey(words)
    }

    pub fn words(&self) -> &[u32; 4] {
        &self.0
    }
}

impl core::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("CipherKey(..)")
    }
}

#[inline]
fn mx(sum: u32, y: u32, z: u32, p: usize, e: usize, key: &[u32; 4]) -> u32 {
    (((z >> 5) ^ (y << 2)).wrapping_add((y >> 3) ^ (z << 4)))
        ^ ((sum ^ y).wrapping_add(key[(p & 3) ^ e] ^ z))
}

/// Encrypt words in place. Blocks shorter than two words pass through.
pub fn xxtea_encode(v: &mut [u32], key: &CipherKey) {
    let n = v.len();
    if n < 2 {
        return;
    }
    let key = key.words();
    let mut rounds = 6 + 52 / n;
    let mut sum: u32 = 0;
    let mut z = v[n - 1];

    while rounds > 0 {
        sum = sum.wrapping_add(DELTA);
        let e = ((sum >> 2) & 3) as usize;
        for p in 0..n {
            let y = v[(p + 1) % n];
            v[p] = v[p].wrapping_add(mx(sum, y, z, p, e, key));
            z = v[p];
        }
        rounds -= 1;
    }
}

/// Decrypt words in place. Blocks shorter than two words pass through.
pub fn xxtea_decode(v: &mut [u32], key: &CipherKey) {
    let n = v.len();
    if n < 2 {
        return;
    }
    let key = key.words();
    let mut rounds = 6 + 52 / n;
    let mut sum = (rounds as u32).wrapping_mul(DELTA);
    let mut y = v[0];

    while rounds > 0 {
        let e = ((sum >> 2) & 3) as usize;
        for p in (0..n).rev() {
            let z = v[(p + n - 1) % n];
            v[p] = v[p].wrapping_sub(mx(sum, y, z, p, e, key));
            y = v[p];
        }
        sum = sum.wrapping_sub(DELTA);
        rounds -= 1;
    }
}

fn load_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(WORD)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn store_words(words: &[u32], bytes: &mut [u8]) {
    for (chunk, word) in bytes.chunks_exact_mut(WORD).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

/// Pad and encrypt the first `payload_len` bytes of `buf` in place.
///
/// The whole of `buf` is the available capacity. Returns the encrypted
/// length, or 0 for an empty payload (nothing is written). When the padded
/// payload would not fit, the buffer is left untouched.
pub fn encrypt(buf: &mut [u8], payload_len: usize, key: &CipherKey) -> Result<usize, CipherError> {
    if payload_len == 0 {
        return Ok(0);
    }

    let padding = WORD - payload_len % WORD;
    let padded_len = match payload_len.checked_add(padding) {
        Some(len) if len <= buf.len() => len,
        Some(len) => {
            return Err(CipherError::CapacityExceeded {
                needed: len,
                capacity: buf.len(),
            })
        }
        None => {
            return Err(CipherError::CapacityExceeded {
                needed: usize::MAX,
                capacity: buf.len(),
            })
        }
    };

    buf[payload_len..padded_len].fill(padding as u8);

    let region = &mut buf[..padded_len];
    let mut words = load_words(region);
    xxtea_encode(&mut words, key);
    store_words(&words, region);

    Ok(padded_len)
}

/// Decrypt `buf` in place and return the unpadded payload length.
///
/// `buf` must hold a whole number of words; anything else is rejected
/// before the buffer is touched.
pub fn decrypt(buf: &mut [u8], key: &CipherKey) -> Result<usize, CipherError> {
    let len = buf.len();
    if len == 0 || len % WORD != 0 {
        return Err(CipherError::MalformedLength(len));
    }

    let mut words = load_words(buf);
    xxtea_decode(&mut words, key);
    store_words(&words, buf);

    let padding = buf[len - 1];
    if padding == 0 || padding as usize > WORD {
        return Err(CipherError::InvalidPadding(padding));
    }

    Ok(len - padding as usize)
}
