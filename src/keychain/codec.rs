//! Entry codec: plaintext value <-> sealed, text-encoded blob.
//!
//! Values are padded on the right with NUL bytes to a fixed 64-byte
//! width before encryption, so every stored blob has the same length
//! and ciphertext size leaks nothing about the true value length.
//! The entry's blinded name is bound as associated data, so a blob
//! moved under a different store key fails authentication.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroize;

use crate::crypto::{open, seal};
use crate::errors::{KeyloomError, Result};

/// Maximum value length in bytes; also the fixed padded width.
pub const MAX_VALUE_LEN: usize = 64;

/// Padding byte appended to values shorter than [`MAX_VALUE_LEN`].
const PAD_BYTE: u8 = 0x00;

/// Pad, seal, and text-encode a value under the encryption subkey.
///
/// `blinded_name` is the store key the blob will live under; it is
/// authenticated (as associated data) but not encrypted.
///
/// Values longer than [`MAX_VALUE_LEN`] bytes are rejected rather than
/// truncated, as are values ending in a NUL byte (they would not
/// round-trip through padding removal).
pub fn encode_entry(encryption_key: &[u8], blinded_name: &str, value: &str) -> Result<String> {
    if value.len() > MAX_VALUE_LEN {
        return Err(KeyloomError::InvalidInput(format!(
            "value exceeds the maximum length of {MAX_VALUE_LEN} bytes (got {})",
            value.len()
        )));
    }
    if value.as_bytes().last() == Some(&PAD_BYTE) {
        return Err(KeyloomError::InvalidInput(
            "value must not end with a NUL byte".into(),
        ));
    }

    let mut padded = [PAD_BYTE; MAX_VALUE_LEN];
    padded[..value.len()].copy_from_slice(value.as_bytes());

    let sealed = seal(encryption_key, blinded_name.as_bytes(), &padded);
    padded.zeroize();

    Ok(BASE64.encode(sealed?))
}

/// Decode, open, and unpad a blob produced by `encode_entry`.
///
/// Any failure — bad text encoding, truncated blob, tag mismatch,
/// wrong blinded name — surfaces as `TamperDetected`: by the time this
/// runs the password has already been validated at load time, so a
/// failure here is an integrity signal, not a credential one.
pub fn decode_entry(encryption_key: &[u8], blinded_name: &str, blob: &str) -> Result<String> {
    let sealed = BASE64
        .decode(blob)
        .map_err(|_| KeyloomError::TamperDetected)?;

    let mut padded = open(encryption_key, blinded_name.as_bytes(), &sealed)?;

    // Strip the right-padding; everything before it is the value.
    let value_len = padded
        .iter()
        .rposition(|&b| b != PAD_BYTE)
        .map_or(0, |i| i + 1);
    let value = String::from_utf8(padded[..value_len].to_vec()).map_err(|_| {
        padded.zeroize();
        KeyloomError::TamperDetected
    })?;
    padded.zeroize();

    Ok(value)
}
