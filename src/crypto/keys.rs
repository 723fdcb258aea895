//! Master-key wrapper, subkey derivation, and entry-name blinding.
//!
//! From a single master key we derive two independent subkeys by
//! signing two distinct fixed context strings with HMAC-SHA256:
//! - A **naming key** (context `"hmac-key"`) that blinds entry names.
//! - An **encryption key** (context `"enc-key"`) that seals entry values.
//!
//! Domain separation matters here: the naming key's outputs are written
//! to disk in the clear (they are the store's keys), so it must be
//! unrelated to the key that protects the values.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{KeyloomError, Result};

/// Length of the master key and of each derived subkey (256 bits).
const KEY_LEN: usize = 32;

/// Fixed context string signed to derive the naming key.
const NAMING_CONTEXT: &[u8] = b"hmac-key";

/// Fixed context string signed to derive the encryption key.
const ENCRYPTION_CONTEXT: &[u8] = b"enc-key";

/// A wrapper around the 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// The key never leaves this wrapper during normal operation; the only
/// escape hatch is [`MasterKey::export_bytes`], which exists for
/// external-storage interop and is explicitly security-reducing.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (to feed subkey derivation).
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Export the raw master key bytes.
    ///
    /// This defeats the non-extractable default and should only be used
    /// by callers that genuinely need to persist the key externally.
    /// The returned buffer is zeroized on drop.
    pub fn export_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.bytes.to_vec())
    }
}

/// The two subkeys derived from a master key, zeroized on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Subkeys {
    /// Blinds entry names (HMAC key).
    pub naming: [u8; KEY_LEN],
    /// Seals entry values (AES-256-GCM key).
    pub encryption: [u8; KEY_LEN],
}

/// Derive the naming and encryption subkeys from the master key.
///
/// Pure function of the master key: calling it repeatedly always yields
/// the same pair, so callers recompute on demand instead of caching.
pub fn derive_subkeys(master_key: &MasterKey) -> Result<Subkeys> {
    Ok(Subkeys {
        naming: hmac_sign(master_key.as_bytes(), NAMING_CONTEXT)?,
        encryption: hmac_sign(master_key.as_bytes(), ENCRYPTION_CONTEXT)?,
    })
}

/// Blind a logical entry name under the naming key.
///
/// Returns the base64-encoded HMAC-SHA256 signature of the name. This
/// is what the store uses as its key, so raw names are never persisted.
/// Deterministic: the same name always blinds to the same value under
/// the same naming key.
pub fn blind_name(naming_key: &[u8; KEY_LEN], name: &str) -> Result<String> {
    let sig = hmac_sign(naming_key, name.as_bytes())?;
    Ok(BASE64.encode(sig))
}

/// Internal helper: HMAC-SHA256 of `message` under `key`.
fn hmac_sign(key: &[u8; KEY_LEN], message: &[u8]) -> Result<[u8; KEY_LEN]> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| KeyloomError::KeyDerivationFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}
