//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is fixed and part of the keychain format: the
//! same password + salt must derive the same master key on every
//! implementation, so the work factor is a format constant rather than
//! a tunable.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::{KeyloomError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived master key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Fixed PBKDF2 iteration count. Part of the keychain format.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// Derive a 32-byte master key from a password and salt.
///
/// The same password + salt will always produce the same key. The
/// password must be non-empty; the salt must be exactly [`SALT_LEN`]
/// bytes.
pub fn derive_master_key(password: &str, salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    if password.is_empty() {
        return Err(KeyloomError::InvalidInput(
            "password must not be empty".into(),
        ));
    }
    if salt.len() != SALT_LEN {
        return Err(KeyloomError::KeyDerivationFailed(format!(
            "salt must be {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
