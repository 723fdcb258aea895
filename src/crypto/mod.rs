//! Cryptographic primitives for Keyloom.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption with associated data (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - Master-key wrapper, subkey derivation, and entry-name blinding (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_master_key, ...};
pub use encryption::{open, seal};
pub use kdf::{derive_master_key, generate_salt, PBKDF2_ROUNDS, SALT_LEN};
pub use keys::{blind_name, derive_subkeys, MasterKey, Subkeys};
