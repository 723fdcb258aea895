//! Keychain module — the encrypted credential store.
//!
//! This module provides:
//! - The entry codec: fixed-width padding + sealed, text-encoded blobs (`codec`)
//! - The portable envelope format with its detached digest (`envelope`)
//! - The high-level `Keychain` facade (`store`)

pub mod codec;
pub mod envelope;
pub mod store;

// Re-export the most commonly used items.
pub use codec::MAX_VALUE_LEN;
pub use envelope::Envelope;
pub use store::Keychain;
