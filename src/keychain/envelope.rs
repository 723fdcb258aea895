//! Portable envelope format and detached-digest verification.
//!
//! A dumped keychain is a single JSON document:
//!
//! ```text
//! { "salt": "<base64 16 bytes>", "kvs": { "<blinded name>": "<blob>", ... } }
//! ```
//!
//! The store is a `BTreeMap`, so serialization always emits keys in
//! sorted order and the same contents produce the same bytes.  That
//! makes the companion digest — SHA-256 over the exact serialized text,
//! base64-encoded — reproducible, which is what lets a caller detect a
//! rolled-back or substituted file between `dump` and a later `load`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::crypto::SALT_LEN;
use crate::errors::{KeyloomError, Result};

/// The serialized form of a keychain: public salt plus the blinded
/// key-value store.  The master key is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// The KDF salt (base64 in JSON). Public, immutable for the
    /// lifetime of the keychain.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// Blinded entry name -> sealed, text-encoded blob.
    pub kvs: BTreeMap<String, String>,
}

impl Envelope {
    /// Serialize to canonical JSON and compute the detached digest.
    ///
    /// Returns `(serialized_text, digest)`.  The digest covers the
    /// exact text bytes, so the caller must persist the text verbatim
    /// for a later digest check to pass.
    pub fn serialize(&self) -> Result<(String, String)> {
        let text = serde_json::to_string(self)
            .map_err(|e| KeyloomError::SerializationError(format!("envelope: {e}")))?;
        let digest = compute_digest(text.as_bytes());
        Ok((text, digest))
    }

    /// Parse a serialized envelope, optionally checking its digest.
    ///
    /// Every failure mode — digest mismatch, malformed JSON, missing
    /// `salt` or `kvs`, wrong salt length — collapses to the coarse
    /// `AuthenticationFailure` so the error itself is not an oracle.
    pub fn parse(text: &str, expected_digest: Option<&str>) -> Result<Self> {
        if let Some(expected) = expected_digest {
            let actual = compute_digest(text.as_bytes());
            if !bool::from(actual.as_bytes().ct_eq(expected.as_bytes())) {
                return Err(KeyloomError::AuthenticationFailure);
            }
        }

        let envelope: Envelope =
            serde_json::from_str(text).map_err(|_| KeyloomError::AuthenticationFailure)?;

        if envelope.salt.len() != SALT_LEN {
            return Err(KeyloomError::AuthenticationFailure);
        }

        Ok(envelope)
    }
}

/// SHA-256 over `bytes`, base64-encoded.
pub fn compute_digest(bytes: &[u8]) -> String {
    BASE64.encode(Sha256::digest(bytes))
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
