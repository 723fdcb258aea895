//! High-level keychain operations.
//!
//! `Keychain` composes the KDF, subkey derivation, the entry codec, and
//! the envelope format so callers work with plain `get`/`set`/`remove`
//! calls on logical entry names.  Subkeys are a pure function of the
//! master key and are re-derived per operation rather than cached on
//! the instance.

use std::collections::BTreeMap;

use zeroize::Zeroizing;

use crate::crypto::kdf::{derive_master_key, generate_salt, SALT_LEN};
use crate::crypto::keys::{blind_name, derive_subkeys, MasterKey};
use crate::errors::{KeyloomError, Result};
use crate::keychain::codec::{decode_entry, encode_entry};
use crate::keychain::envelope::Envelope;

/// The main keychain handle.  Create one with `Keychain::init` or
/// `Keychain::load`, then use its methods to manage entries.
pub struct Keychain {
    /// The public KDF salt, fixed at creation.
    salt: [u8; SALT_LEN],

    /// The derived master key (zeroized on drop).
    master_key: MasterKey,

    /// Blinded entry name -> sealed, text-encoded blob.  A `BTreeMap`
    /// so serialization and the load-time probe are deterministic.
    kvs: BTreeMap<String, String>,
}

impl Keychain {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a brand-new, empty keychain from a password.
    ///
    /// Generates a random salt and derives the master key with the slow
    /// KDF.  An empty password is rejected with `InvalidInput`.
    pub fn init(password: &str) -> Result<Self> {
        let salt = generate_salt();
        let master_key = MasterKey::new(derive_master_key(password, &salt)?);

        Ok(Self {
            salt,
            master_key,
            kvs: BTreeMap::new(),
        })
    }

    /// Reconstruct a keychain from a dumped envelope.
    ///
    /// Re-derives the master key from the password and the envelope's
    /// salt, then — if the store is non-empty — decrypts the entry with
    /// the lexicographically smallest blinded name as a
    /// password-correctness probe.  Every failure along the way (digest
    /// mismatch, malformed envelope, KDF failure, probe failure)
    /// collapses to the same `AuthenticationFailure` so a caller cannot
    /// tell a wrong password from a corrupted file.
    ///
    /// Known boundary: an envelope with an empty store offers nothing
    /// to probe, so it loads successfully under *any* password.
    pub fn load(password: &str, text: &str, expected_digest: Option<&str>) -> Result<Self> {
        let envelope = Envelope::parse(text, expected_digest)?;

        let salt: [u8; SALT_LEN] = envelope
            .salt
            .as_slice()
            .try_into()
            .map_err(|_| KeyloomError::AuthenticationFailure)?;

        let master_key = MasterKey::new(
            derive_master_key(password, &salt).map_err(|_| KeyloomError::AuthenticationFailure)?,
        );

        // Probe exactly one entry to validate the password.  BTreeMap
        // iteration starts at the smallest key, so the probe target is
        // deterministic.
        if let Some((blinded, blob)) = envelope.kvs.iter().next() {
            let subkeys =
                derive_subkeys(&master_key).map_err(|_| KeyloomError::AuthenticationFailure)?;
            let probe = decode_entry(&subkeys.encryption, blinded, blob)
                .map_err(|_| KeyloomError::AuthenticationFailure)?;
            drop(Zeroizing::new(probe));
        }

        Ok(Self {
            salt,
            master_key,
            kvs: envelope.kvs,
        })
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Decrypt and return the value stored under `name`.
    ///
    /// An absent entry is `Ok(None)`, never an error.  A present entry
    /// that fails authentication is `TamperDetected`.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        let subkeys = derive_subkeys(&self.master_key)?;
        let blinded = blind_name(&subkeys.naming, name)?;

        match self.kvs.get(&blinded) {
            None => Ok(None),
            Some(blob) => Ok(Some(decode_entry(&subkeys.encryption, &blinded, blob)?)),
        }
    }

    /// Add or update the entry for `name`, overwriting unconditionally.
    ///
    /// Values longer than [`crate::keychain::MAX_VALUE_LEN`] bytes are
    /// rejected with `InvalidInput`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let subkeys = derive_subkeys(&self.master_key)?;
        let blinded = blind_name(&subkeys.naming, name)?;
        let blob = encode_entry(&subkeys.encryption, &blinded, value)?;

        self.kvs.insert(blinded, blob);
        Ok(())
    }

    /// Remove the entry for `name`.  Returns whether an entry existed.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let subkeys = derive_subkeys(&self.master_key)?;
        let blinded = blind_name(&subkeys.naming, name)?;

        Ok(self.kvs.remove(&blinded).is_some())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize the keychain to its portable text form.
    ///
    /// Returns `(serialized_text, digest)`.  Pure read: the in-memory
    /// instance is untouched.  The caller is responsible for persisting
    /// both values if it wants rollback detection at the next `load`.
    pub fn dump(&self) -> Result<(String, String)> {
        let envelope = Envelope {
            salt: self.salt.to_vec(),
            kvs: self.kvs.clone(),
        };
        envelope.serialize()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the number of entries in the keychain.
    pub fn entry_count(&self) -> usize {
        self.kvs.len()
    }

    /// Returns the public KDF salt.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Export the raw master key bytes for external storage.
    ///
    /// Security-reducing by design: anything holding these bytes can
    /// decrypt the whole keychain without the password.  Not used by
    /// any normal operation.
    pub fn export_master_key(&self) -> Zeroizing<Vec<u8>> {
        self.master_key.export_bytes()
    }
}
