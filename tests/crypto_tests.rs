//! Integration tests for the Keyloom crypto module.

use keyloom::crypto::keys::{blind_name, derive_subkeys, MasterKey};
use keyloom::crypto::{derive_master_key, generate_salt, open, seal};

// ---------------------------------------------------------------------------
// Seal/open round-trip
// ---------------------------------------------------------------------------

#[test]
fn seal_open_roundtrip() {
    let key = [0xABu8; 32];
    let aad = b"entry-id";
    let plaintext = b"hunter2";

    let sealed = seal(&key, aad, plaintext).expect("seal should succeed");

    // Sealed blob must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(sealed.len() > plaintext.len());

    let recovered = open(&key, aad, &sealed).expect("open should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn seal_produces_different_blob_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same value";

    let s1 = seal(&key, b"", plaintext).expect("seal 1");
    let s2 = seal(&key, b"", plaintext).expect("seal 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(s1, s2, "two seals of the same plaintext must differ");
}

#[test]
fn open_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];

    let sealed = seal(&key, b"", b"secret").expect("seal");
    assert!(
        open(&wrong_key, b"", &sealed).is_err(),
        "opening with the wrong key must fail"
    );
}

#[test]
fn open_with_wrong_aad_fails() {
    let key = [0x33u8; 32];

    let sealed = seal(&key, b"entry-a", b"secret").expect("seal");
    assert!(
        open(&key, b"entry-b", &sealed).is_err(),
        "opening under different associated data must fail"
    );
}

#[test]
fn open_with_truncated_data_fails() {
    // Anything shorter than 12 bytes (nonce length) should fail.
    let key = [0xAAu8; 32];
    assert!(open(&key, b"", &[0u8; 5]).is_err());
}

#[test]
fn open_with_corrupted_ciphertext_fails() {
    let key = [0xBBu8; 32];

    let mut sealed = seal(&key, b"", b"value").expect("seal");
    // Flip a byte in the ciphertext portion (after the 12-byte nonce).
    if let Some(byte) = sealed.get_mut(15) {
        *byte ^= 0xFF;
    }

    assert!(
        open(&key, b"", &sealed).is_err(),
        "corrupted ciphertext must fail auth check"
    );
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2-HMAC-SHA256)
// ---------------------------------------------------------------------------

#[test]
fn derive_master_key_same_inputs_same_output() {
    let salt = generate_salt();

    let key1 = derive_master_key("my-secure-passphrase", &salt).expect("derive 1");
    let key2 = derive_master_key("my-secure-passphrase", &salt).expect("derive 2");

    assert_eq!(key1, key2, "same password + salt must produce the same key");
}

#[test]
fn derive_master_key_different_salts_different_keys() {
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_master_key("same-password", &salt1).expect("derive 1");
    let key2 = derive_master_key("same-password", &salt2).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_master_key_different_passwords_different_keys() {
    let salt = generate_salt();

    let key1 = derive_master_key("password-one", &salt).expect("derive 1");
    let key2 = derive_master_key("password-two", &salt).expect("derive 2");

    assert_ne!(
        key1, key2,
        "different passwords must produce different keys"
    );
}

#[test]
fn derive_master_key_rejects_empty_password() {
    let salt = generate_salt();
    assert!(derive_master_key("", &salt).is_err());
}

#[test]
fn derive_master_key_rejects_bad_salt_length() {
    assert!(derive_master_key("password", &[0u8; 8]).is_err());
}

// ---------------------------------------------------------------------------
// Subkey derivation
// ---------------------------------------------------------------------------

#[test]
fn subkeys_are_domain_separated() {
    let master = MasterKey::new([0x99u8; 32]);
    let subkeys = derive_subkeys(&master).expect("derive subkeys");

    assert_ne!(
        subkeys.naming, subkeys.encryption,
        "naming and encryption keys must be independent"
    );
}

#[test]
fn subkey_derivation_is_idempotent() {
    let master = MasterKey::new([0x77u8; 32]);

    let s1 = derive_subkeys(&master).expect("derive 1");
    let s2 = derive_subkeys(&master).expect("derive 2");

    assert_eq!(s1.naming, s2.naming);
    assert_eq!(s1.encryption, s2.encryption);
}

#[test]
fn different_master_keys_produce_different_subkeys() {
    let s1 = derive_subkeys(&MasterKey::new([0x01u8; 32])).expect("derive 1");
    let s2 = derive_subkeys(&MasterKey::new([0x02u8; 32])).expect("derive 2");

    assert_ne!(s1.naming, s2.naming);
    assert_ne!(s1.encryption, s2.encryption);
}

// ---------------------------------------------------------------------------
// Entry-name blinding
// ---------------------------------------------------------------------------

#[test]
fn blind_name_is_deterministic() {
    let master = MasterKey::new([0x44u8; 32]);
    let subkeys = derive_subkeys(&master).expect("subkeys");

    let b1 = blind_name(&subkeys.naming, "email").expect("blind 1");
    let b2 = blind_name(&subkeys.naming, "email").expect("blind 2");
    assert_eq!(b1, b2, "same name must blind to the same value");
}

#[test]
fn blind_name_differs_per_name() {
    let master = MasterKey::new([0x44u8; 32]);
    let subkeys = derive_subkeys(&master).expect("subkeys");

    let b1 = blind_name(&subkeys.naming, "email").expect("blind email");
    let b2 = blind_name(&subkeys.naming, "bank").expect("blind bank");
    assert_ne!(b1, b2);
}

#[test]
fn blind_name_reveals_nothing_of_the_name() {
    let master = MasterKey::new([0x12u8; 32]);
    let subkeys = derive_subkeys(&master).expect("subkeys");

    let blinded = blind_name(&subkeys.naming, "very-secret-account-name").expect("blind");
    assert!(!blinded.contains("very-secret-account-name"));
    assert!(!blinded.contains("secret"));
}

// ---------------------------------------------------------------------------
// End-to-end: password -> master key -> subkeys -> seal/open
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let salt = generate_salt();

    // Step 1: Derive master key from password.
    let master = MasterKey::new(derive_master_key("hunter2", &salt).expect("derive master"));

    // Step 2: Derive the subkeys.
    let subkeys = derive_subkeys(&master).expect("derive subkeys");

    // Step 3: Blind a name and seal a value under it.
    let blinded = blind_name(&subkeys.naming, "email").expect("blind");
    let sealed = seal(&subkeys.encryption, blinded.as_bytes(), b"me@example.com").expect("seal");

    // Step 4: Open it back.
    let recovered = open(&subkeys.encryption, blinded.as_bytes(), &sealed).expect("open");
    assert_eq!(recovered, b"me@example.com".to_vec());
}
