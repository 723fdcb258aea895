use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Keyloom.
#[derive(Debug, Error)]
pub enum KeyloomError {
    // --- Input validation ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Keychain errors ---
    //
    // AuthenticationFailure is deliberately a unit variant with a fixed
    // message: a malformed envelope, a digest mismatch, and a wrong
    // password must all read identically to the caller.
    #[error("Authentication failed — wrong password or invalid keychain")]
    AuthenticationFailure,

    #[error("Entry authentication failed — stored data may be tampered")]
    TamperDetected,

    #[error("Keychain not found at {0}")]
    KeychainNotFound(PathBuf),

    #[error("Keychain already exists at {0}")]
    KeychainAlreadyExists(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Keyloom results.
pub type Result<T> = std::result::Result<T, KeyloomError>;
