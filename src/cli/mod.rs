//! CLI module — Clap argument parser, output helpers, file persistence,
//! and command implementations.

pub mod commands;
pub mod output;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{KeyloomError, Result};
use crate::keychain::Keychain;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Keyloom CLI: encrypted credential keychain with blinded entry names.
#[derive(Parser)]
#[command(
    name = "keyloom",
    about = "Encrypted credential keychain manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Keychain to use (default: from .keyloom.toml, else "default")
    #[arg(short, long, global = true)]
    pub keychain: Option<String>,

    /// Keychain directory (default: .keyloom)
    #[arg(long, global = true)]
    pub dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new keychain
    Init,

    /// Set an entry (add or update)
    Set {
        /// Entry name (e.g. email)
        key: String,
        /// Entry value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Get an entry's value
    Get {
        /// Entry name
        key: String,
    },

    /// Remove an entry
    Remove {
        /// Entry name
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List blinded entry ids (no password required)
    Entries,

    /// Check the keychain file against its digest sidecar
    Verify,

    /// Export the raw master key (security-reducing)
    ExportKey {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate for: bash, zsh, fish, powershell, elvish
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Password prompts
// ---------------------------------------------------------------------------

/// Get the keychain password.
///
/// Order of precedence:
/// 1. `KEYLOOM_PASSWORD` environment variable (CI/CD friendly)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("KEYLOOM_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter keychain password")
        .interact()
        .map_err(|e| KeyloomError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `init`).
///
/// Also respects `KEYLOOM_PASSWORD` for scripted/CI usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("KEYLOOM_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(KeyloomError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose keychain password")
            .with_confirmation(
                "Confirm keychain password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| KeyloomError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

// ---------------------------------------------------------------------------
// Path resolution and file persistence
// ---------------------------------------------------------------------------

/// Resolved locations of a keychain file and its digest sidecar.
pub struct KeychainPaths {
    /// `<dir>/<name>.keychain` — the serialized envelope.
    pub keychain: PathBuf,
    /// `<dir>/<name>.keychain.sha256` — the detached digest.
    pub digest: PathBuf,
    /// The resolved keychain name.
    pub name: String,
}

/// Resolve the keychain name and directory from CLI args and settings.
///
/// CLI arguments win over `.keyloom.toml`, which wins over defaults.
pub fn keychain_paths(cli: &Cli, settings: &Settings) -> Result<KeychainPaths> {
    let name = cli
        .keychain
        .clone()
        .unwrap_or_else(|| settings.default_keychain.clone());
    validate_keychain_name(&name)?;

    let dir = cli.dir.clone().unwrap_or_else(|| settings.keychain_dir.clone());
    let cwd = std::env::current_dir()?;
    let keychain = cwd.join(&dir).join(format!("{name}.keychain"));
    let digest = cwd.join(&dir).join(format!("{name}.keychain.sha256"));

    Ok(KeychainPaths {
        keychain,
        digest,
        name,
    })
}

/// Read the keychain file and its digest sidecar (if present).
pub fn read_keychain_file(paths: &KeychainPaths) -> Result<(String, Option<String>)> {
    if !paths.keychain.exists() {
        return Err(KeyloomError::KeychainNotFound(paths.keychain.clone()));
    }

    let text = fs::read_to_string(&paths.keychain)?;
    let digest = match fs::read_to_string(&paths.digest) {
        Ok(d) => Some(d.trim_end().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    Ok((text, digest))
}

/// Write the keychain file and its digest sidecar **atomically**.
///
/// Each file is written to a temp file in the same directory and then
/// renamed over the target, so readers never see a half-written file.
pub fn write_keychain_file(paths: &KeychainPaths, text: &str, digest: &str) -> Result<()> {
    write_atomic(&paths.keychain, text.as_bytes())?;
    write_atomic(&paths.digest, format!("{digest}\n").as_bytes())?;
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Read, prompt, and load: the common front half of every command that
/// needs a decrypted keychain.
///
/// The digest sidecar is enforced when `verify_digest` is on; a missing
/// sidecar downgrades to a warning (the envelope itself still has to
/// pass the load-time probe).
pub fn open_keychain(paths: &KeychainPaths, settings: &Settings) -> Result<Keychain> {
    let (text, sidecar) = read_keychain_file(paths)?;

    let expected_digest = if settings.verify_digest {
        if sidecar.is_none() {
            output::warning("No digest sidecar found — rollback detection skipped.");
        }
        sidecar
    } else {
        None
    };

    let password = prompt_password()?;
    Keychain::load(&password, &text, expected_digest.as_deref())
}

/// Dump the keychain and persist both the envelope and its digest.
pub fn save_keychain(paths: &KeychainPaths, keychain: &Keychain) -> Result<()> {
    let (text, digest) = keychain.dump()?;
    write_keychain_file(paths, &text, &digest)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a keychain name is safe and sensible.
///
/// Allowed: lowercase letters, digits, hyphens. Must not be empty
/// or start/end with a hyphen. Max length 64 characters.
/// This prevents accidental typos from silently creating new keychain files.
pub fn validate_keychain_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(KeyloomError::ConfigError(
            "keychain name cannot be empty".into(),
        ));
    }

    if name.len() > 64 {
        return Err(KeyloomError::ConfigError(
            "keychain name cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(KeyloomError::ConfigError(format!(
            "keychain name '{name}' is invalid — only lowercase letters, digits, and hyphens are allowed"
        )));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(KeyloomError::ConfigError(format!(
            "keychain name '{name}' cannot start or end with a hyphen"
        )));
    }

    Ok(())
}
