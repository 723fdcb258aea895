//! `keyloom verify` — check the keychain file against its sidecar digest.
//!
//! Recomputes the digest over the exact on-disk envelope bytes and
//! compares it (constant-time) with the sidecar.  No password needed:
//! the digest only authenticates the file bytes, not their contents.

use subtle::ConstantTimeEq;

use crate::cli::output;
use crate::cli::{keychain_paths, read_keychain_file, Cli};
use crate::config::Settings;
use crate::errors::{KeyloomError, Result};
use crate::keychain::envelope::compute_digest;

/// Execute the `verify` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let paths = keychain_paths(cli, &settings)?;

    let (text, sidecar) = read_keychain_file(&paths)?;

    let Some(expected) = sidecar else {
        return Err(KeyloomError::CommandFailed(format!(
            "no digest sidecar at {} — re-save the keychain to create one",
            paths.digest.display()
        )));
    };

    let actual = compute_digest(text.as_bytes());
    if bool::from(actual.as_bytes().ct_eq(expected.as_bytes())) {
        output::success(&format!(
            "Keychain '{}' matches its digest sidecar.",
            paths.name
        ));
        Ok(())
    } else {
        Err(KeyloomError::CommandFailed(
            "digest mismatch — the keychain file was modified or rolled back".into(),
        ))
    }
}
