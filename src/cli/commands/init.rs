//! `keyloom init` — create a new keychain.

use std::fs;

use crate::cli::output;
use crate::cli::{keychain_paths, prompt_new_password, save_keychain, Cli};
use crate::config::Settings;
use crate::errors::{KeyloomError, Result};
use crate::keychain::Keychain;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let paths = keychain_paths(cli, &settings)?;

    // 1. Create the keychain directory if it doesn't exist.
    if let Some(dir) = paths.keychain.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            output::info(&format!("Created keychain directory: {}", dir.display()));
        }
    }

    // 2. Refuse to clobber an existing keychain.
    if paths.keychain.exists() {
        output::tip("Use `keyloom set` to add entries to the existing keychain.");
        return Err(KeyloomError::KeychainAlreadyExists(paths.keychain));
    }

    // 3. Prompt for a new password (with confirmation) and derive.
    let password = prompt_new_password()?;
    let keychain = Keychain::init(&password)?;

    // 4. Persist the empty envelope and its digest sidecar.
    save_keychain(&paths, &keychain)?;

    output::success(&format!(
        "Keychain '{}' created at {}",
        paths.name,
        paths.keychain.display()
    ));
    output::tip("Run `keyloom set <name>` to add an entry.");
    output::tip("Run `keyloom verify` to check file integrity at any time.");

    Ok(())
}
