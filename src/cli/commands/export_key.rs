//! `keyloom export-key` — print the raw master key.
//!
//! Deliberately loud: the exported key decrypts the whole keychain
//! without the password, so this is gated behind a confirmation.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{keychain_paths, open_keychain, Cli};
use crate::config::Settings;
use crate::errors::{KeyloomError, Result};

/// Execute the `export-key` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let paths = keychain_paths(cli, &settings)?;

    output::warning("The exported key bypasses the password entirely.");
    output::warning("Anyone holding it can decrypt every entry in this keychain.");

    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Export the raw master key?")
            .default(false)
            .interact()
            .map_err(|e| KeyloomError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let keychain = open_keychain(&paths, &settings)?;
    let key = keychain.export_master_key();

    println!("{}", BASE64.encode(key.as_slice()));
    Ok(())
}
