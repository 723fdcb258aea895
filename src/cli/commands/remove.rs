//! `keyloom remove` — remove an entry from the keychain.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{keychain_paths, open_keychain, save_keychain, Cli};
use crate::config::Settings;
use crate::errors::{KeyloomError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, key: &str, force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let paths = keychain_paths(cli, &settings)?;

    // Unless --force is set, ask for confirmation before removing.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove entry '{key}'?"))
            .default(false)
            .interact()
            .map_err(|e| KeyloomError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    // Open the keychain (requires password).
    let mut keychain = open_keychain(&paths, &settings)?;

    if keychain.remove(key)? {
        save_keychain(&paths, &keychain)?;
        output::success(&format!("Removed entry '{key}'"));
    } else {
        output::info(&format!("No entry found for '{key}' — nothing removed."));
    }

    Ok(())
}
