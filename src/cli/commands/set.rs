//! `keyloom set` — add or update an entry in the keychain.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{keychain_paths, open_keychain, save_keychain, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `set` command.
pub fn execute(cli: &Cli, key: &str, value: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let paths = keychain_paths(cli, &settings)?;

    // Determine the entry value from one of three sources.
    let entry_value = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter value for {key}"))
            .interact()
            .map_err(|e| crate::errors::KeyloomError::CommandFailed(format!("input prompt: {e}")))?
    };

    // Open the keychain, set the entry, and save.
    let mut keychain = open_keychain(&paths, &settings)?;

    let existed = matches!(keychain.get(key), Ok(Some(_)));
    keychain.set(key, &entry_value)?;
    save_keychain(&paths, &keychain)?;

    if existed {
        output::success(&format!(
            "Entry '{}' updated in keychain '{}' ({} total)",
            key,
            paths.name,
            keychain.entry_count()
        ));
    } else {
        output::success(&format!(
            "Entry '{}' added to keychain '{}' ({} total)",
            key,
            paths.name,
            keychain.entry_count()
        ));
    }

    Ok(())
}
